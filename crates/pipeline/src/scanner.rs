use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Scanner for finding classification candidates in an input directory
pub struct DocumentScanner {
    root: PathBuf,
    recursive: bool,
}

impl DocumentScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            recursive: false,
        }
    }

    /// Walk subdirectories too (default: top level only)
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Scan for `.docx` candidates, hidden files skipped, in deterministic
    /// case-insensitive path order.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true) // skip dot files; Office lock files start with ~$ and are caught below
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false);
        if !self.recursive {
            builder.max_depth(Some(1));
        }

        let mut files = Vec::new();
        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if Self::is_lock_file(path) {
                        log::debug!("skipping Office lock file {}", path.display());
                        continue;
                    }
                    if !Self::is_candidate(path) {
                        continue;
                    }
                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("failed to read entry: {e}"),
            }
        }

        files.sort_by_key(|p| p.to_string_lossy().to_lowercase());
        log::info!("found {} candidate document(s) in {}", files.len(), self.root.display());
        files
    }

    fn is_candidate(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
    }

    fn is_lock_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("~$"))
    }
}
