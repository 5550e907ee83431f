use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::filing::{safe_copy, OnExists};

/// Sibling directory the kept files are copied into
pub const DEDUPE_DIR: &str = "dedupe";

const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Anti-collision suffix added by earlier passes: `_YYYYMMDD_HHMMSS`
static TS_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_\d{8}_\d{6}$").expect("timestamp suffix pattern"));

/// Grouping key: lowercased trimmed stem without the timestamp suffix,
/// so suffixed collision copies fold back into their original group.
pub fn normalized_key(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.trim().to_lowercase();
    TS_SUFFIX_RE.replace(&stem, "").into_owned()
}

/// Verdict for one file in the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeEntry {
    pub path: PathBuf,
    pub filename: String,
    pub extension: String,
    pub group: String,
    pub keep: bool,
    pub reason: String,
    pub planned_destination: Option<PathBuf>,
}

/// One CSV line of the dedupe plan report
#[derive(Debug, Clone, Serialize)]
struct PlanRow<'a> {
    filename: &'a str,
    extension: &'a str,
    group: &'a str,
    action: &'a str,
    reason: &'a str,
    source_path: String,
    planned_destination: String,
}

/// The full plan, computed before any copy happens
#[derive(Debug, Clone)]
pub struct DedupePlan {
    pub entries: Vec<DedupeEntry>,
    pub dedupe_dir: PathBuf,
}

/// Build the dedupe plan for a flat directory of `.pdf`/`.doc`/`.docx`
/// files. Files sharing a normalized stem form a group; within a group
/// `docx` beats `doc` beats `pdf`, and among copies of the winning format
/// the newest modification time wins.
pub fn plan(source_dir: &Path) -> Result<DedupePlan> {
    let parent = source_dir.parent().unwrap_or(source_dir);
    let dedupe_dir = parent.join(DEDUPE_DIR);

    let mut files: Vec<PathBuf> = fs::read_dir(source_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| {
                        ALLOWED_EXTENSIONS.contains(&e.to_lowercase().as_str())
                    })
        })
        .collect();
    files.sort_by_key(|p| p.to_string_lossy().to_lowercase());

    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        groups.entry(normalized_key(&file)).or_default().push(file);
    }

    let mut entries = Vec::new();
    for (group, paths) in &groups {
        let chosen = choose(paths)?;
        let Some((chosen, rule_reason)) = chosen else {
            continue;
        };

        let has_docx = paths.iter().any(|p| extension_of(p) == "docx");
        let has_word = has_docx || paths.iter().any(|p| extension_of(p) == "doc");

        for path in paths {
            let extension = extension_of(path);
            let keep = *path == chosen;
            let reason = if keep {
                let same_type = paths.iter().filter(|p| extension_of(p) == extension).count();
                if same_type > 1 {
                    format!("kept (newest of the {extension} copies)")
                } else {
                    rule_reason.to_string()
                }
            } else if extension == "pdf" && has_word {
                "pdf ignored (word version present)".to_string()
            } else if extension == "doc" && has_docx {
                "doc ignored (docx present)".to_string()
            } else {
                "ignored (older than the kept copy)".to_string()
            };

            entries.push(DedupeEntry {
                path: path.clone(),
                filename: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                extension,
                group: group.clone(),
                keep,
                reason,
                planned_destination: keep.then(|| {
                    dedupe_dir.join(path.file_name().unwrap_or_default())
                }),
            });
        }
    }

    Ok(DedupePlan {
        entries,
        dedupe_dir,
    })
}

/// Pick the group winner and the reason attached to an uncontested win
fn choose(paths: &[PathBuf]) -> Result<Option<(PathBuf, &'static str)>> {
    for (extension, reason) in [
        ("docx", "docx preferred, other formats ignored"),
        ("doc", "doc kept (no docx), pdf ignored"),
        ("pdf", "pdf only, kept"),
    ] {
        let candidates: Vec<&PathBuf> = paths
            .iter()
            .filter(|p| extension_of(p) == extension)
            .collect();
        if let Some(winner) = newest(&candidates)? {
            return Ok(Some((winner, reason)));
        }
    }
    Ok(None)
}

fn newest(candidates: &[&PathBuf]) -> Result<Option<PathBuf>> {
    let mut best: Option<(PathBuf, SystemTime)> = None;
    for path in candidates {
        let modified = fs::metadata(path)?.modified()?;
        let newer = best
            .as_ref()
            .map(|(_, time)| modified > *time)
            .unwrap_or(true);
        if newer {
            best = Some(((*path).clone(), modified));
        }
    }
    Ok(best.map(|(path, _)| path))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

impl DedupePlan {
    /// The files the plan keeps, in plan order
    pub fn keepers(&self) -> impl Iterator<Item = &DedupeEntry> {
        self.entries.iter().filter(|entry| entry.keep)
    }

    /// Write the plan CSV. Called before `execute`, so the report exists
    /// even when the copies fail afterwards.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for entry in &self.entries {
            writer.serialize(PlanRow {
                filename: &entry.filename,
                extension: &entry.extension,
                group: &entry.group,
                action: if entry.keep { "keep" } else { "ignore" },
                reason: &entry.reason,
                source_path: entry.path.display().to_string(),
                planned_destination: entry
                    .planned_destination
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            })?;
        }
        writer.flush()?;
        log::info!("dedupe plan written to {}", path.display());
        Ok(())
    }

    /// Copy the keepers into the sibling `dedupe/` directory. Collisions
    /// get a timestamped suffix. Returns the number of files copied.
    pub fn execute(&self) -> Result<usize> {
        fs::create_dir_all(&self.dedupe_dir)?;
        let mut copied = 0usize;
        for entry in self.keepers() {
            safe_copy(&entry.path, &self.dedupe_dir, OnExists::Suffix)?;
            copied += 1;
        }
        log::info!("{copied} file(s) copied to {}", self.dedupe_dir.display());
        Ok(copied)
    }
}
