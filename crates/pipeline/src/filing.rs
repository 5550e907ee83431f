use std::fs;
use std::path::{Path, PathBuf};

use triage_classifier::Category;

use crate::error::Result;

/// Policy when the destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnExists {
    /// Leave the existing file alone (default)
    #[default]
    Skip,
    /// Replace the existing file
    Overwrite,
    /// Copy under a timestamped name next to the existing file
    Suffix,
}

/// What happened to one copy attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    SkippedExisting,
    Overwritten,
    CopiedWithSuffix,
    NotCopied,
    Failed(String),
}

impl CopyStatus {
    /// Report label
    pub fn label(&self) -> String {
        match self {
            Self::Copied => "copied".to_string(),
            Self::SkippedExisting => "skipped_existing".to_string(),
            Self::Overwritten => "overwritten".to_string(),
            Self::CopiedWithSuffix => "copied_with_suffix".to_string(),
            Self::NotCopied => "not_copied".to_string(),
            Self::Failed(cause) => format!("copy_failed:{cause}"),
        }
    }
}

/// Create the category bucket directories under `base`
pub fn ensure_buckets(base: &Path) -> Result<()> {
    for category in [Category::Edb, Category::Ndc, Category::Others] {
        fs::create_dir_all(base.join(category.bucket()))?;
    }
    Ok(())
}

/// Copy `src` into `dst_dir` under its own name, honoring the collision
/// policy. Returns the final destination and what happened.
pub fn safe_copy(src: &Path, dst_dir: &Path, on_exists: OnExists) -> Result<(PathBuf, CopyStatus)> {
    fs::create_dir_all(dst_dir)?;
    let name = src
        .file_name()
        .ok_or_else(|| crate::error::PipelineError::InvalidPath(src.display().to_string()))?;
    let dst = dst_dir.join(name);

    if !dst.exists() {
        fs::copy(src, &dst)?;
        return Ok((dst, CopyStatus::Copied));
    }

    match on_exists {
        OnExists::Skip => Ok((dst, CopyStatus::SkippedExisting)),
        OnExists::Overwrite => {
            fs::copy(src, &dst)?;
            Ok((dst, CopyStatus::Overwritten))
        }
        OnExists::Suffix => {
            let suffixed = dst_dir.join(timestamped_name(src));
            fs::copy(src, &suffixed)?;
            Ok((suffixed, CopyStatus::CopiedWithSuffix))
        }
    }
}

/// `stem_YYYYMMDD_HHMMSS.ext` collision name
fn timestamped_name(src: &Path) -> String {
    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = src
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("{stem}_{ts}{ext}")
}
