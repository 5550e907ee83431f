use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::filing::{safe_copy, OnExists};

/// Sibling directory the kept files are copied into
pub const INVENTORY_DIR: &str = "clean_extension";

const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// One CSV line of the inventory report
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InventoryRow {
    pub filename: String,
    pub extension: String,
    pub action: String,
}

/// End-of-run counters for the inventory pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySummary {
    pub kept: usize,
    pub ignored: usize,
    pub target_dir: PathBuf,
}

/// Copy every `.pdf`/`.doc`/`.docx` file from `raw_dir` into the sibling
/// `clean_extension/` directory and write an inventory CSV listing every
/// file with its keep/ignore action. Subdirectories are not entered.
/// Name collisions in the target get a timestamped suffix.
pub fn inventory_directory(raw_dir: &Path, report_path: &Path) -> Result<InventorySummary> {
    let parent = raw_dir.parent().unwrap_or(raw_dir);
    let target_dir = parent.join(INVENTORY_DIR);
    fs::create_dir_all(&target_dir)?;

    let mut files: Vec<PathBuf> = fs::read_dir(raw_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort_by_key(|p| p.to_string_lossy().to_lowercase());

    let mut rows = Vec::with_capacity(files.len());
    let mut kept = 0usize;
    let mut ignored = 0usize;

    for path in &files {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let action = if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            safe_copy(path, &target_dir, OnExists::Suffix)?;
            kept += 1;
            "keep"
        } else {
            ignored += 1;
            "ignore"
        };

        rows.push(InventoryRow {
            filename,
            extension,
            action: action.to_string(),
        });
    }

    let mut writer = csv::Writer::from_path(report_path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    log::info!(
        "inventory of {}: {kept} kept, {ignored} ignored, copies in {}",
        raw_dir.display(),
        target_dir.display()
    );
    Ok(InventorySummary {
        kept,
        ignored,
        target_dir,
    })
}
