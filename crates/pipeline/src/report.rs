use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::runner::DocumentOutcome;

/// One CSV line of the classification report
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportRow {
    pub filename: String,
    pub original_path: String,
    pub classification: String,
    pub reason: String,
    pub destination_path: String,
    pub copy_status: String,
}

impl ReportRow {
    pub fn from_outcome(outcome: &DocumentOutcome) -> Self {
        Self {
            filename: outcome.filename.clone(),
            original_path: outcome.path.display().to_string(),
            classification: outcome.classification.category.as_str().to_string(),
            reason: outcome.classification.reason(),
            destination_path: outcome
                .destination
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            copy_status: outcome.copy_status.label(),
        }
    }
}

/// Write the classification report for a finished run, one row per document
/// in run order.
pub fn write_report(path: &Path, outcomes: &[DocumentOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for outcome in outcomes {
        writer.serialize(ReportRow::from_outcome(outcome))?;
    }
    writer.flush()?;
    log::info!("report written to {}", path.display());
    Ok(())
}

/// Per-category document counts for the end-of-run summary
pub fn summarize(outcomes: &[DocumentOutcome]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for outcome in outcomes {
        *counts
            .entry(outcome.classification.category.as_str().to_string())
            .or_insert(0) += 1;
    }
    counts
}
