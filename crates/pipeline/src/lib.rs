//! # Triage Pipeline
//!
//! Everything around the classification engine: finding candidate documents,
//! running the rules over a whole directory, filing copies into category
//! buckets, and writing the CSV reports. Also carries the two curation
//! passes that usually run before classification: the extension inventory
//! and the dedupe-by-recency plan.
//!
//! ## Flow
//!
//! ```text
//! input dir ──> DocumentScanner ──> classify_directory
//!                                      │  (bounded blocking tasks)
//!                                      ├─> classify_document per file
//!                                      ├─> safe_copy into edb/ ndc/ others/
//!                                      └─> Vec<DocumentOutcome> ──> write_report
//! ```
//!
//! A fault in one document (unreadable content, failed copy) is recorded in
//! its outcome and never aborts the run.

mod dedupe;
mod error;
mod filing;
mod inventory;
mod report;
mod runner;
mod scanner;

pub use dedupe::{normalized_key, plan, DedupeEntry, DedupePlan, DEDUPE_DIR};
pub use error::{PipelineError, Result};
pub use filing::{ensure_buckets, safe_copy, CopyStatus, OnExists};
pub use inventory::{inventory_directory, InventoryRow, InventorySummary, INVENTORY_DIR};
pub use report::{summarize, write_report, ReportRow};
pub use runner::{classify_directory, classify_document, ClassifyOptions, DocumentOutcome};
pub use scanner::DocumentScanner;
