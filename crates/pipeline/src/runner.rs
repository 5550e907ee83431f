use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use triage_classifier::{
    extract_first_page, Classification, CompiledRules, FirstPage, Readability,
};
use triage_doctree::DocumentTree;

use crate::error::{PipelineError, Result};
use crate::filing::{ensure_buckets, safe_copy, CopyStatus, OnExists};
use crate::scanner::DocumentScanner;

/// Options for one classification run over a directory
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,

    /// Walk subdirectories of the input directory
    pub recursive: bool,

    /// Collision policy for the filing copies
    pub on_exists: OnExists,

    /// Save each extracted first page under `<output>/_debug_first_pages`
    pub debug_first_pages: bool,

    /// Maximum in-flight documents
    pub concurrency: usize,
}

impl ClassifyOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            recursive: false,
            on_exists: OnExists::default(),
            debug_first_pages: false,
            concurrency: default_concurrency(),
        }
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(4)
}

/// Everything the report needs about one processed document
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub filename: String,
    pub classification: Classification,
    pub destination: Option<PathBuf>,
    pub copy_status: CopyStatus,
}

/// Classify a single document: open the content tree, extract the first
/// page, run the decision procedure. An unreadable container never fails;
/// it degrades to filename-only rules with the cause in the trace.
pub fn classify_document(rules: &CompiledRules, path: &Path) -> (Classification, FirstPage) {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match DocumentTree::open(path) {
        Ok(tree) => {
            let page = extract_first_page(&tree, rules.char_limit());
            let outcome = rules.classify(&page.text, &filename, &Readability::Readable);
            (outcome, page)
        }
        Err(e) => {
            log::warn!("{}: unreadable content ({e}), filename rules only", path.display());
            let readability = Readability::unreadable(e.to_string());
            (
                rules.classify("", &filename, &readability),
                FirstPage::default(),
            )
        }
    }
}

/// Classify every candidate under the input directory, file each copy into
/// its category bucket, and return one outcome per document in scan order.
///
/// Documents are independent, so they are evaluated concurrently on bounded
/// blocking tasks; a fault in one document never aborts the others, and no
/// document is ever dropped from the returned outcomes.
pub async fn classify_directory(
    rules: Arc<CompiledRules>,
    options: Arc<ClassifyOptions>,
) -> Result<Vec<DocumentOutcome>> {
    ensure_buckets(&options.output_dir)?;
    if options.debug_first_pages {
        std::fs::create_dir_all(debug_dir(&options.output_dir))?;
    }

    let candidates = DocumentScanner::new(&options.input_dir)
        .recursive(options.recursive)
        .scan();
    let total = candidates.len();

    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut set: JoinSet<Result<(usize, DocumentOutcome)>> = JoinSet::new();

    for (index, path) in candidates.into_iter().enumerate() {
        let rules = Arc::clone(&rules);
        let options = Arc::clone(&options);
        let semaphore = Arc::clone(&semaphore);
        set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| PipelineError::Other(e.to_string()))?;
            let job = {
                let rules = Arc::clone(&rules);
                let options = Arc::clone(&options);
                let path = path.clone();
                tokio::task::spawn_blocking(move || process_one(&rules, &options, &path))
            };
            // a worker dying is a per-document fault, never a run fault
            let outcome = match job.await {
                Ok(outcome) => outcome,
                Err(e) => failed_outcome(&rules, &path, e.to_string()),
            };
            Ok((index, outcome))
        });
    }

    let mut outcomes: Vec<(usize, DocumentOutcome)> = Vec::with_capacity(total);
    while let Some(joined) = set.join_next().await {
        let (index, outcome) =
            joined.map_err(|e| PipelineError::Other(format!("worker task failed: {e}")))??;
        log::info!(
            "[{}/{total}] {} -> {} ({})",
            index + 1,
            outcome.filename,
            outcome.classification.category.as_str(),
            non_empty(&outcome.classification.reason())
        );
        outcomes.push((index, outcome));
    }

    outcomes.sort_by_key(|(index, _)| *index);
    Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
}

/// Classify, dump the first page when asked, then file the copy.
/// Copy faults end up in the status, never as an error.
fn process_one(
    rules: &CompiledRules,
    options: &ClassifyOptions,
    path: &Path,
) -> DocumentOutcome {
    let (classification, page) = classify_document(rules, path);

    if options.debug_first_pages {
        dump_first_page(&options.output_dir, path, &page);
    }

    let bucket = options.output_dir.join(classification.category.bucket());
    let (destination, copy_status) = match safe_copy(path, &bucket, options.on_exists) {
        Ok((dst, status)) => (Some(dst), status),
        Err(e) => {
            log::warn!("{}: copy failed: {e}", path.display());
            (None, CopyStatus::Failed(e.to_string()))
        }
    };

    DocumentOutcome {
        path: path.to_path_buf(),
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        classification,
        destination,
        copy_status,
    }
}

/// Outcome for a document whose worker died before producing one. The
/// filename rules still classify it and nothing is copied.
fn failed_outcome(rules: &CompiledRules, path: &Path, cause: String) -> DocumentOutcome {
    log::warn!("{}: worker failed ({cause})", path.display());
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let classification = rules.classify("", &filename, &Readability::unreadable(cause));
    DocumentOutcome {
        path: path.to_path_buf(),
        filename,
        classification,
        destination: None,
        copy_status: CopyStatus::NotCopied,
    }
}

fn debug_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("_debug_first_pages")
}

fn dump_first_page(output_dir: &Path, path: &Path, page: &FirstPage) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = debug_dir(output_dir).join(format!("{stem}.txt"));
    if let Err(e) = std::fs::write(&target, &page.text) {
        log::debug!("could not write first-page dump {}: {e}", target.display());
    }
}

fn non_empty(reason: &str) -> &str {
    if reason.is_empty() {
        "no_reason"
    } else {
        reason
    }
}
