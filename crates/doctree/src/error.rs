use thiserror::Error;

pub type Result<T> = std::result::Result<T, DoctreeError>;

/// Faults raised while opening a document container.
///
/// Every variant here means the document is unreadable as a whole; faults on
/// individual sub-parts are recovered inside the loader and never surface as
/// an error.
#[derive(Error, Debug)]
pub enum DoctreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("container error: {0}")]
    Container(#[from] zip::result::ZipError),

    #[error("missing document part: {0}")]
    MissingPart(String),
}
