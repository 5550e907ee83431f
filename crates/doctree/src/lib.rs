//! # Triage Doctree
//!
//! OOXML container access and a typed content tree for `.docx` documents.
//!
//! ## Pipeline
//!
//! ```text
//! .docx path
//!     │
//!     ├──> Container (zip package, named parts)
//!     │      └─> word/document.xml, word/header*.xml, word/footer*.xml
//!     │
//!     └──> DocumentTree
//!            ├─> header / footer text (first layout section)
//!            └─> body blocks in document order
//!                 ├─> Paragraph { text, page_break, frames }
//!                 └─> Table { cells, frames }
//! ```
//!
//! Opening a document can fail (corrupt container, missing main part); that
//! error is the caller's document-unreadable signal. Faults on individual
//! sub-parts are recovered by skipping the sub-part.

mod container;
mod error;
mod loader;
mod types;
mod xmlscan;

pub use container::{Container, DOCUMENT_PART};
pub use error::{DoctreeError, Result};
pub use types::{Block, DocumentTree, Paragraph, Table};
