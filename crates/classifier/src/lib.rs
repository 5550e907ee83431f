//! # Triage Classifier
//!
//! The classification engine: decides whether a document is a
//! requirements-expression document (EDB), a client-framing document carrying
//! a structured code (NDC), or neither (OTHERS), from two independent
//! signals: the file name and a heuristic first page of content.
//!
//! ## Pipeline
//!
//! ```text
//! DocumentTree ──> First-Page Extractor ──┐
//!                                         │
//! filename ───────────────────────────────┼──> Decision Procedure
//!                                         │      rules 1-7, first match wins
//! readability flag ───────────────────────┘      └─> Classification { category, trace }
//! ```
//!
//! Classification is a pure function of its three inputs: no shared state,
//! no retries, safe to evaluate concurrently across documents. An unreadable
//! body never fails classification; filename rules still apply and the
//! unreadability cause surfaces in the reason trace.
//!
//! ## Example
//!
//! ```rust
//! use triage_classifier::{default_rules, Category, Readability};
//!
//! let rules = default_rules();
//! let outcome = rules.classify(
//!     "Expression de besoins du service",
//!     "demande.docx",
//!     &Readability::Readable,
//! );
//! assert_eq!(outcome.category, Category::Edb);
//! ```

mod code_matcher;
mod config;
mod decision;
mod error;
mod extract;
mod normalize;
mod phrase_matcher;
mod trace;

pub use code_matcher::{CodeMatch, CodeMatcher};
pub use config::{default_rules, CompiledRules, RuleSet, DEFAULT_CHAR_LIMIT};
pub use error::{ClassifierError, Result};
pub use extract::{extract_first_page, FirstPage, Fragment, FragmentKind};
pub use normalize::normalize;
pub use phrase_matcher::PhraseMatcher;
pub use trace::{Category, Classification, Readability, Signal, Trace};
