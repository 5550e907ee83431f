use serde::{Deserialize, Serialize};

/// Classification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Requirements-expression document
    Edb,
    /// Client-framing document carrying a structured code
    Ndc,
    /// Everything else
    Others,
}

impl Category {
    /// Report label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Edb => "EDB",
            Self::Ndc => "NDC",
            Self::Others => "OTHERS",
        }
    }

    /// Filing bucket directory name
    #[must_use]
    pub const fn bucket(self) -> &'static str {
        match self {
            Self::Edb => "edb",
            Self::Ndc => "ndc",
            Self::Others => "others",
        }
    }
}

/// Whether the document's content tree could be opened at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readability {
    Readable,
    Unreadable { cause: String },
}

impl Readability {
    #[must_use]
    pub fn is_readable(&self) -> bool {
        matches!(self, Self::Readable)
    }

    pub fn unreadable(cause: impl Into<String>) -> Self {
        Self::Unreadable {
            cause: cause.into(),
        }
    }
}

/// The rule that fired, with what it matched. One variant per rule of the
/// priority ladder, in ladder order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Rule 1: structured code found in the first page
    CodeInFirstPage { literal: String },
    /// Rule 2: filename contains the category marker
    MarkerInFilename { marker: String },
    /// Rule 3a: filename contains a literal phrase
    PhraseInFilename { phrase: String },
    /// Rule 3b: filename matches the abbreviation pattern
    AbbreviationInFilename { literal: String },
    /// Rule 4: short fragment in filename with no first-page code (or an
    /// unreadable body)
    FragmentWithoutCode { fragment: String, unreadable: bool },
    /// Rule 5: structured code found in the filename
    CodeInFilename { literal: String },
    /// Rule 6: literal phrase found in the first page
    PhraseInFirstPage { phrase: String },
    /// Rule 7: nothing matched
    NoSignal,
}

/// Structured reason trace: the signal that fired plus the unreadability
/// cause when the body could not be opened. Rendered to text only at the
/// reporting boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub signal: Signal,
    pub unreadable_cause: Option<String>,
}

impl Trace {
    pub fn render(&self) -> String {
        let core = match &self.signal {
            Signal::CodeInFirstPage { literal } => {
                format!("pattern:{literal} source:first_page")
            }
            Signal::MarkerInFilename { marker } => format!("filename_contains:{marker}"),
            Signal::PhraseInFilename { phrase } => {
                format!("filename_contains_phrase:'{phrase}'")
            }
            Signal::AbbreviationInFilename { literal } => {
                format!("filename_matches_abbreviation:'{literal}'")
            }
            Signal::FragmentWithoutCode {
                fragment,
                unreadable: false,
            } => format!("filename_contains:{fragment} AND no_code_on_first_page"),
            Signal::FragmentWithoutCode {
                fragment,
                unreadable: true,
            } => format!("filename_contains:{fragment} AND content_unreadable"),
            Signal::CodeInFilename { literal } => {
                format!("pattern:{literal} source:filename")
            }
            Signal::PhraseInFirstPage { phrase } => {
                format!("contains_first_page:'{phrase}'")
            }
            Signal::NoSignal => String::new(),
        };

        match &self.unreadable_cause {
            None => core,
            Some(cause) if core.is_empty() => format!("content_unreadable:{cause}"),
            Some(cause) => format!("{core} | content_unreadable:{cause}"),
        }
    }
}

/// The outcome of classifying one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub trace: Trace,
}

impl Classification {
    /// Human-readable reason string for the report
    pub fn reason(&self) -> String {
        self.trace.render()
    }
}
