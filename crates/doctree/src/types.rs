use serde::{Deserialize, Serialize};

/// One top-level content block of a document body, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// A body paragraph: visible run text plus embedded text-frame content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Newline-joined visible text runs
    pub text: String,

    /// True when any run carries an explicit page-break marker
    pub page_break: bool,

    /// Text of embedded text frames, at any nesting depth
    pub frames: Vec<String>,
}

/// A body table: cell text in row-major order plus embedded text frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Cell text in row-major (document) order
    pub cells: Vec<String>,

    /// Text of embedded text frames, at any nesting depth
    pub frames: Vec<String>,
}

impl Block {
    /// Embedded text-frame content of this block, if any
    pub fn frames(&self) -> &[String] {
        match self {
            Self::Paragraph(p) => &p.frames,
            Self::Table(t) => &t.frames,
        }
    }
}

/// Parsed content tree of a word-processing document.
///
/// Header and footer text comes from the first layout section (approximated
/// as all header/footer parts in part-name order, which is exact for
/// single-section documents). Body blocks keep document traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    /// Header paragraph and table text, in part order
    pub header: Vec<String>,

    /// Footer paragraph and table text, in part order
    pub footer: Vec<String>,

    /// Top-level body blocks, in document order
    pub body: Vec<Block>,
}

impl DocumentTree {
    /// Check whether the tree carries any visible text at all
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.footer.is_empty() && self.body.is_empty()
    }
}
