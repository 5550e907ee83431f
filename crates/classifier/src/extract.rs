use serde::{Deserialize, Serialize};
use triage_doctree::{Block, DocumentTree};

/// Where a text fragment came from in the content tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FragmentKind {
    Header,
    Footer,
    Paragraph,
    TableCell,
    TextFrame,
}

/// One extracted text fragment, tagged with its source kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub text: String,
}

/// The first-page approximation of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstPage {
    /// Newline-joined fragment text, truncated to the character budget
    pub text: String,

    /// Fragments in traversal order (pre-truncation), for debugging output
    pub fragments: Vec<Fragment>,
}

/// Heuristic "first page" of a content tree.
///
/// Header and footer text of the first section is prepended unconditionally
/// and counts against the budget first. Body blocks are walked in document
/// order; a paragraph carrying an explicit page-break marker ends the walk
/// immediately (its own text included, its text frames not), which takes
/// precedence over the character budget. Otherwise the walk stops once the
/// accumulated length reaches `char_limit`, and the joined text is truncated
/// to exactly `char_limit` characters.
pub fn extract_first_page(tree: &DocumentTree, char_limit: usize) -> FirstPage {
    let mut acc = Accumulator::default();

    for text in &tree.header {
        acc.push(FragmentKind::Header, text);
    }
    for text in &tree.footer {
        acc.push(FragmentKind::Footer, text);
    }

    for block in &tree.body {
        match block {
            Block::Paragraph(p) => {
                if !p.text.is_empty() {
                    acc.push(FragmentKind::Paragraph, &p.text);
                }
                if p.page_break {
                    log::trace!("explicit page break after {} fragments", acc.fragments.len());
                    return acc.finish(char_limit);
                }
                for frame in &p.frames {
                    acc.push(FragmentKind::TextFrame, frame);
                }
            }
            Block::Table(t) => {
                for cell in &t.cells {
                    acc.push(FragmentKind::TableCell, cell);
                }
                for frame in &t.frames {
                    acc.push(FragmentKind::TextFrame, frame);
                }
            }
        }
        if acc.chars >= char_limit {
            break;
        }
    }

    acc.finish(char_limit)
}

#[derive(Default)]
struct Accumulator {
    fragments: Vec<Fragment>,
    chars: usize,
}

impl Accumulator {
    fn push(&mut self, kind: FragmentKind, text: &str) {
        self.chars += text.chars().count() + 1;
        self.fragments.push(Fragment {
            kind,
            text: text.to_string(),
        });
    }

    fn finish(self, char_limit: usize) -> FirstPage {
        let joined = self
            .fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        FirstPage {
            text: truncate_chars(joined, char_limit),
            fragments: self.fragments,
        }
    }
}

/// Character-accurate truncation (the budget counts characters, not bytes)
fn truncate_chars(mut text: String, limit: usize) -> String {
    if let Some((byte, _)) = text.char_indices().nth(limit) {
        text.truncate(byte);
    }
    text
}
