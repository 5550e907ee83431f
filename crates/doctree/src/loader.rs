use std::path::Path;

use crate::container::{Container, DOCUMENT_PART};
use crate::error::Result;
use crate::types::{Block, DocumentTree, Paragraph, Table};
use crate::xmlscan;

impl DocumentTree {
    /// Open a `.docx` package and parse its content tree.
    ///
    /// Fails only when the container itself cannot be opened or the main
    /// document part is missing; faults on individual header, footer or body
    /// sub-parts are skipped with a debug log.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut container = Container::open(path)?;
        let document = container.read_part(DOCUMENT_PART)?;
        let header_names = container.header_part_names();
        let footer_names = container.footer_part_names();

        let mut tree = Self {
            header: part_texts(&mut container, header_names),
            footer: part_texts(&mut container, footer_names),
            body: parse_body(&document),
        };
        tree.header.retain(|t| !t.is_empty());
        tree.footer.retain(|t| !t.is_empty());

        log::debug!(
            "parsed {}: {} header, {} footer, {} body blocks",
            path.display(),
            tree.header.len(),
            tree.footer.len(),
            tree.body.len()
        );
        Ok(tree)
    }
}

/// Paragraph and table text of header/footer parts, in part order
fn part_texts(container: &mut Container, names: Vec<String>) -> Vec<String> {
    let mut texts = Vec::new();
    for name in names {
        let xml = match container.read_part(&name) {
            Ok(xml) => xml,
            Err(e) => {
                log::debug!("skipping unreadable part {name}: {e}");
                continue;
            }
        };
        for child in xmlscan::body_children(&xml) {
            match child.name {
                "w:p" | "w:tbl" => texts.push(xmlscan::run_text(child.slice)),
                _ => {}
            }
        }
    }
    texts
}

/// Top-level body blocks in document order
fn parse_body(document: &str) -> Vec<Block> {
    let Some(body) = xmlscan::body_slice(document) else {
        log::debug!("document has no body element");
        return Vec::new();
    };

    let mut blocks = Vec::new();
    for child in xmlscan::body_children(body) {
        match child.name {
            "w:p" => blocks.push(Block::Paragraph(Paragraph {
                text: xmlscan::run_text(child.slice),
                page_break: xmlscan::has_page_break(child.slice),
                frames: frame_texts(child.slice),
            })),
            "w:tbl" => blocks.push(Block::Table(Table {
                cells: xmlscan::find_elements(child.slice, "w:tc")
                    .into_iter()
                    .map(xmlscan::run_text)
                    .filter(|cell| !cell.is_empty())
                    .collect(),
                frames: frame_texts(child.slice),
            })),
            other => log::trace!("skipping body child <{other}>"),
        }
    }
    blocks
}

/// Embedded text-frame content at any nesting depth of a block
fn frame_texts(fragment: &str) -> Vec<String> {
    xmlscan::find_elements(fragment, "w:txbxContent")
        .into_iter()
        .map(xmlscan::run_text)
        .filter(|text| !text.is_empty())
        .collect()
}
