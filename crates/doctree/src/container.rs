use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{DoctreeError, Result};

/// Main document part inside the OOXML package
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Read access to the OOXML zip container.
///
/// Opening the container (or finding the main document part) can fail; that
/// failure is the document-unreadable signal the classifier consumes.
pub struct Container {
    archive: ZipArchive<File>,
}

impl Container {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let archive = ZipArchive::new(file)?;
        Ok(Self { archive })
    }

    /// Read a named part as text (lossy on non-UTF-8 bytes)
    pub fn read_part(&mut self, name: &str) -> Result<String> {
        let mut part = self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => DoctreeError::MissingPart(name.to_string()),
            other => DoctreeError::Container(other),
        })?;
        let mut bytes = Vec::new();
        part.read_to_end(&mut bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Header part names (`word/header*.xml`), sorted by name
    pub fn header_part_names(&self) -> Vec<String> {
        self.part_names_with_prefix("word/header")
    }

    /// Footer part names (`word/footer*.xml`), sorted by name
    pub fn footer_part_names(&self) -> Vec<String> {
        self.part_names_with_prefix("word/footer")
    }

    fn part_names_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .archive
            .file_names()
            .filter(|name| name.starts_with(prefix) && name.ends_with(".xml"))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }
}
