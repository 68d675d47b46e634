//! Document sources.
//!
//! The outline pipeline never touches PDF internals directly. It reads
//! documents through [`DocumentSource`], which yields per-page lines of
//! styled spans plus the document's metadata title. [`LopdfSource`] is the
//! PDF-backed implementation; [`MemorySource`] holds pages built in memory.

mod columns;
mod content;
mod lopdf_source;

pub use lopdf_source::LopdfSource;

use crate::error::{Error, Result};
use crate::model::SourceLine;

/// Abstract access to a document's styled text.
pub trait DocumentSource {
    /// Title from the document's embedded metadata, if any.
    fn metadata_title(&self) -> Option<String>;

    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Lines of the given 1-based page, top-to-bottom, each with its spans
    /// in left-to-right order.
    fn page_lines(&self, page: u32) -> Result<Vec<SourceLine>>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn metadata_title(&self) -> Option<String> {
        (**self).metadata_title()
    }

    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page_lines(&self, page: u32) -> Result<Vec<SourceLine>> {
        (**self).page_lines(page)
    }
}

/// In-memory document source.
///
/// # Example
///
/// ```
/// use pdfoutline::model::StyledSpan;
/// use pdfoutline::source::{DocumentSource, MemorySource};
///
/// let source = MemorySource::new()
///     .with_title("Field Guide")
///     .with_page(vec![vec![StyledSpan::bold("Overview", 18.0)]]);
/// assert_eq!(source.page_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    title: Option<String>,
    pages: Vec<Vec<SourceLine>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a page.
    pub fn with_page(mut self, lines: Vec<SourceLine>) -> Self {
        self.pages.push(lines);
        self
    }

    /// Append a page.
    pub fn add_page(&mut self, lines: Vec<SourceLine>) {
        self.pages.push(lines);
    }
}

impl DocumentSource for MemorySource {
    fn metadata_title(&self) -> Option<String> {
        self.title.clone()
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page: u32) -> Result<Vec<SourceLine>> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyledSpan;

    #[test]
    fn test_memory_source_pages() {
        let source = MemorySource::new()
            .with_page(vec![vec![StyledSpan::plain("first", 12.0)]])
            .with_page(vec![]);

        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page_lines(1).unwrap().len(), 1);
        assert!(source.page_lines(2).unwrap().is_empty());
        assert!(source.metadata_title().is_none());
    }

    #[test]
    fn test_memory_source_out_of_range() {
        let source = MemorySource::new().with_page(vec![]);
        assert!(matches!(
            source.page_lines(0),
            Err(Error::PageOutOfRange(0, 1))
        ));
        assert!(matches!(
            source.page_lines(2),
            Err(Error::PageOutOfRange(2, 1))
        ));
    }
}
