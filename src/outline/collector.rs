//! Span collection: turns a document source into logical text lines.

use crate::error::Result;
use crate::model::TextLine;
use crate::source::DocumentSource;

use super::options::{ErrorMode, ExtractOptions};

/// Pages past this bound are never analyzed.
pub const MAX_ANALYZED_PAGES: u32 = 50;

/// Lines gathered from a document, plus the raw spans of its first page.
#[derive(Debug, Clone, Default)]
pub struct CollectedText {
    /// Non-blank lines in page order
    pub lines: Vec<TextLine>,
    /// `(text, size)` of every span on page 1, in source order
    pub first_page_spans: Vec<(String, f32)>,
    /// Number of pages that were analyzed
    pub pages_analyzed: u32,
}

/// Collect text lines from the first [`MAX_ANALYZED_PAGES`] pages.
pub fn collect_lines<S: DocumentSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<CollectedText> {
    let pages_analyzed = source.page_count().min(MAX_ANALYZED_PAGES);
    let mut collected = CollectedText {
        pages_analyzed,
        ..CollectedText::default()
    };

    for page in 1..=pages_analyzed {
        let source_lines = match source.page_lines(page) {
            Ok(lines) => lines,
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping page {}: {}", page, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        if page == 1 {
            collected.first_page_spans = source_lines
                .iter()
                .flatten()
                .map(|span| (span.text.clone(), span.font_size))
                .collect();
        }

        let before = collected.lines.len();
        collected.lines.extend(
            source_lines
                .iter()
                .filter_map(|spans| TextLine::from_spans(spans, page)),
        );
        log::debug!(
            "Page {}: {} lines",
            page,
            collected.lines.len() - before
        );
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{SourceLine, StyledSpan};
    use crate::source::MemorySource;

    struct FlakySource;

    impl DocumentSource for FlakySource {
        fn metadata_title(&self) -> Option<String> {
            None
        }

        fn page_count(&self) -> u32 {
            3
        }

        fn page_lines(&self, page: u32) -> Result<Vec<SourceLine>> {
            if page == 2 {
                Err(Error::TextExtract("broken stream".into()))
            } else {
                Ok(vec![vec![StyledSpan::plain(format!("Page {} text", page), 11.0)]])
            }
        }
    }

    #[test]
    fn test_collect_merges_and_drops_blank_lines() {
        let source = MemorySource::new().with_page(vec![
            vec![StyledSpan::plain("Key ", 12.0), StyledSpan::bold("Findings", 14.0)],
            vec![StyledSpan::plain("   ", 30.0)],
            vec![],
        ]);
        let collected = collect_lines(&source, &ExtractOptions::default()).unwrap();

        assert_eq!(collected.lines.len(), 1);
        assert_eq!(collected.lines[0].text, "Key Findings");
        assert_eq!(collected.lines[0].font_size, 14.0);
        assert!(collected.lines[0].is_bold());
        assert_eq!(collected.first_page_spans.len(), 3);
        assert_eq!(collected.first_page_spans[2], ("   ".to_string(), 30.0));
    }

    #[test]
    fn test_collect_caps_pages() {
        let mut source = MemorySource::new();
        for i in 0..60 {
            source.add_page(vec![vec![StyledSpan::plain(format!("line {}", i), 10.0)]]);
        }
        let collected = collect_lines(&source, &ExtractOptions::default()).unwrap();

        assert_eq!(collected.pages_analyzed, 50);
        assert_eq!(collected.lines.len(), 50);
        assert!(collected.lines.iter().all(|l| (1..=50).contains(&l.page)));
    }

    #[test]
    fn test_collect_strict_mode_fails_on_bad_page() {
        let result = collect_lines(&FlakySource, &ExtractOptions::default());
        assert!(matches!(result, Err(Error::TextExtract(_))));
    }

    #[test]
    fn test_collect_lenient_mode_skips_bad_page() {
        let collected = collect_lines(&FlakySource, &ExtractOptions::new().lenient()).unwrap();
        let pages: Vec<u32> = collected.lines.iter().map(|l| l.page).collect();
        assert_eq!(pages, vec![1, 3]);
    }
}
