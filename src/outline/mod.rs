//! Outline inference pipeline.
//!
//! A document goes through six stages, each feeding the next:
//!
//! 1. [`collect_lines`] merges source spans into [`TextLine`]s (first 50 pages)
//! 2. [`FontProfile::compute`] derives average and most common font size
//! 3. [`resolve_title`] picks the metadata title or the largest page-1 span
//! 4. [`classify`] marks heading candidates
//! 5. [`assign_levels`] maps candidate sizes to H1-H3
//! 6. [`resolve_outline`] orders by (page, size) and drops repeated text
//!
//! Stages 2-6 are pure functions of the collected lines and are exposed
//! together as [`build_outline`].

mod classifier;
mod collector;
mod levels;
mod options;
mod resolver;
mod stats;
mod title;

pub use classifier::{
    classify, is_heading, AcceptReason, HeadingPattern, RejectReason, Verdict, HEADING_KEYWORDS,
};
pub use collector::{collect_lines, CollectedText, MAX_ANALYZED_PAGES};
pub use levels::{assign_levels, level_sizes};
pub use options::{ErrorMode, ExtractOptions};
pub use resolver::resolve_outline;
pub use stats::{FontProfile, DEFAULT_FONT_SIZE};
pub use title::resolve_title;

use crate::error::Result;
use crate::model::{HeadingCandidate, Outline, TextLine};
use crate::source::DocumentSource;

/// Pick heading candidates out of a line set.
pub fn find_candidates(lines: &[TextLine], profile: &FontProfile) -> Vec<HeadingCandidate> {
    lines
        .iter()
        .filter(|line| is_heading(line, profile))
        .map(HeadingCandidate::from)
        .collect()
}

/// Run the decision stages over already collected lines.
pub fn build_outline(title: impl Into<String>, lines: &[TextLine]) -> Outline {
    let profile = FontProfile::compute(lines);
    log::debug!(
        "Font profile: average {:.2}, common {:.2}",
        profile.average_size,
        profile.common_size
    );

    let mut candidates = find_candidates(lines, &profile);
    log::debug!("{} of {} lines are heading candidates", candidates.len(), lines.len());

    assign_levels(&mut candidates);
    Outline::new(title, resolve_outline(candidates))
}

/// Extracts outlines from document sources.
///
/// # Example
///
/// ```
/// use pdfoutline::model::StyledSpan;
/// use pdfoutline::source::MemorySource;
/// use pdfoutline::OutlineExtractor;
///
/// let source = MemorySource::new().with_page(vec![
///     vec![StyledSpan::plain("Field Notes", 26.0)],
///     vec![StyledSpan::plain("Observations were recorded daily", 11.0)],
///     vec![StyledSpan::plain("Weather was mild throughout", 11.0)],
/// ]);
/// let outline = OutlineExtractor::new().extract(&source)?;
/// assert_eq!(outline.title, "Field Notes");
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: ExtractOptions,
}

impl OutlineExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with the given options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Skip pages that fail to extract.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Derive the title from page 1 even when metadata has one.
    pub fn ignore_metadata_title(mut self) -> Self {
        self.options = self.options.ignore_metadata_title();
        self
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract the outline of a document.
    pub fn extract<S: DocumentSource + ?Sized>(&self, source: &S) -> Result<Outline> {
        let collected = collect_lines(source, &self.options)?;

        let metadata_title = if self.options.use_metadata_title {
            source.metadata_title()
        } else {
            None
        };
        let title = resolve_title(metadata_title.as_deref(), &collected.first_page_spans);

        let outline = build_outline(title, &collected.lines);
        log::info!(
            "Outline \"{}\": {} headings from {} lines on {} pages",
            outline.title,
            outline.len(),
            collected.lines.len(),
            collected.pages_analyzed
        );
        Ok(outline)
    }
}
