//! # pdfoutline
//!
//! Infers a document outline (title plus H1-H3 headings with page numbers)
//! from the visual typography of a PDF.
//!
//! The PDF's own bookmarks are ignored. Headings are recognised from font
//! size relative to the document's body text, bold styling, numbering and
//! chapter patterns, and a small set of section keywords.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline_file("report.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing
//!
//! ```no_run
//! use std::path::Path;
//! use pdfoutline::batch::{BatchOptions, BatchProcessor};
//!
//! let report = BatchProcessor::new(BatchOptions::default())
//!     .run_to_dir(Path::new("/app/input"), Path::new("/app/output"))?;
//! println!("{} of {} written", report.written(), report.total());
//! # Ok::<(), pdfoutline::Error>(())
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{BatchOptions, BatchProcessor, BatchReport, DocumentReport, DocumentStatus};
pub use error::{Error, Result};
pub use model::{HeadingLevel, Outline, OutlineEntry, StyledSpan, TextLine};
pub use outline::{build_outline, ErrorMode, ExtractOptions, OutlineExtractor};
pub use render::{JsonDirSink, JsonFormat, OutlineSink};
pub use source::{DocumentSource, LopdfSource, MemorySource};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_file;
///
/// let outline = extract_outline_file("paper.pdf").unwrap();
/// for entry in &outline.entries {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let path = path.as_ref();
    log::info!("Extracting outline from {}", path.display());
    let source = LopdfSource::open(path)?;
    OutlineExtractor::new().extract(&source)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8]) -> Result<Outline> {
    let source = LopdfSource::from_bytes(data)?;
    OutlineExtractor::new().extract(&source)
}

/// Extract the outline of any document source with custom options.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline_from, ExtractOptions, MemorySource, StyledSpan};
///
/// let source = MemorySource::new().with_page(vec![
///     vec![StyledSpan::plain("Release Notes", 24.0)],
///     vec![StyledSpan::bold("Fixed issues", 11.0)],
///     vec![StyledSpan::plain("several crashes were resolved in 4 modules", 11.0)],
/// ]);
/// let outline = extract_outline_from(&source, &ExtractOptions::default())?;
/// assert_eq!(outline.title, "Release Notes");
/// assert_eq!(outline.len(), 2);
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub fn extract_outline_from<S: DocumentSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<Outline> {
    OutlineExtractor::with_options(options.clone()).extract(source)
}
