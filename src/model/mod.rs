//! Data model for outline extraction.
//!
//! Spans and lines come out of a document source, heading candidates are
//! the lines the classifier keeps, and an [`Outline`] is the final result.

mod heading;
mod line;
mod outline;

pub use heading::{HeadingCandidate, HeadingLevel};
pub use line::{
    is_bold, sanitize_size, SourceLine, StyleFlags, StyledSpan, TextLine, FLAG_BOLD, FLAG_ITALIC,
    FLAG_MONOSPACED, FLAG_SERIFED, FLAG_SUPERSCRIPT,
};
pub use outline::{Outline, OutlineEntry, UNTITLED};
