//! Styled spans and the logical lines built from them.

use serde::{Deserialize, Serialize};

/// Opaque style bitmask attached to a span.
///
/// Bit values follow the common renderer convention: superscript (1),
/// italic (2), serifed (4), monospaced (8), bold (16).
pub type StyleFlags = u32;

/// Superscript span.
pub const FLAG_SUPERSCRIPT: StyleFlags = 1;
/// Italic or oblique face.
pub const FLAG_ITALIC: StyleFlags = 1 << 1;
/// Serifed face.
pub const FLAG_SERIFED: StyleFlags = 1 << 2;
/// Monospaced face.
pub const FLAG_MONOSPACED: StyleFlags = 1 << 3;
/// Bold face.
pub const FLAG_BOLD: StyleFlags = 1 << 4;

/// Check the bold capability bit of a style mask.
pub fn is_bold(flags: StyleFlags) -> bool {
    flags & FLAG_BOLD != 0
}

/// Clamp a reported font size into the range the pipeline works with.
///
/// Absent, non-finite or non-positive sizes become `0.0`; such spans still
/// count toward statistics but never pass the size rule.
pub fn sanitize_size(size: f32) -> f32 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

/// A run of text sharing one font, size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledSpan {
    /// Raw span text, untrimmed
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Style bitmask
    pub style_flags: StyleFlags,
}

impl StyledSpan {
    /// Create a span, sanitizing its size.
    pub fn new(text: impl Into<String>, font_size: f32, style_flags: StyleFlags) -> Self {
        Self {
            text: text.into(),
            font_size: sanitize_size(font_size),
            style_flags,
        }
    }

    /// Create an unstyled span.
    pub fn plain(text: impl Into<String>, font_size: f32) -> Self {
        Self::new(text, font_size, 0)
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>, font_size: f32) -> Self {
        Self::new(text, font_size, FLAG_BOLD)
    }
}

/// Spans that sit on one visual line, in left-to-right order.
pub type SourceLine = Vec<StyledSpan>;

/// One logical line of a page, merged from its spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Concatenated span text, trimmed
    pub text: String,
    /// Largest span size on the line
    pub font_size: f32,
    /// OR of all span style bits
    pub style_flags: StyleFlags,
    /// 1-based page number
    pub page: u32,
}

impl TextLine {
    /// Create a line directly.
    pub fn new(text: impl Into<String>, font_size: f32, style_flags: StyleFlags, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size: sanitize_size(font_size),
            style_flags,
            page,
        }
    }

    /// Merge the spans of one visual line.
    ///
    /// Returns `None` when the merged text is blank.
    pub fn from_spans(spans: &[StyledSpan], page: u32) -> Option<Self> {
        let mut text = String::new();
        let mut font_size = 0.0f32;
        let mut style_flags = 0;

        for span in spans {
            text.push_str(&span.text);
            font_size = font_size.max(sanitize_size(span.font_size));
            style_flags |= span.style_flags;
        }

        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_string(),
            font_size,
            style_flags,
            page,
        })
    }

    /// Whether any part of the line is bold.
    pub fn is_bold(&self) -> bool {
        is_bold(self.style_flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bold() {
        assert!(is_bold(FLAG_BOLD));
        assert!(is_bold(FLAG_BOLD | FLAG_ITALIC));
        assert!(!is_bold(FLAG_ITALIC | FLAG_SERIFED));
        assert!(!is_bold(0));
    }

    #[test]
    fn test_sanitize_size() {
        assert_eq!(sanitize_size(11.5), 11.5);
        assert_eq!(sanitize_size(-3.0), 0.0);
        assert_eq!(sanitize_size(f32::NAN), 0.0);
        assert_eq!(sanitize_size(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_from_spans_merges_metrics() {
        let spans = vec![
            StyledSpan::new("  Results", 14.0, FLAG_ITALIC),
            StyledSpan::bold(" and Findings ", 16.0),
        ];
        let line = TextLine::from_spans(&spans, 4).unwrap();

        assert_eq!(line.text, "Results and Findings");
        assert_eq!(line.font_size, 16.0);
        assert_eq!(line.style_flags, FLAG_ITALIC | FLAG_BOLD);
        assert_eq!(line.page, 4);
        assert!(line.is_bold());
    }

    #[test]
    fn test_from_spans_blank_line() {
        let spans = vec![StyledSpan::plain("  ", 12.0), StyledSpan::plain("\t", 12.0)];
        assert!(TextLine::from_spans(&spans, 1).is_none());
        assert!(TextLine::from_spans(&[], 1).is_none());
    }

    #[test]
    fn test_malformed_span_size() {
        let span = StyledSpan::plain("Body", -1.0);
        assert_eq!(span.font_size, 0.0);
    }
}
