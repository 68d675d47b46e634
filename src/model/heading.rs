//! Heading candidates and outline levels.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::line::{StyleFlags, TextLine};

/// Nominal outline depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Shallowest level, largest font
    H1,
    /// Second level
    H2,
    /// Deepest level and catch-all floor
    H3,
}

impl HeadingLevel {
    /// All levels, shallowest first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Level for a 0-based size rank; ranks past the last level clamp to H3.
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label used in the serialized outline.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line judged heading-like, pending level assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    pub text: String,
    pub font_size: f32,
    pub style_flags: StyleFlags,
    pub page: u32,
    /// `None` until levels are assigned
    pub level: Option<HeadingLevel>,
}

impl HeadingCandidate {
    /// Create an unlevelled candidate.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            style_flags: 0,
            page,
            level: None,
        }
    }
}

impl From<&TextLine> for HeadingCandidate {
    fn from(line: &TextLine) -> Self {
        Self {
            text: line.text.clone(),
            font_size: line.font_size,
            style_flags: line.style_flags,
            page: line.page,
            level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_rank() {
        assert_eq!(HeadingLevel::from_rank(0), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_rank(1), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_rank(2), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_rank(7), HeadingLevel::H3);
    }

    #[test]
    fn test_level_serializes_as_label() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
        assert_eq!(HeadingLevel::H1.depth(), 1);
    }

    #[test]
    fn test_candidate_from_line() {
        let line = TextLine::new("Methodology", 15.0, 16, 3);
        let candidate = HeadingCandidate::from(&line);
        assert_eq!(candidate.text, "Methodology");
        assert_eq!(candidate.page, 3);
        assert_eq!(candidate.style_flags, 16);
        assert!(candidate.level.is_none());
    }
}
