//! Heading classification.
//!
//! Each line is judged on its own against the document's [`FontProfile`].
//! Rules run in a fixed order and the first one that applies decides:
//!
//! 1. reject filters (length, numeric-only text, sentence punctuation)
//! 2. size rule
//! 3. bold style rule
//! 4. textual patterns ([`HeadingPattern::ALL`], in order)
//! 5. keywords ([`HEADING_KEYWORDS`])

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{is_bold, TextLine};

use super::stats::FontProfile;

/// Words whose presence marks a line as a likely section heading.
pub const HEADING_KEYWORDS: [&str; 15] = [
    "introduction",
    "conclusion",
    "abstract",
    "summary",
    "overview",
    "methodology",
    "results",
    "discussion",
    "background",
    "literature",
    "references",
    "appendix",
    "acknowledgments",
    "contents",
    "index",
];

const MIN_HEADING_CHARS: usize = 3;
const MAX_HEADING_CHARS: usize = 200;
const TRAILING_PUNCTUATION: [char; 6] = ['.', '!', '?', ',', ';', ':'];

static CHAPTER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(Chapter|Section|Part)\s+\d+[.:]\s*(.+)").unwrap());
static NUMERIC_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+\.?\d*\.?\d*)\s+(.+)").unwrap());
static ALL_CAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^([A-Z][A-Z\s]+)$").unwrap());
static TITLE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s*$").unwrap());
static NUMERIC_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s.\-()]+$").unwrap());

/// Textual shapes typical of headings.
///
/// Patterns match case-insensitively against the trimmed line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingPattern {
    /// `Chapter 3: Results`, `Section 2. Scope`, `Part 1 Basics`
    ChapterPrefix,
    /// `2.1 Data Sources`
    NumericPrefix,
    /// `GENERAL TERMS`
    AllCaps,
    /// `Related Work`
    TitleCase,
}

impl HeadingPattern {
    /// Patterns in evaluation order.
    pub const ALL: [HeadingPattern; 4] = [
        HeadingPattern::ChapterPrefix,
        HeadingPattern::NumericPrefix,
        HeadingPattern::AllCaps,
        HeadingPattern::TitleCase,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            HeadingPattern::ChapterPrefix => &*CHAPTER_PREFIX,
            HeadingPattern::NumericPrefix => &*NUMERIC_PREFIX,
            HeadingPattern::AllCaps => &*ALL_CAPS,
            HeadingPattern::TitleCase => &*TITLE_CASE,
        }
    }

    /// Whether trimmed text has this shape.
    pub fn matches(self, text: &str) -> bool {
        self.regex().is_match(text)
    }

    /// First pattern matching the text, if any.
    pub fn find(text: &str) -> Option<HeadingPattern> {
        Self::ALL.into_iter().find(|p| p.matches(text))
    }
}

/// Why a line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooShort,
    TooLong,
    NumericOnly,
    TrailingPunctuation,
    NoSignal,
}

/// Why a line was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptReason {
    Size,
    Bold,
    Pattern(HeadingPattern),
    Keyword(&'static str),
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Heading(AcceptReason),
    Body(RejectReason),
}

impl Verdict {
    /// Whether the line is a heading candidate.
    pub fn is_heading(&self) -> bool {
        matches!(self, Verdict::Heading(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Heading(AcceptReason::Size) => f.write_str("heading (size)"),
            Verdict::Heading(AcceptReason::Bold) => f.write_str("heading (bold)"),
            Verdict::Heading(AcceptReason::Pattern(p)) => write!(f, "heading (pattern: {:?})", p),
            Verdict::Heading(AcceptReason::Keyword(k)) => write!(f, "heading (keyword: {})", k),
            Verdict::Body(reason) => write!(f, "body ({:?})", reason),
        }
    }
}

/// Classify a line against the document's font profile.
pub fn classify(line: &TextLine, profile: &FontProfile) -> Verdict {
    let text = line.text.trim();

    let chars = text.chars().count();
    if chars < MIN_HEADING_CHARS {
        return Verdict::Body(RejectReason::TooShort);
    }
    if chars > MAX_HEADING_CHARS {
        return Verdict::Body(RejectReason::TooLong);
    }
    if NUMERIC_ONLY.is_match(text) {
        return Verdict::Body(RejectReason::NumericOnly);
    }
    if text.ends_with(&TRAILING_PUNCTUATION[..]) {
        return Verdict::Body(RejectReason::TrailingPunctuation);
    }

    if line.font_size >= profile.heading_threshold() {
        return Verdict::Heading(AcceptReason::Size);
    }
    if is_bold(line.style_flags) {
        return Verdict::Heading(AcceptReason::Bold);
    }
    if let Some(pattern) = HeadingPattern::find(text) {
        return Verdict::Heading(AcceptReason::Pattern(pattern));
    }

    let lower = text.to_lowercase();
    if let Some(keyword) = HEADING_KEYWORDS.iter().copied().find(|k| lower.contains(k)) {
        return Verdict::Heading(AcceptReason::Keyword(keyword));
    }

    Verdict::Body(RejectReason::NoSignal)
}

/// Whether a line is a heading candidate.
pub fn is_heading(line: &TextLine, profile: &FontProfile) -> bool {
    classify(line, profile).is_heading()
}
