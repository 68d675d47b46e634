//! The outline artifact produced for each document.

use serde::{Deserialize, Serialize};

use super::heading::HeadingLevel;

/// Title used when neither metadata nor page 1 yields one.
pub const UNTITLED: &str = "Untitled Document";

/// A document title plus its page-ordered heading entries.
///
/// Serializes as `{"title": ..., "outline": [...]}`; key names and order
/// are relied on by downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title
    pub title: String,

    /// Headings, unique by text
    #[serde(rename = "outline")]
    pub entries: Vec<OutlineEntry>,
}

impl Outline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, entries: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }

    /// Outline of a document with no usable text.
    pub fn untitled() -> Self {
        Self::new(UNTITLED, Vec::new())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the outline has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries at a given level.
    pub fn at_level(&self, level: HeadingLevel) -> impl Iterator<Item = &OutlineEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }
}

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

impl OutlineEntry {
    /// Create an entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_wire_shape() {
        let outline = Outline::new(
            "Annual Report",
            vec![OutlineEntry::new(HeadingLevel::H1, "Überblick", 2)],
        );
        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Annual Report","outline":[{"level":"H1","text":"Überblick","page":2}]}"#
        );
    }

    #[test]
    fn test_untitled_outline() {
        let outline = Outline::untitled();
        assert_eq!(outline.title, "Untitled Document");
        assert!(outline.is_empty());
        assert_eq!(
            serde_json::to_string(&outline).unwrap(),
            r#"{"title":"Untitled Document","outline":[]}"#
        );
    }

    #[test]
    fn test_at_level() {
        let outline = Outline::new(
            "T",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "A", 1),
                OutlineEntry::new(HeadingLevel::H2, "B", 1),
                OutlineEntry::new(HeadingLevel::H1, "C", 2),
            ],
        );
        assert_eq!(outline.at_level(HeadingLevel::H1).count(), 2);
        assert_eq!(outline.len(), 3);
    }
}
