//! Final ordering and de-duplication of levelled headings.

use std::collections::HashSet;

use crate::model::{HeadingCandidate, HeadingLevel, OutlineEntry};

/// Order candidates by (page, font size) and keep the first of each text.
///
/// Candidates that were never levelled are emitted as H3.
pub fn resolve_outline(mut candidates: Vec<HeadingCandidate>) -> Vec<OutlineEntry> {
    candidates.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.font_size.total_cmp(&b.font_size))
    });

    let mut seen: HashSet<String> = HashSet::new();
    let mut entries = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if seen.contains(&candidate.text) {
            continue;
        }
        seen.insert(candidate.text.clone());
        entries.push(OutlineEntry {
            level: candidate.level.unwrap_or(HeadingLevel::H3),
            text: candidate.text,
            page: candidate.page,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, page: u32, size: f32, level: HeadingLevel) -> HeadingCandidate {
        HeadingCandidate {
            level: Some(level),
            ..HeadingCandidate::new(text, size, page)
        }
    }

    #[test]
    fn test_dedup_keeps_first_by_sort_order() {
        let entries = resolve_outline(vec![
            candidate("Intro", 3, 16.0, HeadingLevel::H2),
            candidate("Intro", 1, 20.0, HeadingLevel::H1),
        ]);
        assert_eq!(entries, vec![OutlineEntry::new(HeadingLevel::H1, "Intro", 1)]);
    }

    #[test]
    fn test_orders_by_page_then_ascending_size() {
        let entries = resolve_outline(vec![
            candidate("Big", 2, 24.0, HeadingLevel::H1),
            candidate("Small", 2, 12.0, HeadingLevel::H3),
            candidate("Early", 1, 18.0, HeadingLevel::H2),
            candidate("Also Small", 2, 12.0, HeadingLevel::H3),
        ]);
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Early", "Small", "Also Small", "Big"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let entries = resolve_outline(vec![
            candidate("Results", 1, 14.0, HeadingLevel::H2),
            candidate("RESULTS", 1, 14.0, HeadingLevel::H2),
            candidate("Results", 2, 14.0, HeadingLevel::H2),
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "RESULTS");
    }

    #[test]
    fn test_unlevelled_candidate_defaults_to_h3() {
        let entries = resolve_outline(vec![HeadingCandidate::new("Loose", 14.0, 1)]);
        assert_eq!(entries[0].level, HeadingLevel::H3);
    }
}
