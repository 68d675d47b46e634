//! Document title resolution.

use crate::model::UNTITLED;

/// Pick a title from metadata, falling back to the largest span on page 1.
///
/// The largest span must be strictly larger than every earlier one to win,
/// and its trimmed text must be longer than three characters.
pub fn resolve_title(metadata_title: Option<&str>, first_page_spans: &[(String, f32)]) -> String {
    if let Some(title) = metadata_title.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    let mut largest: Option<&(String, f32)> = None;
    let mut largest_size = 0.0f32;
    for span in first_page_spans {
        if span.1 > largest_size {
            largest_size = span.1;
            largest = Some(span);
        }
    }

    largest
        .map(|(text, _)| text.trim())
        .filter(|text| text.chars().count() > 3)
        .map_or_else(|| UNTITLED.to_string(), str::to_string)
}
