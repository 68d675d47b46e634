//! Corpus-wide font statistics.

use indexmap::IndexMap;

use crate::model::{sanitize_size, TextLine};

/// Size assumed for a document with no text.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Average and most common font size over a document's lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontProfile {
    /// Arithmetic mean of line sizes
    pub average_size: f32,
    /// Mode of line sizes, a proxy for body text size
    pub common_size: f32,
}

impl Default for FontProfile {
    fn default() -> Self {
        Self {
            average_size: DEFAULT_FONT_SIZE,
            common_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl FontProfile {
    /// Compute the profile of a set of lines.
    ///
    /// The mode breaks ties toward the size seen first.
    pub fn compute(lines: &[TextLine]) -> Self {
        if lines.is_empty() {
            return Self::default();
        }

        let sizes = || lines.iter().map(|l| sanitize_size(l.font_size));

        let total: f64 = sizes().map(f64::from).sum();
        let average_size = (total / lines.len() as f64) as f32;

        // Keyed by bit pattern, which is exact once -0.0 and NaN fold into 0.0.
        let mut counts: IndexMap<u32, usize> = IndexMap::new();
        for size in sizes() {
            *counts.entry(size.to_bits()).or_insert(0) += 1;
        }

        let mut common = (0u32, 0usize);
        for (&bits, &count) in &counts {
            if count > common.1 {
                common = (bits, count);
            }
        }

        Self {
            average_size,
            common_size: f32::from_bits(common.0),
        }
    }

    /// Minimum size for the size rule of the heading classifier.
    pub fn heading_threshold(&self) -> f32 {
        (self.average_size * 1.1).max(self.common_size * 1.05)
    }
}
