//! Heading level assignment.

use crate::model::{HeadingCandidate, HeadingLevel};

/// Distinct candidate sizes, largest first, limited to the sizes that get
/// their own level.
pub fn level_sizes(candidates: &[HeadingCandidate]) -> Vec<f32> {
    let mut sizes: Vec<f32> = candidates.iter().map(|c| c.font_size).collect();
    sizes.sort_by(|a, b| b.total_cmp(a));
    sizes.dedup();
    sizes.truncate(HeadingLevel::ALL.len());
    sizes
}

/// Assign H1-H3 by font size.
///
/// The three largest distinct sizes map to H1, H2 and H3; every smaller
/// size falls back to H3.
pub fn assign_levels(candidates: &mut [HeadingCandidate]) {
    let sizes = level_sizes(candidates);
    log::debug!("Level sizes: {:?}", sizes);

    for candidate in candidates.iter_mut() {
        let rank = sizes
            .iter()
            .position(|&s| s == candidate.font_size)
            .unwrap_or(sizes.len());
        candidate.level = Some(HeadingLevel::from_rank(rank));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(sizes: &[f32]) -> Vec<HeadingCandidate> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| HeadingCandidate::new(format!("Heading {}", i), s, 1))
            .collect()
    }

    fn levels(candidates: &[HeadingCandidate]) -> Vec<HeadingLevel> {
        candidates.iter().filter_map(|c| c.level).collect()
    }

    #[test]
    fn test_three_sizes() {
        let mut c = candidates(&[14.0, 20.0, 16.0, 20.0]);
        assign_levels(&mut c);
        assert_eq!(
            levels(&c),
            vec![
                HeadingLevel::H3,
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H1
            ]
        );
    }

    #[test]
    fn test_smaller_tiers_fall_to_h3() {
        let mut c = candidates(&[24.0, 10.0, 18.0, 12.0, 14.0]);
        assign_levels(&mut c);
        assert_eq!(
            levels(&c),
            vec![
                HeadingLevel::H1,
                HeadingLevel::H3,
                HeadingLevel::H2,
                HeadingLevel::H3,
                HeadingLevel::H3
            ]
        );
    }

    #[test]
    fn test_single_size_is_h1() {
        let mut c = candidates(&[11.0, 11.0]);
        assign_levels(&mut c);
        assert_eq!(levels(&c), vec![HeadingLevel::H1, HeadingLevel::H1]);
    }

    #[test]
    fn test_level_sizes() {
        let c = candidates(&[9.0, 30.0, 9.0, 12.0, 15.0]);
        assert_eq!(level_sizes(&c), vec![30.0, 15.0, 12.0]);
        assert!(level_sizes(&[]).is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        let mut c: Vec<HeadingCandidate> = Vec::new();
        assign_levels(&mut c);
        assert!(c.is_empty());
    }
}
