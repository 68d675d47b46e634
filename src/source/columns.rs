//! Gutter detection for multi-column pages.

use super::content::PositionedSpan;

/// Width of the occupancy slices, in points.
const SLICE_WIDTH: f32 = 3.0;

/// Pages whose text is narrower than this are never split.
const MIN_SPLIT_WIDTH: f32 = 250.0;

/// Narrowest empty run considered as a gutter candidate.
const MIN_CANDIDATE_GAP: f32 = 10.0;

/// Narrowest gutter accepted as a column boundary.
const MIN_GUTTER: f32 = 12.0;

/// Narrowest accepted column.
const MIN_COLUMN_WIDTH: f32 = 80.0;

/// Horizontal band of a page holding one column of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Column {
    pub left: f32,
    pub right: f32,
}

impl Column {
    fn contains(&self, x: f32) -> bool {
        x >= self.left && x <= self.right
    }

    /// A span belongs to the column holding its left edge or its centre.
    pub fn contains_span(&self, span: &PositionedSpan) -> bool {
        self.contains(span.x) || self.contains(span.x + span.width / 2.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Gap {
    start: usize,
    len: usize,
    center_dist: usize,
}

/// Split a page into at most two columns, left to right.
///
/// Looks for the widest vertical band without text in the middle 70% of the
/// page. Returns no columns for an empty page.
pub(crate) fn detect_columns(spans: &[PositionedSpan]) -> Vec<Column> {
    if spans.is_empty() {
        return Vec::new();
    }

    let min_x = spans.iter().map(|s| s.x).fold(f32::INFINITY, f32::min);
    let max_x = spans
        .iter()
        .map(|s| s.x + s.width)
        .fold(f32::NEG_INFINITY, f32::max);
    let single = vec![Column {
        left: min_x - 10.0,
        right: max_x + 10.0,
    }];

    let page_width = max_x - min_x;
    if !page_width.is_finite() || page_width < MIN_SPLIT_WIDTH {
        return single;
    }

    let num_slices = (page_width / SLICE_WIDTH) as usize + 1;
    let mut occupancy = vec![0usize; num_slices];
    for span in spans {
        let start = ((span.x - min_x) / SLICE_WIDTH) as usize;
        let end = ((span.x + span.width - min_x) / SLICE_WIDTH) as usize;
        for slot in occupancy
            .iter_mut()
            .take(end.min(num_slices - 1) + 1)
            .skip(start)
        {
            *slot += 1;
        }
    }

    let Some(gap) = widest_gap(&occupancy) else {
        log::debug!("No gutter found, treating as single column");
        return single;
    };

    let gap_width = gap.len as f32 * SLICE_WIDTH;
    if gap_width < MIN_GUTTER {
        log::debug!("Gap of {gap_width:.1}pt too small, treating as single column");
        return single;
    }

    let gutter = min_x + (gap.start as f32 + gap.len as f32 / 2.0) * SLICE_WIDTH;
    if gutter - min_x < MIN_COLUMN_WIDTH || max_x - gutter < MIN_COLUMN_WIDTH {
        log::debug!("Column too narrow, treating as single column");
        return single;
    }

    let left = spans
        .iter()
        .filter(|s| s.x + s.width / 2.0 < gutter)
        .count();
    let right = spans.len() - left;
    let min_spans = (spans.len() / 10).max(2);
    if left < min_spans || right < min_spans {
        log::debug!("Spans too imbalanced ({left}/{right}), treating as single column");
        return single;
    }

    log::debug!("Gutter of {gap_width:.1}pt at x={gutter:.1}");
    vec![
        Column {
            left: min_x - 10.0,
            right: gutter,
        },
        Column {
            left: gutter,
            right: max_x + 10.0,
        },
    ]
}

/// Best empty run between 15% and 85% of the slices.
///
/// Prefers runs more than 1.5 times wider than the current best, or of
/// similar width and closer to the centre.
fn widest_gap(occupancy: &[usize]) -> Option<Gap> {
    let search_start = occupancy.len() * 15 / 100;
    let search_end = occupancy.len() * 85 / 100;
    let center = occupancy.len() / 2;

    let mut best: Option<Gap> = None;
    let mut consider = |start: usize, len: usize| {
        let width = len as f32 * SLICE_WIDTH;
        if width < MIN_CANDIDATE_GAP {
            return;
        }
        let candidate = Gap {
            start,
            len,
            center_dist: (start + len / 2).abs_diff(center),
        };
        let better = match best {
            None => true,
            Some(b) => {
                let best_width = b.len as f32 * SLICE_WIDTH;
                width > best_width * 1.5
                    || (width >= best_width * 0.7 && candidate.center_dist < b.center_dist)
            }
        };
        if better {
            best = Some(candidate);
        }
    };

    let mut run_start = 0;
    let mut run_len = 0;
    for (i, &count) in occupancy
        .iter()
        .enumerate()
        .take(search_end)
        .skip(search_start)
    {
        if count == 0 {
            if run_len == 0 {
                run_start = i;
            }
            run_len += 1;
        } else if run_len > 0 {
            consider(run_start, run_len);
            run_len = 0;
        }
    }
    if run_len > 0 {
        consider(run_start, run_len);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(x: f32, width: f32) -> PositionedSpan {
        PositionedSpan {
            text: "text".into(),
            x,
            y: 500.0,
            width,
            font_size: 10.0,
            style_flags: 0,
        }
    }

    #[test]
    fn test_empty_page_has_no_columns() {
        assert!(detect_columns(&[]).is_empty());
    }

    #[test]
    fn test_narrow_page_is_single_column() {
        let columns = detect_columns(&[span(72.0, 50.0), span(150.0, 50.0)]);
        assert_eq!(columns.len(), 1);
    }

    #[test]
    fn test_two_columns_split_at_gutter() {
        let spans = vec![
            span(72.0, 180.0),
            span(72.0, 170.0),
            span(72.0, 175.0),
            span(320.0, 180.0),
            span(320.0, 170.0),
            span(320.0, 160.0),
        ];
        let columns = detect_columns(&spans);

        assert_eq!(columns.len(), 2);
        let gutter = columns[0].right;
        assert!(gutter > 252.0 && gutter < 320.0, "gutter at {gutter}");
        assert!(columns[0].contains_span(&spans[0]));
        assert!(columns[1].contains_span(&spans[3]));
        assert!(!columns[0].contains_span(&spans[3]));
    }

    #[test]
    fn test_full_width_lines_prevent_split() {
        let spans = vec![
            span(72.0, 180.0),
            span(72.0, 450.0),
            span(320.0, 180.0),
            span(72.0, 440.0),
        ];
        assert_eq!(detect_columns(&spans).len(), 1);
    }

    #[test]
    fn test_lone_span_across_gutter_is_single_column() {
        let spans = vec![span(72.0, 100.0), span(72.0, 90.0), span(400.0, 100.0)];
        assert_eq!(detect_columns(&spans).len(), 1);
    }
}
