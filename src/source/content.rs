//! Content stream interpretation.
//!
//! Walks the text operators of a page's content stream, tracking the text
//! and graphics matrices, and produces positioned spans. Spans are then
//! grouped into visual lines by baseline.

use lopdf::content::Operation;
use lopdf::Object;
use unicode_normalization::UnicodeNormalization;

use super::columns::detect_columns;
use crate::model::{sanitize_size, SourceLine, StyleFlags, StyledSpan};

/// Font lookups needed while interpreting a content stream.
pub(crate) trait FontResolver {
    /// Decode a string operand shown with the named font resource.
    fn decode(&self, font: &[u8], bytes: &[u8]) -> String;

    /// Style bits for the named font resource.
    fn style(&self, font: &[u8]) -> StyleFlags;

    /// Advance of a string operand in ems, when the font carries widths.
    fn advance(&self, font: &[u8], bytes: &[u8]) -> Option<f32>;
}

/// A span with its position in page space.
#[derive(Debug, Clone)]
pub(crate) struct PositionedSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// Horizontal extent in page space
    pub width: f32,
    pub font_size: f32,
    pub style_flags: StyleFlags,
}

/// Affine matrix `[a b c d e f]` as used by PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self × other`
    fn then(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    fn origin(&self) -> (f32, f32) {
        (self.0[4], self.0[5])
    }

    fn horizontal_scale(&self) -> f32 {
        let [a, b, _, _, _, _] = self.0;
        (a * a + b * b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        let [_, _, c, d, _, _] = self.0;
        (c * c + d * d).sqrt()
    }
}

/// TJ adjustments (thousandths of an em) larger than this read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Glyph advance assumed for fonts without a width table.
const ESTIMATED_GLYPH_EM: f32 = 0.5;

/// Horizontal gap, in ems, that separates two runs on one baseline into
/// distinct lines.
const LINE_BREAK_GAP_EMS: f32 = 4.0;

#[derive(Debug)]
struct TextState {
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    font: Vec<u8>,
    font_size: f32,
    in_text: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
            font: Vec::new(),
            font_size: 12.0,
            in_text: false,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Origin, extent and effective size of `advance` ems shown at the
    /// current position.
    fn placement(&self, advance: f32) -> (f32, f32, f32, f32) {
        let m = self.text_matrix.then(&self.ctm);
        let (x, y) = m.origin();
        let width = advance * self.font_size * m.horizontal_scale();
        (x, y, width, self.font_size * m.vertical_scale())
    }

    /// Move the pen past shown text.
    fn advance(&mut self, advance: f32) {
        self.text_matrix = Matrix::translation(advance * self.font_size, 0.0).then(&self.text_matrix);
    }
}

/// Interpret content stream operations into positioned spans.
pub(crate) fn interpret(ops: &[Operation], fonts: &impl FontResolver) -> Vec<PositionedSpan> {
    let mut state = TextState::default();
    let mut spans = Vec::new();

    for op in ops {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => state.ctm_stack.push(state.ctm),
            "Q" => {
                if let Some(ctm) = state.ctm_stack.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operand(operands) {
                    state.ctm = m.then(&state.ctm);
                }
            }
            "BT" => {
                state.in_text = true;
                state.text_matrix = Matrix::IDENTITY;
                state.line_matrix = Matrix::IDENTITY;
            }
            "ET" => state.in_text = false,
            "Tf" => {
                if let [Object::Name(name), size, ..] = operands.as_slice() {
                    state.font = name.clone();
                    state.font_size = number(size).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    state.leading = leading;
                }
            }
            "Td" | "TD" => {
                if let [tx, ty, ..] = operands.as_slice() {
                    let tx = number(tx).unwrap_or(0.0);
                    let ty = number(ty).unwrap_or(0.0);
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operand(operands) {
                    state.text_matrix = m;
                    state.line_matrix = m;
                }
            }
            "T*" => state.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let (text, advance) = decode_string(bytes, &state.font, fonts);
                    show(&mut spans, &mut state, fonts, text, advance);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let (text, advance) = decode_tj_array(items, &state.font, fonts);
                    show(&mut spans, &mut state, fonts, text, advance);
                }
            }
            "'" | "\"" => {
                state.next_line();
                let idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(idx) {
                    let (text, advance) = decode_string(bytes, &state.font, fonts);
                    show(&mut spans, &mut state, fonts, text, advance);
                }
            }
            _ => {}
        }
    }

    spans
}

/// Record shown text as a span and move the pen past it.
fn show(
    spans: &mut Vec<PositionedSpan>,
    state: &mut TextState,
    fonts: &impl FontResolver,
    text: String,
    advance: f32,
) {
    if state.in_text && !text.trim().is_empty() {
        let (x, y, width, font_size) = state.placement(advance);
        spans.push(PositionedSpan {
            text: text.nfkc().collect(),
            x,
            y,
            width,
            font_size: sanitize_size(font_size),
            style_flags: fonts.style(&state.font),
        });
    }
    state.advance(advance);
}

/// Decode one string operand, with its advance in ems.
fn decode_string(bytes: &[u8], font: &[u8], fonts: &impl FontResolver) -> (String, f32) {
    let text = fonts.decode(font, bytes);
    let advance = fonts
        .advance(font, bytes)
        .unwrap_or_else(|| text.chars().count() as f32 * ESTIMATED_GLYPH_EM);
    (text, advance)
}

/// Concatenate a TJ array, turning large negative kerning into spaces.
fn decode_tj_array(items: &[Object], font: &[u8], fonts: &impl FontResolver) -> (String, f32) {
    let mut combined = String::new();
    let mut advance = 0.0;
    for item in items {
        match item {
            Object::String(bytes, _) => {
                let (text, width) = decode_string(bytes, font, fonts);
                combined.push_str(&text);
                advance += width;
            }
            other => {
                let Some(adjustment) = number(other) else {
                    continue;
                };
                advance -= adjustment / 1000.0;
                if -adjustment > TJ_SPACE_THRESHOLD && needs_space_after(&combined) {
                    combined.push(' ');
                }
            }
        }
    }
    (combined, advance)
}

fn needs_space_after(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Group spans into visual lines.
///
/// Columns are read one after another. Within a column, spans whose
/// baselines lie within 30% of the font size of the line's first span join
/// that line, unless a wide horizontal gap separates them.
pub(crate) fn group_into_lines(spans: Vec<PositionedSpan>) -> Vec<SourceLine> {
    let columns = detect_columns(&spans);
    log::debug!("Detected {} columns", columns.len());

    let mut column_spans: Vec<Vec<PositionedSpan>> = columns.iter().map(|_| Vec::new()).collect();
    for span in spans {
        let idx = columns
            .iter()
            .position(|c| c.contains_span(&span))
            .unwrap_or(0);
        column_spans[idx].push(span);
    }

    column_spans.into_iter().flat_map(group_column).collect()
}

fn group_column(mut spans: Vec<PositionedSpan>) -> Vec<SourceLine> {
    // PDF y grows upwards; stable sort keeps content order for ties.
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<PositionedSpan>> = Vec::new();
    for span in spans {
        match lines.last_mut() {
            Some(line) if (line[0].y - span.y).abs() <= line[0].font_size.max(span.font_size) * 0.3 => {
                line.push(span)
            }
            _ => lines.push(vec![span]),
        }
    }

    lines
        .into_iter()
        .flat_map(split_at_gaps)
        .map(merge_line)
        .collect()
}

/// Split one baseline into runs separated by more than [`LINE_BREAK_GAP_EMS`].
fn split_at_gaps(mut spans: Vec<PositionedSpan>) -> Vec<Vec<PositionedSpan>> {
    spans.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut segments: Vec<Vec<PositionedSpan>> = Vec::new();
    for span in spans {
        let joins = segments
            .last()
            .and_then(|segment| segment.last())
            .map_or(false, |prev| {
                let gap = span.x - (prev.x + prev.width);
                gap <= prev.font_size.max(span.font_size) * LINE_BREAK_GAP_EMS
            });
        match segments.last_mut() {
            Some(segment) if joins => segment.push(span),
            _ => segments.push(vec![span]),
        }
    }
    segments
}

/// Merge x-sorted spans of one line, inserting word spaces at visible gaps
/// and joining neighbours that share size and style.
fn merge_line(spans: Vec<PositionedSpan>) -> SourceLine {
    let mut line: SourceLine = Vec::with_capacity(spans.len());
    let mut prev_end: Option<(f32, char)> = None;

    for span in spans {
        let mut text = span.text;
        if let (Some((end, last)), Some(first)) = (prev_end, text.chars().next()) {
            let gap = span.x - end;
            let spaced = last.is_whitespace() || first.is_whitespace();
            let cjk = is_spaceless_script_char(last) && is_spaceless_script_char(first);
            if gap > span.font_size * 0.15 && !spaced && !cjk {
                text.insert(0, ' ');
            }
        }
        prev_end = text.chars().last().map(|c| (span.x + span.width, c));

        match line.last_mut() {
            Some(prev)
                if prev.font_size == span.font_size && prev.style_flags == span.style_flags =>
            {
                prev.text.push_str(&text)
            }
            _ => line.push(StyledSpan {
                text,
                font_size: span.font_size,
                style_flags: span.style_flags,
            }),
        }
    }

    line
}

fn matrix_operand(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = [0.0f32; 6];
    for (slot, obj) in m.iter_mut().zip(operands) {
        *slot = number(obj)?;
    }
    Some(Matrix(m))
}

pub(crate) fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Characters from scripts written without word spaces (Chinese, Japanese).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x30FF
        | 0x3000..=0x303F)
}

/// Fallback decoding when a font's encoding is unavailable.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
