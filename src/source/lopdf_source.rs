//! [`DocumentSource`] backed by `lopdf`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::content::{decode_text_simple, group_into_lines, interpret, number, FontResolver};
use super::DocumentSource;
use crate::detect::{sniff_file, sniff_version};
use crate::error::{Error, Result};
use crate::model::{
    SourceLine, StyleFlags, FLAG_BOLD, FLAG_ITALIC, FLAG_MONOSPACED, FLAG_SERIFED,
};

/// A PDF document opened with `lopdf`.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        sniff_file(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Open a PDF held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        sniff_version(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        if doc.is_encrypted() {
            log::debug!("Document is encrypted; text may not decode");
        }
        let pages = doc.get_pages();
        Self { doc, pages }
    }

    /// PDF version from the document header.
    pub fn pdf_version(&self) -> String {
        self.doc.version.to_string()
    }

    fn info_dictionary(&self) -> Option<&Dictionary> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        resolve_dict(&self.doc, info)
    }
}

impl DocumentSource for LopdfSource {
    fn metadata_title(&self) -> Option<String> {
        self.info_dictionary()
            .and_then(|info| info.get(b"Title").ok())
            .and_then(pdf_string)
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page: u32) -> Result<Vec<SourceLine>> {
        let page_id = *self
            .pages
            .get(&page)
            .ok_or(Error::PageOutOfRange(page, self.page_count()))?;

        let fonts = PageFonts::load(&self.doc, page_id)?;
        let data = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))?;
        let content = Content::decode(&data)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))?;

        let spans = interpret(&content.operations, &fonts);
        log::debug!("Page {}: {} text spans", page, spans.len());
        Ok(group_into_lines(spans))
    }
}

/// Font resources of a single page.
struct PageFonts<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    styles: HashMap<Vec<u8>, StyleFlags>,
    widths: HashMap<Vec<u8>, GlyphWidths>,
}

impl<'a> PageFonts<'a> {
    fn load(doc: &'a LopdfDocument, page_id: ObjectId) -> Result<Self> {
        let fonts = doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let styles = fonts
            .iter()
            .map(|(name, dict)| (name.clone(), font_style(doc, dict)))
            .collect();
        let widths = fonts
            .iter()
            .filter_map(|(name, dict)| Some((name.clone(), glyph_widths(doc, dict)?)))
            .collect();
        Ok(Self {
            doc,
            fonts,
            styles,
            widths,
        })
    }
}

impl FontResolver for PageFonts<'_> {
    fn decode(&self, font: &[u8], bytes: &[u8]) -> String {
        if let Some(dict) = self.fonts.get(font) {
            if let Ok(encoding) = dict.get_font_encoding(self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn style(&self, font: &[u8]) -> StyleFlags {
        self.styles.get(font).copied().unwrap_or(0)
    }

    fn advance(&self, font: &[u8], bytes: &[u8]) -> Option<f32> {
        self.widths.get(font).map(|w| w.advance(bytes))
    }
}

/// Glyph widths of a simple font, in thousandths of an em.
#[derive(Debug, Clone, PartialEq)]
struct GlyphWidths {
    first_char: i64,
    widths: Vec<f32>,
    missing: f32,
}

impl GlyphWidths {
    /// Advance of single-byte codes, in ems.
    fn advance(&self, bytes: &[u8]) -> f32 {
        bytes
            .iter()
            .map(|&code| {
                usize::try_from(i64::from(code) - self.first_char)
                    .ok()
                    .and_then(|idx| self.widths.get(idx).copied())
                    .unwrap_or(self.missing)
            })
            .sum::<f32>()
            / 1000.0
    }
}

/// Width table of a simple font; composite and standard-14 fonts have none.
fn glyph_widths(doc: &LopdfDocument, font: &Dictionary) -> Option<GlyphWidths> {
    if let Ok(Object::Name(subtype)) = font.get(b"Subtype") {
        if subtype.as_slice() == b"Type0" {
            return None;
        }
    }
    let first_char = font.get(b"FirstChar").ok()?.as_i64().ok()?;
    let widths = match font.get(b"Widths").ok()? {
        Object::Reference(r) => doc.get_object(*r).ok()?.as_array().ok()?,
        other => other.as_array().ok()?,
    };
    let missing = font_descriptor(doc, font)
        .and_then(|d| d.get(b"MissingWidth").ok())
        .and_then(number)
        .unwrap_or(500.0);

    Some(GlyphWidths {
        first_char,
        widths: widths.iter().map(|w| number(w).unwrap_or(missing)).collect(),
        missing,
    })
}

// FontDescriptor /Flags bits (PDF 32000-1, table 123)
const DESCRIPTOR_FIXED_PITCH: i64 = 1;
const DESCRIPTOR_SERIF: i64 = 1 << 1;
const DESCRIPTOR_ITALIC: i64 = 1 << 6;
const DESCRIPTOR_FORCE_BOLD: i64 = 1 << 18;

/// Derive style bits from a font dictionary.
fn font_style(doc: &LopdfDocument, font: &Dictionary) -> StyleFlags {
    let mut flags = font
        .get(b"BaseFont")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(|name| style_from_name(&String::from_utf8_lossy(name)))
        .unwrap_or(0);

    if let Some(descriptor) = font_descriptor(doc, font) {
        let bits = descriptor
            .get(b"Flags")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);
        if bits & DESCRIPTOR_FIXED_PITCH != 0 {
            flags |= FLAG_MONOSPACED;
        }
        if bits & DESCRIPTOR_SERIF != 0 {
            flags |= FLAG_SERIFED;
        }
        if bits & DESCRIPTOR_ITALIC != 0 {
            flags |= FLAG_ITALIC;
        }
        if bits & DESCRIPTOR_FORCE_BOLD != 0 {
            flags |= FLAG_BOLD;
        }

        let weight = descriptor
            .get(b"FontWeight")
            .ok()
            .and_then(number)
            .unwrap_or(0.0);
        if weight >= 600.0 {
            flags |= FLAG_BOLD;
        }
    }

    flags
}

/// The font's descriptor, looking through Type0 descendants.
fn font_descriptor<'a>(doc: &'a LopdfDocument, font: &'a Dictionary) -> Option<&'a Dictionary> {
    if let Some(descriptor) = font
        .get(b"FontDescriptor")
        .ok()
        .and_then(|o| resolve_dict(doc, o))
    {
        return Some(descriptor);
    }

    let descendants = match font.get(b"DescendantFonts").ok()? {
        Object::Reference(r) => doc.get_object(*r).ok()?.as_array().ok()?,
        other => other.as_array().ok()?,
    };
    let descendant = resolve_dict(doc, descendants.first()?)?;
    descendant
        .get(b"FontDescriptor")
        .ok()
        .and_then(|o| resolve_dict(doc, o))
}

/// Style bits implied by a PostScript font name such as `ABCDEF+Arial-BoldMT`.
fn style_from_name(base_font: &str) -> StyleFlags {
    let name = base_font
        .split_once('+')
        .map_or(base_font, |(_, rest)| rest)
        .to_lowercase();

    let mut flags = 0;
    if ["bold", "black", "heavy", "semibold", "demi"]
        .iter()
        .any(|k| name.contains(k))
    {
        flags |= FLAG_BOLD;
    }
    if name.contains("italic") || name.contains("oblique") {
        flags |= FLAG_ITALIC;
    }
    if ["mono", "courier", "consol"].iter().any(|k| name.contains(k)) {
        flags |= FLAG_MONOSPACED;
    }
    if (name.contains("times") || name.contains("serif")) && !name.contains("sans") {
        flags |= FLAG_SERIFED;
    }
    flags
}

fn resolve_dict<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(r) => doc.get_dictionary(*r).ok(),
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8 or PDFDocEncoding).
fn pdf_string(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}
