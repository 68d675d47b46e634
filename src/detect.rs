//! PDF header sniffing.
//!
//! Documents are checked before they are handed to the PDF backend so that
//! obviously wrong inputs (HTML pages saved as `.pdf`, truncated downloads)
//! fail fast with [`Error::UnknownFormat`] instead of a backend parse error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Readers tolerate junk before the header as long as it appears
/// within the first kilobyte.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Sniff the PDF version (e.g. `"1.7"`) from the start of a document.
pub fn sniff_version(data: &[u8]) -> Result<String> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let start = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version = data
        .get(start + PDF_MAGIC.len()..start + PDF_MAGIC.len() + 3)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version).to_string();

    match version.as_bytes() {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(version),
        _ => Err(Error::UnsupportedVersion(version)),
    }
}

/// Sniff the PDF version of a file, reading only its header window.
pub fn sniff_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(HEADER_SEARCH_WINDOW);
    File::open(path)?
        .take(HEADER_SEARCH_WINDOW as u64)
        .read_to_end(&mut header)?;
    sniff_version(&header)
}

/// Check whether a byte slice starts like a PDF document.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    sniff_version(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_plain_header() {
        assert_eq!(sniff_version(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap(), "1.7");
        assert_eq!(sniff_version(b"%PDF-2.0\n").unwrap(), "2.0");
    }

    #[test]
    fn test_sniff_header_after_junk() {
        let mut data = b"\xef\xbb\xbfgarbage\r\n".to_vec();
        data.extend_from_slice(b"%PDF-1.4\n");
        assert_eq!(sniff_version(&data).unwrap(), "1.4");
    }

    #[test]
    fn test_sniff_rejects_other_formats() {
        assert!(matches!(
            sniff_version(b"<!DOCTYPE html><html></html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(sniff_version(b""), Err(Error::UnknownFormat)));
        assert!(matches!(sniff_version(b"%PDF-1"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_sniff_rejects_malformed_version() {
        assert!(matches!(
            sniff_version(b"%PDF-x.y\n"),
            Err(Error::UnsupportedVersion(v)) if v == "x.y"
        ));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }
}
