//! Error types for pdfoutline.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting an outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a document or writing its outline.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as a PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header names a version we do not accept.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF container could not be parsed.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Text could not be extracted from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Serializing the outline failed.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Processing a document took longer than the configured budget.
    #[error("Processing exceeded the time budget of {0:?}")]
    Timeout(Duration),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error means the document itself could not be opened.
    ///
    /// Such failures are never retried; batch callers skip the document.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            Error::UnknownFormat
                | Error::UnsupportedVersion(_)
                | Error::PdfParse(_)
                | Error::Encrypted
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageOutOfRange(60, 12);
        assert_eq!(
            err.to_string(),
            "Page 60 is out of range (document has 12 pages)"
        );

        let err = Error::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Processing exceeded the time budget of 10s");
    }

    #[test]
    fn test_source_failure_classification() {
        assert!(Error::UnknownFormat.is_source_failure());
        assert!(Error::Encrypted.is_source_failure());
        assert!(Error::PdfParse("bad xref".into()).is_source_failure());
        assert!(!Error::Render("x".into()).is_source_failure());
        assert!(!Error::Timeout(Duration::from_secs(1)).is_source_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
