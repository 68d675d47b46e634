//! Extraction options.

/// Options for extracting an outline from one document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How page-level extraction failures are handled
    pub error_mode: ErrorMode,

    /// Whether the metadata title is preferred over page 1 text
    pub use_metadata_title: bool,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip pages whose text cannot be extracted.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Always derive the title from page 1.
    pub fn ignore_metadata_title(mut self) -> Self {
        self.use_metadata_title = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            use_metadata_title: true,
        }
    }
}

/// Error handling mode for page extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on any page error
    #[default]
    Strict,
    /// Log and skip pages that fail
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.use_metadata_title);
    }

    #[test]
    fn test_options_builder() {
        let options = ExtractOptions::new().lenient().ignore_metadata_title();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.use_metadata_title);

        let options = options.with_error_mode(ErrorMode::Strict);
        assert_eq!(options.error_mode, ErrorMode::Strict);
    }
}
