//! Destinations for finished outlines.

use std::fs;
use std::path::{Path, PathBuf};

use super::json::{to_json, JsonFormat};
use crate::error::{Error, Result};
use crate::model::Outline;

/// Receives one outline per processed document.
pub trait OutlineSink: Sync {
    /// Persist the outline extracted from `input`, returning where it went.
    fn write(&self, input: &Path, outline: &Outline) -> Result<PathBuf>;
}

/// Writes `<stem>.json` files into a directory.
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
    format: JsonFormat,
}

impl JsonDirSink {
    /// Create a sink writing pretty JSON into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            format: JsonFormat::default(),
        }
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the outline for `input` is written to.
    pub fn output_path(&self, input: &Path) -> Result<PathBuf> {
        let stem = input
            .file_stem()
            .ok_or_else(|| Error::Other(format!("No file name in {}", input.display())))?;
        let mut name = stem.to_os_string();
        name.push(".json");
        Ok(self.dir.join(name))
    }
}

impl OutlineSink for JsonDirSink {
    fn write(&self, input: &Path, outline: &Outline) -> Result<PathBuf> {
        let path = self.output_path(input)?;
        let json = to_json(outline, self.format)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, json)?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }
}
