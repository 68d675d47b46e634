//! Directory batch processing.
//!
//! [`BatchProcessor`] turns every PDF in a directory into one outline
//! written through an [`OutlineSink`]. Documents are independent: a failure
//! or timeout on one is recorded in the [`BatchReport`] and the rest carry on.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::Outline;
use crate::outline::{ExtractOptions, OutlineExtractor};
use crate::render::{JsonDirSink, JsonFormat, OutlineSink};
use crate::source::LopdfSource;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,

    /// JSON format used by [`BatchProcessor::run_to_dir`]
    pub format: JsonFormat,

    /// Per-document wall-clock budget; slower results are discarded
    pub time_budget: Option<Duration>,

    /// Options for each document
    pub extract: ExtractOptions,
}

impl BatchOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one document at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the per-document time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Set the per-document extraction options.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Pretty,
            time_budget: None,
            extract: ExtractOptions::default(),
        }
    }
}

/// What happened to one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Outline written to the given path
    Written(PathBuf),
    /// Extraction or writing failed, or the worker panicked
    Failed(String),
    /// Extraction finished after the given time budget; nothing was written
    TimedOut(Duration),
}

/// Outcome for one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub input: PathBuf,
    pub status: DocumentStatus,
}

impl DocumentReport {
    /// Whether an outline was written.
    pub fn is_success(&self) -> bool {
        matches!(self.status, DocumentStatus::Written(_))
    }
}

/// Outcome of a whole batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of documents seen.
    pub fn total(&self) -> usize {
        self.documents.len()
    }

    /// Number of outlines written.
    pub fn written(&self) -> usize {
        self.documents.iter().filter(|d| d.is_success()).count()
    }

    /// Documents that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::Failed(_)))
    }

    /// Documents that ran over the time budget.
    pub fn timeouts(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::TimedOut(_)))
    }
}

/// Runs outline extraction over a directory of PDFs.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    options: BatchOptions,
}

impl BatchProcessor {
    /// Create a processor.
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process `input_dir`, writing `<stem>.json` files into `output_dir`.
    pub fn run_to_dir(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        fs::create_dir_all(output_dir)?;
        let sink = JsonDirSink::new(output_dir).with_format(self.options.format);
        self.run(input_dir, &sink)
    }

    /// Process every PDF in `input_dir` through `sink`.
    pub fn run<K: OutlineSink>(&self, input_dir: &Path, sink: &K) -> Result<BatchReport> {
        self.run_with_progress(input_dir, sink, |_| {})
    }

    /// Like [`run`](Self::run), calling `progress` after each document.
    pub fn run_with_progress<K, F>(
        &self,
        input_dir: &Path,
        sink: &K,
        progress: F,
    ) -> Result<BatchReport>
    where
        K: OutlineSink,
        F: Fn(&DocumentReport) + Sync,
    {
        let started = Instant::now();
        let inputs = discover_pdfs(input_dir)?;
        log::info!(
            "Found {} PDF files in {}",
            inputs.len(),
            input_dir.display()
        );

        let process = |input: &PathBuf| {
            let report = self.process_one(input, sink);
            progress(&report);
            report
        };

        let documents: Vec<DocumentReport> = if self.options.parallel {
            inputs.par_iter().map(process).collect()
        } else {
            inputs.iter().map(process).collect()
        };

        let report = BatchReport {
            documents,
            elapsed: started.elapsed(),
        };
        log::info!(
            "Batch finished: {}/{} written in {:.2?}",
            report.written(),
            report.total(),
            report.elapsed
        );
        Ok(report)
    }

    fn process_one<K: OutlineSink>(&self, input: &Path, sink: &K) -> DocumentReport {
        log::info!("Processing {}", input.display());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<PathBuf> {
            let outline = self.extract(input)?;
            sink.write(input, &outline)
        }));

        let status = match outcome {
            Ok(Ok(path)) => DocumentStatus::Written(path),
            Ok(Err(Error::Timeout(budget))) => {
                log::error!("{}: over the {:?} time budget", input.display(), budget);
                DocumentStatus::TimedOut(budget)
            }
            Ok(Err(e)) => {
                log::error!("{}: {}", input.display(), e);
                DocumentStatus::Failed(e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("{}: panicked: {}", input.display(), message);
                DocumentStatus::Failed(format!("panicked: {message}"))
            }
        };

        DocumentReport {
            input: input.to_path_buf(),
            status,
        }
    }

    /// Extract one document, failing with [`Error::Timeout`] when it took
    /// longer than the budget.
    fn extract(&self, input: &Path) -> Result<Outline> {
        let started = Instant::now();
        let source = LopdfSource::open(input)?;
        let outline =
            OutlineExtractor::with_options(self.options.extract.clone()).extract(&source)?;

        match self.options.time_budget {
            Some(budget) if started.elapsed() > budget => {
                log::debug!("{}: took {:.2?}", input.display(), started.elapsed());
                Err(Error::Timeout(budget))
            }
            _ => Ok(outline),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Files directly inside `dir` with a `pdf` extension (any case), sorted.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
