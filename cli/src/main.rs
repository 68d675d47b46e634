//! pdfoutline CLI - heading outline extraction for PDF files

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{BatchOptions, BatchProcessor, BatchReport, DocumentStatus};
use pdfoutline::outline::{classify, collect_lines, FontProfile};
use pdfoutline::render::{to_json, JsonDirSink};
use pdfoutline::source::{DocumentSource, LopdfSource};
use pdfoutline::{ExtractOptions, JsonFormat, OutlineExtractor};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Infer title and H1-H3 outline of PDF files as JSON", long_about = None)]
struct Cli {
    /// Directory of PDF files to process
    #[arg(value_name = "INPUT", env = "OUTLINE_INPUT_DIR", default_value = "/app/input")]
    input: PathBuf,

    /// Directory receiving one JSON file per PDF
    #[arg(value_name = "OUTPUT", env = "OUTLINE_OUTPUT_DIR", default_value = "/app/output")]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Derive the title from page 1 even if metadata has one
        #[arg(long)]
        no_metadata_title: bool,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory of PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process one file at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Per-document time budget in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Show font statistics and per-line heading decisions
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only list lines classified as headings
        #[arg(long)]
        headings_only: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            no_metadata_title,
        }) => cmd_extract(&input, output.as_deref(), compact, no_metadata_title),
        Some(Commands::Batch {
            input,
            output,
            sequential,
            compact,
            timeout,
        }) => {
            let mut options = BatchOptions::new().with_format(json_format(compact));
            if sequential {
                options = options.sequential();
            }
            if let Some(secs) = timeout {
                options = options.with_time_budget(Duration::from_secs(secs));
            }
            cmd_batch(&input, &output, options)
        }
        Some(Commands::Inspect {
            input,
            headings_only,
        }) => cmd_inspect(&input, headings_only),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input, &cli.output, BatchOptions::default()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    no_metadata_title: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ExtractOptions::new();
    if no_metadata_title {
        options = options.ignore_metadata_title();
    }

    let source = LopdfSource::open(input)?;
    let outline = OutlineExtractor::with_options(options).extract(&source)?;
    let json = to_json(&outline, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: BatchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = pdfoutline::batch::discover_pdfs(input)?.len();
    log::debug!("{} PDF files in {}", total, input.display());
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let sink = JsonDirSink::new(output).with_format(options.format);
    let processor = BatchProcessor::new(options);
    let report = processor.run_with_progress(input, &sink, |doc| {
        if let Some(name) = doc.input.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &BatchReport) {
    println!("{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for doc in &report.documents {
        let name = doc.input.display();
        match &doc.status {
            DocumentStatus::Written(path) => {
                println!("  {} {} {} {}", "✓".green(), name, "→".dimmed(), path.display())
            }
            DocumentStatus::Failed(reason) => {
                println!("  {} {} {}", "✗".red(), name, reason.red())
            }
            DocumentStatus::TimedOut(budget) => println!(
                "  {} {} {}",
                "⏱".yellow(),
                name,
                format!("over the {:?} time budget", budget).yellow()
            ),
        }
    }

    println!();
    println!(
        "{} {}/{} written, {} failed, {} timed out in {:.2?}",
        "Done!".green().bold(),
        report.written(),
        report.total(),
        report.failures().count(),
        report.timeouts().count(),
        report.elapsed
    );
}

fn cmd_inspect(input: &Path, headings_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = LopdfSource::open(input)?;
    let options = ExtractOptions::new().lenient();
    let collected = collect_lines(&source, &options)?;
    let profile = FontProfile::compute(&collected.lines);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.pdf_version());
    println!(
        "{}: {} ({} analyzed)",
        "Pages".bold(),
        source.page_count(),
        collected.pages_analyzed
    );
    if let Some(title) = source.metadata_title() {
        println!("{}: {}", "Metadata title".bold(), title);
    }

    println!();
    println!("{}", "Font Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Lines".bold(), collected.lines.len());
    println!("{}: {:.2}", "Average size".bold(), profile.average_size);
    println!("{}: {:.2}", "Common size".bold(), profile.common_size);
    println!("{}: {:.2}", "Heading threshold".bold(), profile.heading_threshold());

    println!();
    println!("{}", "Lines".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for line in &collected.lines {
        let verdict = classify(line, &profile);
        if headings_only && !verdict.is_heading() {
            continue;
        }
        let label = if verdict.is_heading() {
            verdict.to_string().green()
        } else {
            verdict.to_string().dimmed()
        };
        println!(
            "{:>3} {:>6.2} {:>3} {} {}",
            line.page,
            line.font_size,
            line.style_flags,
            label,
            line.text
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
}
