//! # PDF Organizer CLI (`pdforganizer`)
//!
//! Classifies every PDF in a directory into Programming, AI, Math, Database,
//! Security or Other, moves each one into a folder named after its category,
//! and writes an analysis report.
//!
//! ## Usage
//!
//! ```bash
//! pdforganizer <SOURCE_DIR> <REPORT_DIR> [--correctness]
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Organize ./inbox, report into ./reports/report.txt
//! pdforganizer ./inbox ./reports
//!
//! # Also score against known labels
//! pdforganizer ./inbox ./reports --correctness --ground-truth ./labels.json
//!
//! # Custom keyword list, four documents at a time
//! pdforganizer ./inbox ./reports --keywords ./keywords.json --max-concurrent 4
//! ```

use clap::Parser;
use std::path::PathBuf;

use pdf_organizer::config;
use pdf_organizer::logging;
use pdf_organizer::pipeline::{run_organize, RunOptions};
use pdf_organizer::progress::ProgressMode;

/// PDF Organizer: sort PDFs into topic folders by keyword evidence.
#[derive(Parser)]
#[command(
    name = "pdforganizer",
    about = "Sort PDF documents into topic folders by keyword evidence",
    version,
    long_about = "Scores each PDF's file name, metadata and first page against per-category \
    keyword lists, moves it into a folder named after the winning category, and writes an \
    analysis report with the share of documents per category."
)]
struct Cli {
    /// Directory holding the PDFs to organize. Category folders are created here.
    source_dir: PathBuf,

    /// Directory the report file is written to.
    report_dir: PathBuf,

    /// Append a correctness score computed against the ground-truth labels.
    #[arg(long)]
    correctness: bool,

    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/pdforganizer.toml`, which is optional. A path
    /// given explicitly must exist.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keyword map (JSON), overriding `[data].keywords`.
    #[arg(long)]
    keywords: Option<PathBuf>,

    /// Ground-truth labels (JSON), overriding `[data].ground_truth`.
    #[arg(long)]
    ground_truth: Option<PathBuf>,

    /// Maximum number of documents processed at the same time.
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Progress output on stderr: `off`, `human`, or `json`.
    /// Defaults to `human` when stderr is a terminal, `off` otherwise.
    #[arg(long, value_enum)]
    progress: Option<ProgressMode>,

    /// Log debug details (per-document scores) to stderr.
    #[arg(long, short)]
    verbose: bool,
}

const DEFAULT_CONFIG: &str = "./config/pdforganizer.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = match &cli.config {
        Some(path) => config::load_or_default(path, true)?,
        None => config::load_or_default(&PathBuf::from(DEFAULT_CONFIG), false)?,
    };

    let mut opts = RunOptions::from_config(&cfg, &cli.source_dir, &cli.report_dir, cli.correctness);
    if let Some(path) = cli.keywords {
        opts.keywords_path = path;
    }
    if let Some(path) = cli.ground_truth {
        opts.ground_truth_path = path;
    }
    if let Some(n) = cli.max_concurrent {
        if n == 0 {
            anyhow::bail!("--max-concurrent must be >= 1");
        }
        opts.max_concurrent = n;
    }
    opts.progress = cli.progress.unwrap_or_else(ProgressMode::default_for_tty);

    let summary = run_organize(&opts).await?;
    summary.print();
    summary.check_relocations()?;
    println!("ok");
    Ok(())
}
