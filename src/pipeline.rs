//! One organize run, start to finish.
//!
//! 1. Check that the source and report directories exist.
//! 2. Load the keyword map, and the ground truth when correctness is on.
//! 3. Discover documents. None found is fatal, before anything is created.
//! 4. Create the category folders and dispatch the workers.
//! 5. Aggregate once every worker is done, then write the report.
//!
//! Every configuration problem surfaces before step 4, so a bad setup never
//! leaves category folders or a report behind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::aggregate::{aggregate, AssignmentsTracker};
use crate::category::Category;
use crate::config::Config;
use crate::discover::scan_documents;
use crate::error::OrganizeError;
use crate::extract::{DocumentParser, PdfParser};
use crate::keywords::{load_ground_truth, load_keywords};
use crate::organize::Organizer;
use crate::progress::ProgressMode;
use crate::relocate::{category_dir, FsRelocator, Relocator};
use crate::report::{generate, write_report, Report};
use crate::scorer::CategoryScorer;

/// Everything a run needs, resolved from config and command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source_dir: PathBuf,
    pub report_dir: PathBuf,
    pub correctness: bool,
    pub keywords_path: PathBuf,
    pub ground_truth_path: PathBuf,
    pub destination_root: PathBuf,
    pub include_globs: Vec<String>,
    pub report_file: String,
    pub max_concurrent: usize,
    pub progress: ProgressMode,
}

impl RunOptions {
    /// Options taken from `config`, with the destination root defaulting to
    /// the source directory.
    pub fn from_config(
        config: &Config,
        source_dir: impl Into<PathBuf>,
        report_dir: impl Into<PathBuf>,
        correctness: bool,
    ) -> Self {
        let source_dir = source_dir.into();
        let destination_root = config
            .organizer
            .destination_root
            .clone()
            .unwrap_or_else(|| source_dir.clone());
        Self {
            report_dir: report_dir.into(),
            correctness,
            keywords_path: config.data.keywords.clone(),
            ground_truth_path: config.data.ground_truth.clone(),
            destination_root,
            include_globs: config.organizer.include_globs.clone(),
            report_file: config.organizer.report_file.clone(),
            max_concurrent: config.organizer.max_concurrent_documents,
            progress: ProgressMode::Off,
            source_dir,
        }
    }
}

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub discovered: usize,
    pub destination_root: PathBuf,
    pub tracker: AssignmentsTracker,
    pub report: Report,
    pub report_path: PathBuf,
}

impl RunSummary {
    /// `Err(RelocationFailed)` when some documents stayed where they were.
    pub fn check_relocations(&self) -> Result<(), OrganizeError> {
        let failures = self.tracker.failures();
        if failures.is_empty() {
            return Ok(());
        }
        Err(OrganizeError::RelocationFailed(
            failures.iter().map(|f| f.document.display_name()).collect(),
        ))
    }

    /// Human-readable summary for stdout.
    pub fn print(&self) {
        println!("organize {}", self.destination_root.display());
        println!("  documents found: {}", self.discovered);
        println!("  relocated: {}", self.tracker.classified());
        for category in Category::ALL {
            let count = self.tracker.count(category);
            if count > 0 {
                println!(
                    "  {} -> {} ({})",
                    category,
                    category_dir(&self.destination_root, category).display(),
                    count
                );
            }
        }
        for failure in self.tracker.failures() {
            println!(
                "  failed: {} ({}): {}",
                failure.document.display_name(),
                failure.category,
                failure.reason
            );
        }
        if let Some(score) = self.report.correctness {
            println!("  correctness: {}%", score);
        }
        println!("  report: {}", self.report_path.display());
    }
}

/// Runs with the PDF parser and the real filesystem.
pub async fn run_organize(opts: &RunOptions) -> Result<RunSummary> {
    run_organize_with(opts, Arc::new(PdfParser), Arc::new(FsRelocator)).await
}

/// Runs with injected collaborators.
pub async fn run_organize_with(
    opts: &RunOptions,
    parser: Arc<dyn DocumentParser>,
    relocator: Arc<dyn Relocator>,
) -> Result<RunSummary> {
    require_dir("Source", &opts.source_dir)?;
    require_dir("Report", &opts.report_dir)?;

    let keywords = load_keywords(&opts.keywords_path)?;
    let ground_truth = if opts.correctness {
        Some(load_ground_truth(&opts.ground_truth_path)?)
    } else {
        None
    };
    let scorer = CategoryScorer::new(&keywords)?;

    let documents = scan_documents(&opts.source_dir, &opts.include_globs)?;
    if documents.is_empty() {
        return Err(OrganizeError::NoDocuments.into());
    }
    let discovered = documents.len();
    info!(
        source = %opts.source_dir.display(),
        documents = discovered,
        max_concurrent = opts.max_concurrent,
        "dispatching"
    );

    let organizer = Organizer::new(scorer, opts.destination_root.clone())
        .with_parser(parser)
        .with_relocator(relocator)
        .with_max_concurrent(opts.max_concurrent)
        .with_progress(opts.progress.reporter());
    organizer.prepare().await?;
    let outcomes = organizer.run(documents).await?;

    let tracker = aggregate(outcomes);
    if tracker.classified() == 0 {
        warn!("no document could be relocated; skipping report");
        return Err(OrganizeError::RelocationFailed(
            tracker
                .failures()
                .iter()
                .map(|f| f.document.display_name())
                .collect(),
        )
        .into());
    }

    let report = generate(tracker.classified(), &tracker, ground_truth.as_ref())?;
    let report_path = write_report(&opts.report_dir, &opts.report_file, &report)?;
    info!(path = %report_path.display(), "report written");

    Ok(RunSummary {
        discovered,
        destination_root: opts.destination_root.clone(),
        tracker,
        report,
        report_path,
    })
}

fn require_dir(role: &'static str, path: &Path) -> Result<(), OrganizeError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(OrganizeError::NotADirectory {
            role,
            path: path.to_path_buf(),
        })
    }
}
