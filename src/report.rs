//! Analysis report generation.
//!
//! ```text
//! Analysis Report:
//! ----------------
//! Programming: 50%
//! AI: 25%
//! ...
//!
//! Correctness Score: 75%
//! ```
//!
//! Percentages are `round(part / total * 100)` with ties rounded to even.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::aggregate::AssignmentsTracker;
use crate::category::Category;
use crate::error::OrganizeError;
use crate::keywords::GroundTruth;

pub const DEFAULT_REPORT_FILE: &str = "report.txt";

/// Rendered percentages for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// One entry per category, in enumeration order.
    pub categories: Vec<(Category, u32)>,
    pub correctness: Option<u32>,
}

/// Builds the report for `total_documents` documents. A zero total is
/// rejected instead of dividing by it.
pub fn generate(
    total_documents: usize,
    tracker: &AssignmentsTracker,
    ground_truth: Option<&GroundTruth>,
) -> Result<Report, OrganizeError> {
    if total_documents == 0 {
        return Err(OrganizeError::NoDocuments);
    }

    let categories = Category::ALL
        .into_iter()
        .map(|category| (category, percentage(tracker.count(category), total_documents)))
        .collect();

    let correctness = ground_truth.map(|truth| {
        let expected = truth.assignments();
        let incorrect = tracker.assignments().difference(&expected).count();
        let correct = total_documents.saturating_sub(incorrect);
        percentage(correct, total_documents)
    });

    Ok(Report {
        categories,
        correctness,
    })
}

fn percentage(part: usize, total: usize) -> u32 {
    (part as f64 / total as f64 * 100.0).round_ties_even() as u32
}

impl Report {
    pub fn render(&self) -> String {
        let mut out = String::from("Analysis Report:\n----------------\n");
        for (category, pct) in &self.categories {
            let _ = writeln!(out, "{}: {}%", category, pct);
        }
        if let Some(score) = self.correctness {
            let _ = write!(out, "\nCorrectness Score: {}%\n", score);
        }
        out
    }
}

/// Writes the rendered report to `<dir>/<file_name>` and returns that path.
pub fn write_report(dir: &Path, file_name: &str, report: &Report) -> Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, report.render())
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}
