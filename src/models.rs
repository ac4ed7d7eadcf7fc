//! Core data models used throughout the organizer.
//!
//! These types represent the documents and outcomes that flow from discovery
//! through classification into aggregation.

use std::path::{Path, PathBuf};

use crate::category::Category;

/// One input file. The stem is its identity within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    pub path: PathBuf,
    pub stem: String,
}

impl DocumentHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { path, stem }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown in logs and failure lists.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.stem.clone())
    }
}

/// A classification outcome: which category a document landed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Assignment {
    pub stem: String,
    pub category: Category,
}

impl Assignment {
    pub fn new(stem: impl Into<String>, category: Category) -> Self {
        Self {
            stem: stem.into(),
            category,
        }
    }
}

/// A document that was classified but could not be moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationFailure {
    pub document: DocumentHandle,
    pub category: Category,
    pub reason: String,
}

/// What a single worker reports back to the dispatcher.
pub type WorkerOutcome = Result<Assignment, RelocationFailure>;
