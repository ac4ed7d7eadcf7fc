//! Typed error conditions that callers and tests match on.
//!
//! Everything else travels as `anyhow::Error` with context attached.

use std::path::PathBuf;

use thiserror::Error;

use crate::category::Category;

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("No PDF files found")]
    NoDocuments,

    #[error("{role} directory does not exist: {}", path.display())]
    NotADirectory { role: &'static str, path: PathBuf },

    #[error("unknown category: '{0}'")]
    UnknownCategory(String),

    #[error("keyword map has no entry for category {0}")]
    MissingCategory(Category),

    #[error("keyword map assigns keywords to Other, which is never scored")]
    KeywordsForOther,

    #[error("keyword map contains an empty keyword for category {0}")]
    EmptyKeyword(Category),

    #[error("classification of {} was interrupted: {reason}", path.display())]
    DispatchInterrupted { path: PathBuf, reason: String },

    #[error("{} document(s) could not be relocated: {}", .0.len(), .0.join(", "))]
    RelocationFailed(Vec<String>),
}
