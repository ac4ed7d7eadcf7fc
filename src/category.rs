//! The fixed classification taxonomy.
//!
//! Categories render in enumeration order. Scoring consults
//! [`Category::SCORED`] in the same order, and that order decides ties.

use std::fmt;
use std::str::FromStr;

use crate::error::OrganizeError;

/// One label from the closed set of document categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Programming,
    AI,
    Math,
    Database,
    Security,
    /// Sink for documents that match no keyword. Never scored.
    Other,
}

impl Category {
    /// Every category, in report order.
    pub const ALL: [Category; 6] = [
        Category::Programming,
        Category::AI,
        Category::Math,
        Category::Database,
        Category::Security,
        Category::Other,
    ];

    /// Scoring candidates in tie-break priority order. The earliest entry
    /// wins when two categories share the top score.
    pub const SCORED: [Category; 5] = [
        Category::Programming,
        Category::AI,
        Category::Math,
        Category::Database,
        Category::Security,
    ];

    /// Name used in reports, destination folders, and JSON keys.
    pub fn name(self) -> &'static str {
        match self {
            Category::Programming => "Programming",
            Category::AI => "AI",
            Category::Math => "Math",
            Category::Database => "Database",
            Category::Security => "Security",
            Category::Other => "Other",
        }
    }

    /// Position in [`Category::ALL`], used to index per-category arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = OrganizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| OrganizeError::UnknownCategory(s.to_string()))
    }
}
