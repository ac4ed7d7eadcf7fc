//! Category keyword dictionary and ground-truth labels.
//!
//! Both are JSON objects loaded once before dispatch and shared read-only
//! for the rest of the run:
//!
//! ```json
//! { "Programming": ["rust", "python"], "AI": ["ai", "neural"], ... }
//! { "security_audit": "Security", "grocery_list": "Other" }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

use crate::category::Category;
use crate::error::OrganizeError;
use crate::models::Assignment;

/// Ordered keyword lists for every scored category.
#[derive(Debug, Clone)]
pub struct CategoryKeywordMap {
    keywords: [Vec<String>; 5],
}

impl CategoryKeywordMap {
    /// Builds the map from parsed JSON. Every scored category must be
    /// present, `Other` must not be, and keywords must be non-empty.
    pub fn from_raw(raw: BTreeMap<String, Vec<String>>) -> Result<Self, OrganizeError> {
        let mut slots: [Option<Vec<String>>; 5] = Default::default();

        for (name, words) in raw {
            let category: Category = name.parse()?;
            if category == Category::Other {
                return Err(OrganizeError::KeywordsForOther);
            }
            let mut normalized = Vec::with_capacity(words.len());
            for word in words {
                let word = word.trim().to_lowercase();
                if word.is_empty() {
                    return Err(OrganizeError::EmptyKeyword(category));
                }
                normalized.push(word);
            }
            slots[category.index()] = Some(normalized);
        }

        let mut keywords: [Vec<String>; 5] = Default::default();
        for category in Category::SCORED {
            keywords[category.index()] = slots[category.index()]
                .take()
                .ok_or(OrganizeError::MissingCategory(category))?;
        }
        Ok(Self { keywords })
    }

    /// Keywords for `category`; always empty for `Other`.
    pub fn keywords(&self, category: Category) -> &[String] {
        self.keywords
            .get(category.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Scored categories with their keywords, in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::SCORED
            .into_iter()
            .map(move |category| (category, self.keywords(category)))
    }
}

/// Known-good labels keyed by document stem.
#[derive(Debug, Clone, Default)]
pub struct GroundTruth {
    labels: HashMap<String, Category>,
}

impl GroundTruth {
    pub fn from_raw(raw: HashMap<String, String>) -> Result<Self, OrganizeError> {
        let labels = raw
            .into_iter()
            .map(|(stem, name)| name.parse::<Category>().map(|category| (stem, category)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { labels })
    }

    /// The labels as a set of assignments, for set difference against a run.
    pub fn assignments(&self) -> HashSet<Assignment> {
        self.labels
            .iter()
            .map(|(stem, category)| Assignment::new(stem.clone(), *category))
            .collect()
    }
}

pub fn load_keywords(path: &Path) -> Result<CategoryKeywordMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read keyword file: {}", path.display()))?;
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse keyword file: {}", path.display()))?;
    CategoryKeywordMap::from_raw(raw)
        .with_context(|| format!("Invalid keyword file: {}", path.display()))
}

pub fn load_ground_truth(path: &Path) -> Result<GroundTruth> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ground-truth file: {}", path.display()))?;
    let raw: HashMap<String, String> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse ground-truth file: {}", path.display()))?;
    GroundTruth::from_raw(raw)
        .with_context(|| format!("Invalid ground-truth file: {}", path.display()))
}
