//! Keyword scoring and category selection.
//!
//! Each keyword compiles to a regex that requires a word boundary or an
//! underscore on both sides, so `ai` counts in `the ai model` and `ai_model`
//! but not in `aiming`. A category's score is the number of non-overlapping
//! matches summed over its keywords. The highest score wins, ties go to the
//! earlier category in [`Category::SCORED`], and an all-zero blob is `Other`.

use anyhow::{Context, Result};
use regex::Regex;

use crate::category::Category;
use crate::keywords::CategoryKeywordMap;

/// Per-category match counts for one blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryScores {
    counts: [usize; 5],
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> usize {
        self.counts.get(category.index()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Strict maximum over [`Category::SCORED`]; first one wins a tie.
    pub fn winner(&self) -> Category {
        let mut best = Category::Other;
        let mut best_score = 0;
        for category in Category::SCORED {
            let score = self.get(category);
            if score > best_score {
                best = category;
                best_score = score;
            }
        }
        best
    }
}

/// Compiled keyword matchers, shared read-only across workers.
#[derive(Debug)]
pub struct CategoryScorer {
    matchers: Vec<(Category, Vec<Regex>)>,
}

impl CategoryScorer {
    pub fn new(keywords: &CategoryKeywordMap) -> Result<Self> {
        let mut matchers = Vec::with_capacity(Category::SCORED.len());
        for (category, words) in keywords.iter() {
            let compiled = words
                .iter()
                .map(|word| {
                    Regex::new(&keyword_pattern(word))
                        .with_context(|| format!("Invalid keyword '{}' for {}", word, category))
                })
                .collect::<Result<Vec<_>>>()?;
            matchers.push((category, compiled));
        }
        Ok(Self { matchers })
    }

    pub fn scores(&self, blob: &str) -> CategoryScores {
        let mut scores = CategoryScores::default();
        for (category, regexes) in &self.matchers {
            scores.counts[category.index()] = regexes
                .iter()
                .map(|re| re.find_iter(blob).count())
                .sum();
        }
        scores
    }

    pub fn score(&self, blob: &str) -> Category {
        self.scores(blob).winner()
    }
}

fn keyword_pattern(keyword: &str) -> String {
    format!(r"(?:\b|_){}(?:\b|_)", regex::escape(keyword))
}
