use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

use crate::models::DocumentHandle;

/// Lists the documents directly inside `root` whose file names match
/// `include_globs`. Subdirectories (including category folders from an
/// earlier run) are not descended into.
pub fn scan_documents(root: &Path, include_globs: &[String]) -> Result<Vec<DocumentHandle>> {
    if !root.is_dir() {
        bail!("Source directory does not exist: {}", root.display());
    }

    let include_set = build_globset(include_globs)?;

    let mut documents = Vec::new();
    let walker = WalkDir::new(root).min_depth(1).max_depth(1);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !include_set.is_match(name.as_ref()) {
            continue;
        }

        documents.push(DocumentHandle::new(entry.path()));
    }

    // Sort for deterministic ordering
    documents.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(documents)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
