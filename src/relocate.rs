//! Filesystem side of a run: category folders and moving documents into them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::category::Category;

/// Creates destination folders and moves classified documents.
///
/// Workers call [`relocate`](Relocator::relocate) concurrently, one call per
/// document, so implementations must be `Send + Sync`.
#[async_trait]
pub trait Relocator: Send + Sync {
    /// Creates one folder per category under `root`. Existing folders are fine.
    async fn ensure_category_dirs(&self, root: &Path) -> Result<()>;

    /// Moves `source` into `dest_dir`, keeping its file name. Returns the new path.
    async fn relocate(&self, source: &Path, dest_dir: &Path) -> std::io::Result<PathBuf>;
}

/// Renames files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRelocator;

#[async_trait]
impl Relocator for FsRelocator {
    async fn ensure_category_dirs(&self, root: &Path) -> Result<()> {
        for category in Category::ALL {
            let dir = category_dir(root, category);
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn relocate(&self, source: &Path, dest_dir: &Path) -> std::io::Result<PathBuf> {
        let file_name = source.file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has no file name", source.display()),
            )
        })?;
        let target = dest_dir.join(file_name);
        tokio::fs::rename(source, &target).await?;
        Ok(target)
    }
}

/// `<root>/<Category>`
pub fn category_dir(root: &Path, category: Category) -> PathBuf {
    root.join(category.name())
}
