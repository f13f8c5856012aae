//! Dry-run filesystem
//!
//! Reports the outcome each operation would have without creating anything.

use super::traits::{CopyOutcome, FileSystem, WriteOutcome};
use crate::domain::{RenumberError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Inspects the filesystem but never writes to it
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunFileSystem;

impl DryRunFileSystem {
    /// Create a new dry-run filesystem handle
    pub fn new() -> Self {
        Self
    }
}

async fn exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path).await.map_err(|e| {
        RenumberError::Io(format!("Failed to check {}: {e}", path.display()))
    })
}

#[async_trait]
impl FileSystem for DryRunFileSystem {
    fn is_dry_run(&self) -> bool {
        true
    }

    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        tracing::debug!(path = %path.display(), "[DRY RUN] Would create directory");
        Ok(())
    }

    async fn copy_new(&self, source: &Path, destination: &Path) -> Result<CopyOutcome> {
        if !exists(source).await? {
            return Ok(CopyOutcome::SourceMissing);
        }
        if exists(destination).await? {
            return Ok(CopyOutcome::DestinationExists);
        }

        tracing::info!(
            source = %source.display(),
            destination = %destination.display(),
            "[DRY RUN] Would copy"
        );
        Ok(CopyOutcome::Copied)
    }

    async fn write_file(
        &self,
        path: &Path,
        contents: &[u8],
        overwrite: bool,
    ) -> Result<WriteOutcome> {
        if !overwrite && exists(path).await? {
            return Ok(WriteOutcome::AlreadyExists);
        }

        tracing::info!(
            path = %path.display(),
            bytes = contents.len(),
            "[DRY RUN] Would write"
        );
        Ok(WriteOutcome::Written)
    }
}
