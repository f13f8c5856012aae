//! Local filesystem implementation backed by `tokio::fs`

use super::traits::{CopyOutcome, FileSystem, WriteOutcome};
use crate::domain::{RenumberError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new local filesystem handle
    pub fn new() -> Self {
        Self
    }
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> RenumberError {
    RenumberError::Io(format!("Failed to {action} {}: {err}", path.display()))
}

/// Remove a file this process created but could not finish writing
async fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove partially written file"
        );
    }
}

/// Write `contents` through `writer`, removing `path` if the write fails
///
/// A partial file would otherwise be taken for a finished one on the next run.
async fn write_or_remove<W>(mut writer: W, path: &Path, contents: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written: std::io::Result<()> = async {
        writer.write_all(contents).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(writer);
        remove_partial(path).await;
        return Err(io_error("write", path, e));
    }
    Ok(())
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    fn is_dry_run(&self) -> bool {
        false
    }

    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| io_error("create directory", path, e))
    }

    async fn copy_new(&self, source: &Path, destination: &Path) -> Result<CopyOutcome> {
        let mut reader = match File::open(source).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CopyOutcome::SourceMissing),
            Err(e) => return Err(io_error("open", source, e)),
        };

        // create_new makes the existence check and the creation one step
        let mut writer = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Ok(CopyOutcome::DestinationExists)
            }
            Err(e) => return Err(io_error("create", destination, e)),
        };

        let copied: std::io::Result<()> = async {
            tokio::io::copy(&mut reader, &mut writer).await?;
            writer.flush().await?;
            writer.sync_all().await
        }
        .await;

        if let Err(e) = copied {
            drop(writer);
            // Only this call created the destination
            remove_partial(destination).await;
            return Err(io_error("copy to", destination, e));
        }

        Ok(CopyOutcome::Copied)
    }

    async fn write_file(
        &self,
        path: &Path,
        contents: &[u8],
        overwrite: bool,
    ) -> Result<WriteOutcome> {
        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let file = match options.open(path).await {
            Ok(file) => file,
            Err(e) if !overwrite && e.kind() == ErrorKind::AlreadyExists => {
                return Ok(WriteOutcome::AlreadyExists)
            }
            Err(e) => return Err(io_error("create", path, e)),
        };

        // In overwrite mode the previous contents are already truncated, so a
        // failed write removes the file in both modes
        write_or_remove(file, path, contents).await?;

        Ok(WriteOutcome::Written)
    }
}
