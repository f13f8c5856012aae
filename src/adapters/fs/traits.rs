//! Filesystem abstraction traits
//!
//! The renumbering pipeline only ever creates directories, copies files and
//! writes manifests. Those three effects go through [`FileSystem`] so a dry run
//! can swap in an implementation that records intent without writing.

use crate::domain::Result;
use async_trait::async_trait;
use std::path::Path;

/// Result of a copy that never overwrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The destination was created with the source's content
    Copied,

    /// The destination already existed and was left untouched
    DestinationExists,

    /// The source file does not exist
    SourceMissing,
}

/// Result of writing a whole file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or replaced
    Written,

    /// The file already existed and overwriting was not allowed
    AlreadyExists,
}

/// Filesystem operations used while writing renamed copies
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// True when nothing is actually written
    fn is_dry_run(&self) -> bool;

    /// Create `path` and any missing parents
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    async fn ensure_dir(&self, path: &Path) -> Result<()>;

    /// Copy `source` to `destination` unless `destination` already exists
    ///
    /// A failed copy never leaves a partial destination behind.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than a missing source or an
    /// existing destination, which are reported through [`CopyOutcome`].
    async fn copy_new(&self, source: &Path, destination: &Path) -> Result<CopyOutcome>;

    /// Write `contents` to `path`
    ///
    /// When `overwrite` is false an existing file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    async fn write_file(&self, path: &Path, contents: &[u8], overwrite: bool)
        -> Result<WriteOutcome>;
}
