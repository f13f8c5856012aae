//! Filesystem factory

use super::dry_run::DryRunFileSystem;
use super::local::LocalFileSystem;
use super::traits::FileSystem;
use std::sync::Arc;

/// Create the filesystem implementation for a run
pub fn create_file_system(dry_run: bool) -> Arc<dyn FileSystem> {
    if dry_run {
        tracing::info!("Dry run: no files or directories will be written");
        Arc::new(DryRunFileSystem::new())
    } else {
        Arc::new(LocalFileSystem::new())
    }
}
