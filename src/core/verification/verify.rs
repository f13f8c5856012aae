//! Post-copy verification
//!
//! Recalculates checksums of a source file and its renamed copy and compares them.

use crate::core::verification::checksum::file_checksum;
use crate::domain::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Checksums of one source file and its copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyVerification {
    /// Path of the copy that was checked
    pub destination: PathBuf,

    /// SHA-256 of the source file
    pub source_checksum: String,

    /// SHA-256 of the copy
    pub copy_checksum: String,
}

impl CopyVerification {
    /// True when source and copy have identical content
    pub fn matches(&self) -> bool {
        self.source_checksum == self.copy_checksum
    }
}

/// Compare the content of `source` and `destination`
///
/// # Errors
///
/// Returns an error if either file cannot be read
pub async fn verify_copy(source: &Path, destination: &Path) -> Result<CopyVerification> {
    let (source_checksum, copy_checksum) =
        tokio::try_join!(file_checksum(source), file_checksum(destination))?;

    let verification = CopyVerification {
        destination: destination.to_path_buf(),
        source_checksum,
        copy_checksum,
    };

    if verification.matches() {
        tracing::debug!(destination = %destination.display(), "Copy verified");
    } else {
        tracing::warn!(
            destination = %destination.display(),
            source_checksum = %verification.source_checksum,
            copy_checksum = %verification.copy_checksum,
            "Copy checksum mismatch"
        );
    }

    Ok(verification)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_verify_identical_copy() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.tif");
        let copy = dir.path().join("1_0.tif");
        std::fs::write(&source, b"image").unwrap();
        std::fs::write(&copy, b"image").unwrap();

        let verification = verify_copy(&source, &copy).await.unwrap();
        assert!(verification.matches());
        assert_eq!(verification.destination, copy);
    }

    #[tokio::test]
    async fn test_verify_detects_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.tif");
        let copy = dir.path().join("1_0.tif");
        std::fs::write(&source, b"image").unwrap();
        std::fs::write(&copy, b"imagf").unwrap();

        assert!(!verify_copy(&source, &copy).await.unwrap().matches());
    }
}
