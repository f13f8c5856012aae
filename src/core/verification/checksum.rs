//! Checksum calculation for copy verification

use crate::domain::{RenumberError, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

const READ_CHUNK: usize = 64 * 1024;

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use renumber::core::verification::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(b"abc");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Calculate SHA-256 checksum of a file, reading it in chunks
///
/// # Errors
///
/// Returns [`RenumberError::Io`] if the file cannot be opened or read
pub async fn file_checksum(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path).await.map_err(|e| {
        RenumberError::Io(format!("Failed to open {} for checksum: {e}", path.display()))
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_CHUNK];
    loop {
        let read = file.read(&mut buffer).await.map_err(|e| {
            RenumberError::Io(format!("Failed to read {} for checksum: {e}", path.display()))
        })?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    let result = hasher.finalize();
    Ok(format!("{result:x}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_checksum_bytes_known_value() {
        assert_eq!(
            calculate_checksum_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_calculate_checksum_bytes_deterministic() {
        let data = b"Test data";
        assert_eq!(calculate_checksum_bytes(data), calculate_checksum_bytes(data));
        assert_ne!(calculate_checksum_bytes(data), calculate_checksum_bytes(b"Test datb"));
    }

    #[tokio::test]
    async fn test_file_checksum_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.tif");
        // Larger than one read chunk
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        let checksum = file_checksum(&path).await.unwrap();
        assert_eq!(checksum, calculate_checksum_bytes(&data));
    }

    #[tokio::test]
    async fn test_file_checksum_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = file_checksum(&dir.path().join("missing.tif")).await;
        assert!(matches!(result, Err(RenumberError::Io(_))));
    }
}
