//! Metadata document discovery

use crate::domain::{RenumberError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How the scan root is searched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Document extension without the dot, matched case-insensitively
    pub extension: String,
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum depth below the scan root
    pub max_depth: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extension: "mets".to_string(),
            follow_links: false,
            max_depth: 32,
        }
    }
}

/// Documents found below a scan root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    /// Document paths in lexicographic order
    pub documents: Vec<PathBuf>,
    /// Entries below the root that could not be read
    pub unreadable: Vec<String>,
}

/// Find every metadata document below `root`
///
/// Unreadable entries below the root are logged and skipped.
///
/// # Errors
///
/// Returns [`RenumberError::Discovery`] if `root` is missing, is not a
/// directory, or cannot be read.
pub async fn discover_documents(root: &Path, options: &DiscoveryOptions) -> Result<Discovered> {
    let metadata = tokio::fs::metadata(root).await.map_err(|e| {
        RenumberError::Discovery(format!("Cannot read scan root {}: {e}", root.display()))
    })?;
    if !metadata.is_dir() {
        return Err(RenumberError::Discovery(format!(
            "Scan root {} is not a directory",
            root.display()
        )));
    }

    let root = root.to_path_buf();
    let options = options.clone();
    let discovered = tokio::task::spawn_blocking(move || walk_root(&root, &options))
        .await
        .map_err(|e| RenumberError::Discovery(format!("Document discovery task failed: {e}")))??;

    tracing::info!(
        documents = discovered.documents.len(),
        unreadable = discovered.unreadable.len(),
        "Discovered metadata documents"
    );

    Ok(discovered)
}

fn walk_root(root: &Path, options: &DiscoveryOptions) -> Result<Discovered> {
    let mut discovered = Discovered::default();

    for entry in WalkDir::new(root)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(RenumberError::Discovery(format!(
                    "Cannot read scan root {}: {e}",
                    root.display()
                )));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry");
                discovered.unreadable.push(e.to_string());
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), &options.extension) {
            discovered.documents.push(entry.into_path());
        }
    }

    discovered.documents.sort();
    Ok(discovered)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"<mets/>").unwrap();
    }

    #[tokio::test]
    async fn test_discovers_recursively_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b/batch.mets"));
        touch(&dir.path().join("a/deeper/batch.METS"));
        touch(&dir.path().join("a/page.tif"));
        touch(&dir.path().join("top.mets"));

        let found = discover_documents(dir.path(), &DiscoveryOptions::default())
            .await
            .unwrap();

        let relative: Vec<_> = found
            .documents
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("a/deeper/batch.METS"),
                PathBuf::from("b/batch.mets"),
                PathBuf::from("top.mets"),
            ]
        );
        assert!(found.unreadable.is_empty());
    }

    #[tokio::test]
    async fn test_respects_max_depth() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("one.mets"));
        touch(&dir.path().join("a/b/two.mets"));

        let options = DiscoveryOptions {
            max_depth: 1,
            ..DiscoveryOptions::default()
        };
        let found = discover_documents(dir.path(), &options).await.unwrap();
        assert_eq!(found.documents, vec![dir.path().join("one.mets")]);
    }

    #[tokio::test]
    async fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        let found = discover_documents(dir.path(), &DiscoveryOptions::default())
            .await
            .unwrap();
        assert!(found.documents.is_empty());
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result =
            discover_documents(&dir.path().join("nope"), &DiscoveryOptions::default()).await;
        assert!(matches!(result, Err(RenumberError::Discovery(_))));
    }

    #[tokio::test]
    async fn test_file_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("batch.mets");
        touch(&file);
        let result = discover_documents(&file, &DiscoveryOptions::default()).await;
        assert!(matches!(result, Err(RenumberError::Discovery(_))));
    }
}
