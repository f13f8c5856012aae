//! Record normalizer
//!
//! Location references are recorded by the scanning station as
//! `<root>\<batchDir>\<filename>`, backslash separated on every host. The files
//! themselves live under `<root>/<docs_dir>/<batchDir>/<filename>`.

use crate::domain::{FileRecord, RawFileEntry, RecordError};
use std::path::PathBuf;

/// Where batch directories are resolved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    /// Directory the `<root>` segment is relative to
    pub base_dir: PathBuf,
    /// Name of the directory inserted between `<root>` and `<batchDir>`
    pub docs_dir: String,
}

impl PathLayout {
    /// Create a layout rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>, docs_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            docs_dir: docs_dir.into(),
        }
    }
}

impl Default for PathLayout {
    fn default() -> Self {
        Self::new("", "DOCS")
    }
}

/// Split a location reference into `(root, batch_dir, filename)`
///
/// Exactly three segments are required. Empty segments, `.`/`..` and segments
/// containing `/` are rejected so a reference can never point outside its batch.
pub fn split_location(href: &str) -> Result<(&str, &str, &str), RecordError> {
    let segments: Vec<&str> = href.split('\\').collect();
    let invalid = || RecordError::UnparseablePath {
        href: href.to_string(),
        segments: segments.len(),
    };

    match segments.as_slice() {
        [root, batch, file] if [root, batch, file].iter().all(|s| is_plain_segment(s)) => {
            Ok((*root, *batch, *file))
        }
        _ => Err(invalid()),
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.trim().is_empty() && segment != "." && segment != ".." && !segment.contains('/')
}

/// Resolve one raw entry into a record with batch and source paths
///
/// # Examples
///
/// ```
/// use renumber::core::normalize::{normalize_entry, PathLayout};
/// use renumber::domain::{FileId, GroupId, RawFileEntry};
/// use std::path::Path;
///
/// let entry = RawFileEntry {
///     position: 1,
///     id: FileId::new("F1").unwrap(),
///     group_id: GroupId::new("G1").unwrap(),
///     created: "2023-01-01T10:00:00".to_string(),
///     href: r"BATCH\SUB\a.tif".to_string(),
/// };
///
/// let record = normalize_entry(entry, &PathLayout::default()).unwrap();
/// assert_eq!(record.batch_dir, Path::new("BATCH/DOCS/SUB"));
/// assert_eq!(record.source_path, Path::new("BATCH/DOCS/SUB/a.tif"));
/// ```
pub fn normalize_entry(entry: RawFileEntry, layout: &PathLayout) -> Result<FileRecord, RecordError> {
    let (root, batch, file) = split_location(&entry.href)?;

    let batch_dir = layout
        .base_dir
        .join(root)
        .join(&layout.docs_dir)
        .join(batch);
    let source_path = batch_dir.join(file);

    Ok(FileRecord {
        position: entry.position,
        id: entry.id,
        group_id: entry.group_id,
        created: entry.created,
        batch_dir,
        source_path,
    })
}

/// Normalize every entry, keeping walker order for the ones that succeed
pub fn normalize_entries(
    entries: Vec<RawFileEntry>,
    layout: &PathLayout,
) -> (Vec<FileRecord>, Vec<RecordError>) {
    let mut records = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for entry in entries {
        let position = entry.position;
        match normalize_entry(entry, layout) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(position, error = %err, "Rejected file entry location");
                rejected.push(err);
            }
        }
    }

    (records, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileId, GroupId};
    use std::path::Path;
    use test_case::test_case;

    fn entry(position: usize, href: &str) -> RawFileEntry {
        RawFileEntry {
            position,
            id: FileId::new(format!("F{position}")).unwrap(),
            group_id: GroupId::new("G1").unwrap(),
            created: "2023-01-01T10:00:00".to_string(),
            href: href.to_string(),
        }
    }

    #[test_case(r"BATCH\SUB\a.tif", "BATCH/DOCS/SUB", "BATCH/DOCS/SUB/a.tif" ; "scenario paths")]
    #[test_case(r"NIPNE 2023\Vol 1\page 001.tif", "NIPNE 2023/DOCS/Vol 1", "NIPNE 2023/DOCS/Vol 1/page 001.tif" ; "spaces")]
    #[test_case(r"r\b\noext", "r/DOCS/b", "r/DOCS/b/noext" ; "no extension")]
    fn test_path_reconstruction(href: &str, batch_dir: &str, source_path: &str) {
        let record = normalize_entry(entry(1, href), &PathLayout::default()).unwrap();
        assert_eq!(record.batch_dir.to_string_lossy(), batch_dir);
        assert_eq!(record.source_path.to_string_lossy(), source_path);
    }

    #[test_case(r"BATCH\a.tif", 2 ; "two segments")]
    #[test_case(r"A\B\C\d.tif", 4 ; "four segments")]
    #[test_case("a.tif", 1 ; "no separator")]
    #[test_case(r"BATCH\\a.tif", 3 ; "empty middle segment")]
    #[test_case(r"..\SUB\a.tif", 3 ; "parent directory")]
    #[test_case(r"BATCH\SUB/x\a.tif", 3 ; "forward slash inside segment")]
    fn test_unparseable_paths(href: &str, segments: usize) {
        let err = normalize_entry(entry(1, href), &PathLayout::default()).unwrap_err();
        assert_eq!(
            err,
            RecordError::UnparseablePath {
                href: href.to_string(),
                segments,
            }
        );
    }

    #[test]
    fn test_layout_base_and_docs_dir() {
        let layout = PathLayout::new("/scans", "IMAGES");
        let record = normalize_entry(entry(1, r"R\B\f.tif"), &layout).unwrap();
        assert_eq!(record.batch_dir, Path::new("/scans/R/IMAGES/B"));
        assert_eq!(record.source_path, Path::new("/scans/R/IMAGES/B/f.tif"));
    }

    #[test]
    fn test_normalize_preserves_other_fields() {
        let raw = entry(7, r"R\B\f.tif");
        let record = normalize_entry(raw.clone(), &PathLayout::default()).unwrap();
        assert_eq!(record.position, raw.position);
        assert_eq!(record.id, raw.id);
        assert_eq!(record.group_id, raw.group_id);
        assert_eq!(record.created, raw.created);
    }

    #[test]
    fn test_normalize_entries_keeps_order_and_reports_failures() {
        let (records, rejected) = normalize_entries(
            vec![
                entry(1, r"R\B\a.tif"),
                entry(2, r"bad"),
                entry(3, r"R\B\c.tif"),
            ],
            &PathLayout::default(),
        );
        let positions: Vec<_> = records.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 3]);
        assert_eq!(rejected.len(), 1);
    }
}
