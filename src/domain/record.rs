//! File record types
//!
//! A file entry passes through three shapes during one run:
//! [`RawFileEntry`] (walker output), [`FileRecord`] (normalized paths) and
//! [`RankedRecord`] (chronological rank assigned). Each shape is built once from
//! the previous one and never mutated afterwards.

use super::ids::{FileId, GroupId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A file entry as found in the metadata document, with every required field present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawFileEntry {
    /// 1-based position of the entry in document order
    pub position: usize,

    /// `ID` attribute
    pub id: FileId,

    /// `GROUPID` attribute
    pub group_id: GroupId,

    /// `CREATED` attribute, unparsed
    pub created: String,

    /// Backslash-delimited relative path from the location reference
    pub href: String,
}

/// A file entry with its location resolved to the batch directory layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// 1-based position of the entry in document order
    pub position: usize,

    /// `ID` attribute
    pub id: FileId,

    /// `GROUPID` attribute
    pub group_id: GroupId,

    /// `CREATED` attribute, unparsed
    pub created: String,

    /// `<root>/DOCS/<batchDir>`
    pub batch_dir: PathBuf,

    /// `<batch_dir>/<filename>`
    pub source_path: PathBuf,
}

/// A record with its position in the batch's chronological order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRecord {
    /// The normalized record
    #[serde(flatten)]
    pub record: FileRecord,

    /// Zero-based chronological rank within the batch
    pub rank: usize,

    /// Parsed `CREATED` instant
    pub created_at: DateTime<Utc>,
}

impl RankedRecord {
    /// Milliseconds since the Unix epoch of the creation instant
    pub fn timestamp_ms(&self) -> i64 {
        self.created_at.timestamp_millis()
    }

    /// Directory the renamed copy is written into
    pub fn output_dir(&self, subdir: &str) -> PathBuf {
        self.record.batch_dir.join(subdir)
    }

    /// `<timestamp_ms>_<rank>.<ext>`, where `ext` is the source file's extension
    /// or `default_extension` when it has none
    pub fn output_file_name(&self, default_extension: &str) -> String {
        let extension = source_extension(&self.record.source_path).unwrap_or(default_extension);
        format!("{}_{}.{}", self.timestamp_ms(), self.rank, extension)
    }

    /// Full destination path of the renamed copy
    pub fn output_path(&self, subdir: &str, default_extension: &str) -> PathBuf {
        self.output_dir(subdir)
            .join(self.output_file_name(default_extension))
    }
}

fn source_extension(path: &Path) -> Option<&str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}
