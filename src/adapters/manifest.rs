//! Batch manifest rendering
//!
//! One CSV file per output directory listing every ranked record in rank order.
//! All fields are quoted and the header row is fixed.

use crate::domain::{RankedRecord, RenumberError, Result};
use std::fmt;
use std::str::FromStr;

/// Fixed manifest header
pub const MANIFEST_HEADER: [&str; 6] = ["idxarr", "timestamp", "created", "groupid", "id", "path"];

/// What to do when a manifest already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestPolicy {
    /// Leave the existing manifest untouched and report it
    #[default]
    Skip,
    /// Replace the existing manifest
    Overwrite,
}

impl FromStr for ManifestPolicy {
    type Err = RenumberError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "overwrite" => Ok(Self::Overwrite),
            _ => Err(RenumberError::Configuration(format!(
                "Invalid manifest policy: {s}. Expected 'skip' or 'overwrite'"
            ))),
        }
    }
}

impl fmt::Display for ManifestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Render the manifest for records that share one output directory
///
/// Rows follow the order of `records`, which callers keep in ascending rank.
///
/// # Errors
///
/// Returns [`RenumberError::Manifest`] if the CSV writer fails
pub fn render_manifest<'a>(records: impl IntoIterator<Item = &'a RankedRecord>) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(MANIFEST_HEADER).map_err(manifest_error)?;

    for ranked in records {
        writer
            .write_record([
                ranked.rank.to_string(),
                ranked.timestamp_ms().to_string(),
                ranked.record.created.clone(),
                ranked.record.group_id.to_string(),
                ranked.record.id.to_string(),
                ranked.record.source_path.to_string_lossy().into_owned(),
            ])
            .map_err(manifest_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| RenumberError::Manifest(format!("Failed to finish manifest: {e}")))
}

fn manifest_error(err: csv::Error) -> RenumberError {
    RenumberError::Manifest(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileId, FileRecord, GroupId};
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn ranked(id: &str, rank: usize, hour: u32, source: &str) -> RankedRecord {
        RankedRecord {
            record: FileRecord {
                position: rank + 1,
                id: FileId::new(id).unwrap(),
                group_id: GroupId::new("GRP").unwrap(),
                created: format!("2023-01-01T{hour:02}:00:00"),
                batch_dir: PathBuf::from("BATCH/DOCS/SUB"),
                source_path: PathBuf::from(source),
            },
            rank,
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_header_and_rows() {
        let records = vec![
            ranked("b", 0, 9, "BATCH/DOCS/SUB/b.tif"),
            ranked("a", 1, 10, "BATCH/DOCS/SUB/a.tif"),
        ];

        let text = String::from_utf8(render_manifest(&records).unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                r#""idxarr","timestamp","created","groupid","id","path""#,
                r#""0","1672563600000","2023-01-01T09:00:00","GRP","b","BATCH/DOCS/SUB/b.tif""#,
                r#""1","1672567200000","2023-01-01T10:00:00","GRP","a","BATCH/DOCS/SUB/a.tif""#,
            ]
        );
    }

    #[test]
    fn test_render_escapes_quotes_and_commas() {
        let records = vec![ranked("a", 0, 9, "BATCH/DOCS/SUB/page \"1\", left.tif")];
        let text = String::from_utf8(render_manifest(&records).unwrap()).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[5], "BATCH/DOCS/SUB/page \"1\", left.tif");
    }

    #[test]
    fn test_render_empty_has_header_only() {
        let text = String::from_utf8(render_manifest(&Vec::<RankedRecord>::new()).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_manifest_policy_from_str() {
        assert_eq!("skip".parse::<ManifestPolicy>().unwrap(), ManifestPolicy::Skip);
        assert_eq!("Overwrite".parse::<ManifestPolicy>().unwrap(), ManifestPolicy::Overwrite);
        assert!("append".parse::<ManifestPolicy>().is_err());
        assert_eq!(ManifestPolicy::default().to_string(), "skip");
    }
}
