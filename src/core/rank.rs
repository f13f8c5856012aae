//! Chronological ranker
//!
//! Orders the records of one batch by creation instant. The sort is stable, so
//! records with equal instants keep the order the walker produced them in.
//! Records whose timestamp does not parse are never given a position.

use crate::domain::{parse_created, FileRecord, NaiveTimezone, RankedRecord, RecordError};

/// Ranked records plus the ones excluded for an invalid timestamp
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RankOutcome {
    /// Records in rank order; `ranked[i].rank == i`
    pub ranked: Vec<RankedRecord>,
    /// Records whose `CREATED` value is not a valid date-time
    pub rejected: Vec<RecordError>,
}

/// Assign zero-based chronological ranks
///
/// # Examples
///
/// ```
/// use renumber::core::rank::rank_records;
/// use renumber::domain::{FileId, FileRecord, GroupId, NaiveTimezone};
/// use std::path::PathBuf;
///
/// let record = |id: &str, created: &str| FileRecord {
///     position: 1,
///     id: FileId::new(id).unwrap(),
///     group_id: GroupId::new("G1").unwrap(),
///     created: created.to_string(),
///     batch_dir: PathBuf::from("R/DOCS/B"),
///     source_path: PathBuf::from(format!("R/DOCS/B/{id}.tif")),
/// };
///
/// let outcome = rank_records(
///     vec![record("a", "2023-01-01T10:00:00"), record("b", "2023-01-01T09:00:00")],
///     NaiveTimezone::Utc,
/// );
/// let order: Vec<_> = outcome.ranked.iter().map(|r| r.record.id.as_str()).collect();
/// assert_eq!(order, vec!["b", "a"]);
/// ```
pub fn rank_records(records: Vec<FileRecord>, zone: NaiveTimezone) -> RankOutcome {
    let mut dated = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        match parse_created(&record.created, zone) {
            Some(created_at) => dated.push((created_at, record)),
            None => {
                let err = RecordError::UnparseableTimestamp {
                    id: record.id.to_string(),
                    value: record.created.clone(),
                };
                tracing::warn!(position = record.position, error = %err, "Rejected file entry timestamp");
                rejected.push(err);
            }
        }
    }

    // sort_by_key is stable
    dated.sort_by_key(|(created_at, _)| *created_at);

    let ranked = dated
        .into_iter()
        .enumerate()
        .map(|(rank, (created_at, record))| RankedRecord {
            record,
            rank,
            created_at,
        })
        .collect();

    RankOutcome { ranked, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileId, GroupId};
    use std::path::PathBuf;

    fn record(position: usize, id: &str, created: &str) -> FileRecord {
        FileRecord {
            position,
            id: FileId::new(id).unwrap(),
            group_id: GroupId::new("G1").unwrap(),
            created: created.to_string(),
            batch_dir: PathBuf::from("BATCH/DOCS/SUB"),
            source_path: PathBuf::from(format!("BATCH/DOCS/SUB/{id}.tif")),
        }
    }

    fn order(outcome: &RankOutcome) -> Vec<&str> {
        outcome.ranked.iter().map(|r| r.record.id.as_str()).collect()
    }

    #[test]
    fn test_rank_by_timestamp() {
        let outcome = rank_records(
            vec![
                record(1, "a", "2023-01-01T10:00:00"),
                record(2, "b", "2023-01-01T09:00:00"),
                record(3, "c", "2023-01-01T11:00:00"),
            ],
            NaiveTimezone::Utc,
        );
        assert_eq!(order(&outcome), vec!["b", "a", "c"]);
        let ranks: Vec<_> = outcome.ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    fn test_equal_timestamps_keep_walker_order() {
        let outcome = rank_records(
            vec![
                record(1, "x", "2023-01-01T10:00:00"),
                record(2, "early", "2023-01-01T08:00:00"),
                record(3, "y", "2023-01-01T10:00:00"),
            ],
            NaiveTimezone::Utc,
        );
        assert_eq!(order(&outcome), vec!["early", "x", "y"]);
    }

    #[test]
    fn test_equal_instants_in_different_formats_are_ties() {
        let outcome = rank_records(
            vec![
                record(1, "second", "2023-01-01T12:00:00+02:00"),
                record(2, "first", "2023-01-01T10:00:00Z"),
            ],
            NaiveTimezone::Utc,
        );
        // Equal instants: walker order wins, not the lexicographic value
        assert_eq!(order(&outcome), vec!["second", "first"]);
        assert_eq!(outcome.ranked[0].created_at, outcome.ranked[1].created_at);
    }

    #[test]
    fn test_not_lexicographic() {
        let outcome = rank_records(
            vec![
                record(1, "later", "2023-01-01T09:30:00+00:00"),
                record(2, "earlier", "2023-01-01T10:00:00+02:00"),
            ],
            NaiveTimezone::Utc,
        );
        assert_eq!(order(&outcome), vec!["earlier", "later"]);
    }

    #[test]
    fn test_unparseable_timestamp_is_excluded() {
        let outcome = rank_records(
            vec![
                record(1, "a", "2023-01-01T10:00:00"),
                record(2, "bad", "someday"),
                record(3, "c", "2023-01-01T09:00:00"),
            ],
            NaiveTimezone::Utc,
        );
        assert_eq!(order(&outcome), vec!["c", "a"]);
        assert_eq!(
            outcome.rejected,
            vec![RecordError::UnparseableTimestamp {
                id: "bad".to_string(),
                value: "someday".to_string(),
            }]
        );
    }

    #[test]
    fn test_rank_does_not_touch_other_fields() {
        let input = record(1, "a", "2023-01-01T10:00:00");
        let outcome = rank_records(vec![input.clone()], NaiveTimezone::Utc);
        assert_eq!(outcome.ranked[0].record, input);
    }

    #[test]
    fn test_empty_input() {
        let outcome = rank_records(Vec::new(), NaiveTimezone::Utc);
        assert!(outcome.ranked.is_empty());
        assert!(outcome.rejected.is_empty());
    }
}
