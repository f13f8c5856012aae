//! Batch planning
//!
//! Runs walker, normalizer and ranker over one parsed metadata document. The
//! result is a pure value: nothing here touches the filesystem.

use crate::adapters::xml::Node;
use crate::core::normalize::{normalize_entries, PathLayout};
use crate::core::rank::rank_records;
use crate::core::walk::{find_file_section, walk_file_section};
use crate::domain::{NaiveTimezone, RankedRecord, RecordError, RenumberError, Result};

/// Settings that influence how a document is planned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// How location references resolve to directories
    pub layout: PathLayout,
    /// Zone for timestamps without an offset
    pub naive_timezone: NaiveTimezone,
}

/// The ranked records of one batch plus every per-record rejection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPlan {
    /// Number of file entries found in the file section
    pub entries_found: usize,
    /// Records in rank order
    pub ranked: Vec<RankedRecord>,
    /// Entries excluded by the walker, normalizer or ranker
    pub rejected: Vec<RecordError>,
}

impl BatchPlan {
    /// True when the batch had file entries but none of them survived
    pub fn is_rejected(&self) -> bool {
        self.ranked.is_empty() && !self.rejected.is_empty()
    }
}

/// Plan one batch from its parsed document
///
/// # Errors
///
/// Returns [`RenumberError::MissingFileSection`] when the document has no file
/// section. Per-record problems are collected in [`BatchPlan::rejected`].
pub fn plan_batch(root: &Node, document: &str, options: &PlanOptions) -> Result<BatchPlan> {
    let section = find_file_section(root)
        .ok_or_else(|| RenumberError::MissingFileSection(document.to_string()))?;

    let walked = walk_file_section(section);
    let entries_found = walked.total();
    let mut rejected = walked.rejected;

    let (records, unresolved) = normalize_entries(walked.entries, &options.layout);
    rejected.extend(unresolved);

    let ranked = rank_records(records, options.naive_timezone);
    rejected.extend(ranked.rejected);

    tracing::debug!(
        document = %document,
        entries_found,
        ranked = ranked.ranked.len(),
        rejected = rejected.len(),
        "Planned batch"
    );

    Ok(BatchPlan {
        entries_found,
        ranked: ranked.ranked,
        rejected,
    })
}
