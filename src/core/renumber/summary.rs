//! Run summary and reporting
//!
//! Every problem a run meets becomes an [`Issue`] attached to the document it
//! belongs to. Counters are kept per document and totalled on the run.

use crate::domain::RecordError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Type of issue reported during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A file entry lacks a required field
    MalformedRecord,
    /// A location reference does not split into three segments
    UnparseablePath,
    /// A `CREATED` value is not a valid date-time
    UnparseableTimestamp,
    /// The metadata document has no file section
    MissingFileSection,
    /// The metadata document could not be read or parsed
    ParseFailure,
    /// Every file entry of a batch was rejected
    BatchRejected,
    /// A record's source file does not exist
    SourceFileMissing,
    /// The output file already exists and was left untouched
    DestinationExists,
    /// The manifest already exists and was left untouched
    ManifestExists,
    /// A copy's content differs from its source
    ChecksumMismatch,
    /// Any other read or write failure
    IoFailure,
}

impl IssueKind {
    /// Skips are expected on re-runs and do not make a run unsuccessful
    pub fn is_skip(self) -> bool {
        matches!(self, Self::DestinationExists | Self::ManifestExists)
    }
}

impl From<&RecordError> for IssueKind {
    fn from(err: &RecordError) -> Self {
        match err {
            RecordError::MalformedRecord { .. } => Self::MalformedRecord,
            RecordError::UnparseablePath { .. } => Self::UnparseablePath,
            RecordError::UnparseableTimestamp { .. } => Self::UnparseableTimestamp,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedRecord => "MalformedRecord",
            Self::UnparseablePath => "UnparseablePath",
            Self::UnparseableTimestamp => "UnparseableTimestamp",
            Self::MissingFileSection => "MissingFileSection",
            Self::ParseFailure => "ParseFailure",
            Self::BatchRejected => "BatchRejected",
            Self::SourceFileMissing => "SourceFileMissing",
            Self::DestinationExists => "DestinationExists",
            Self::ManifestExists => "ManifestExists",
            Self::ChecksumMismatch => "ChecksumMismatch",
            Self::IoFailure => "IoFailure",
        };
        f.write_str(name)
    }
}

/// Issue with context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Type of issue
    pub kind: IssueKind,

    /// Human-readable message
    pub message: String,

    /// Optional context (e.g., paths involved)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Issue {
    /// Create a new issue
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context to the issue
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl From<&RecordError> for Issue {
    fn from(err: &RecordError) -> Self {
        Issue::new(IssueKind::from(err), err.to_string())
    }
}

/// How processing of one document ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Records were ranked and the output stage ran
    Processed,
    /// The document could not be read or parsed
    ParseFailed,
    /// The document has no file section
    NoFileSection,
    /// Every file entry was rejected
    Rejected,
}

/// Report for one metadata document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Path of the metadata document
    pub document: PathBuf,

    /// How processing ended
    pub outcome: DocumentOutcome,

    /// File entries found in the file section
    pub entries_found: usize,

    /// Records that received a rank
    pub ranked: usize,

    /// Copies created
    pub copied: usize,

    /// Copies skipped because the output file already existed
    pub destinations_existing: usize,

    /// Records whose source file was missing
    pub sources_missing: usize,

    /// Copies that failed with an I/O error
    pub copy_failures: usize,

    /// Copies whose checksum matched the source
    pub verified: usize,

    /// Manifests written
    pub manifests_written: usize,

    /// Manifests left untouched because they already existed
    pub manifests_existing: usize,

    /// Issues in the order they occurred
    pub issues: Vec<Issue>,
}

impl DocumentReport {
    /// Create an empty report for `document`
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            outcome: DocumentOutcome::Processed,
            entries_found: 0,
            ranked: 0,
            copied: 0,
            destinations_existing: 0,
            sources_missing: 0,
            copy_failures: 0,
            verified: 0,
            manifests_written: 0,
            manifests_existing: 0,
            issues: Vec::new(),
        }
    }

    /// Add an issue, tagging it with the document path when it has no context
    pub fn add_issue(&mut self, issue: Issue) {
        let issue = match issue.context {
            Some(_) => issue,
            None => {
                let document = self.document.display().to_string();
                issue.with_context(document)
            }
        };
        self.issues.push(issue);
    }

    /// True when no issue other than a skip was reported
    pub fn is_clean(&self) -> bool {
        self.issues.iter().all(|issue| issue.kind.is_skip())
    }
}

/// Summary of a renumbering run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Identifier of the run, also present on every log line of the run
    pub run_id: String,

    /// Whether the run wrote nothing
    pub dry_run: bool,

    /// Metadata documents discovered
    pub documents_found: usize,

    /// Documents whose records were ranked and written
    pub documents_processed: usize,

    /// Documents skipped (parse failure, no file section, every entry rejected)
    pub documents_skipped: usize,

    /// Records that received a rank
    pub records_ranked: usize,

    /// Copies created
    pub files_copied: usize,

    /// Copies skipped because the output file already existed
    pub destinations_existing: usize,

    /// Records whose source file was missing
    pub sources_missing: usize,

    /// Copies that failed with an I/O error
    pub copy_failures: usize,

    /// Copies whose checksum matched the source
    pub copies_verified: usize,

    /// Manifests written
    pub manifests_written: usize,

    /// Manifests left untouched because they already existed
    pub manifests_existing: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,

    /// Whether the run stopped early on a shutdown signal
    pub interrupted: bool,

    /// Issues not tied to a document (e.g. unreadable directories)
    pub issues: Vec<Issue>,

    /// Per-document reports in processing order
    pub documents: Vec<DocumentReport>,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new(run_id: impl Into<String>, dry_run: bool) -> Self {
        Self {
            run_id: run_id.into(),
            dry_run,
            documents_found: 0,
            documents_processed: 0,
            documents_skipped: 0,
            records_ranked: 0,
            files_copied: 0,
            destinations_existing: 0,
            sources_missing: 0,
            copy_failures: 0,
            copies_verified: 0,
            manifests_written: 0,
            manifests_existing: 0,
            duration_ms: 0,
            interrupted: false,
            issues: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Add a run-level issue
    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Fold a finished document report into the totals
    pub fn add_document(&mut self, report: DocumentReport) {
        if report.outcome == DocumentOutcome::Processed {
            self.documents_processed += 1;
        } else {
            self.documents_skipped += 1;
        }
        self.records_ranked += report.ranked;
        self.files_copied += report.copied;
        self.destinations_existing += report.destinations_existing;
        self.sources_missing += report.sources_missing;
        self.copy_failures += report.copy_failures;
        self.copies_verified += report.verified;
        self.manifests_written += report.manifests_written;
        self.manifests_existing += report.manifests_existing;
        self.documents.push(report);
    }

    /// Every issue of the run, run-level first
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .chain(self.documents.iter().flat_map(|d| d.issues.iter()))
    }

    /// Number of issues of `kind`
    pub fn count(&self, kind: IssueKind) -> usize {
        self.all_issues().filter(|issue| issue.kind == kind).count()
    }

    /// Check if the run completed without problems
    ///
    /// Skipped destinations and manifests are expected on re-runs and do not
    /// count as problems.
    pub fn is_successful(&self) -> bool {
        !self.interrupted && self.all_issues().all(|issue| issue.kind.is_skip())
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            dry_run = self.dry_run,
            documents_found = self.documents_found,
            documents_processed = self.documents_processed,
            documents_skipped = self.documents_skipped,
            records_ranked = self.records_ranked,
            files_copied = self.files_copied,
            destinations_existing = self.destinations_existing,
            sources_missing = self.sources_missing,
            copy_failures = self.copy_failures,
            manifests_written = self.manifests_written,
            duration_ms = self.duration_ms,
            interrupted = self.interrupted,
            "Renumber run completed"
        );

        let problems: Vec<_> = self
            .all_issues()
            .filter(|issue| !issue.kind.is_skip())
            .collect();
        if !problems.is_empty() {
            tracing::warn!(issue_count = problems.len(), "Run completed with issues");
            for issue in problems {
                tracing::warn!(
                    kind = %issue.kind,
                    message = %issue.message,
                    context = issue.context.as_deref().unwrap_or(""),
                    "Run issue"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(copied: usize, issues: Vec<Issue>) -> DocumentReport {
        let mut report = DocumentReport::new("batch.mets");
        report.ranked = copied;
        report.copied = copied;
        for issue in issues {
            report.add_issue(issue);
        }
        report
    }

    #[test]
    fn test_run_summary_creation() {
        let summary = RunSummary::new("run-1", false);
        assert_eq!(summary.run_id, "run-1");
        assert_eq!(summary.documents_found, 0);
        assert!(summary.documents.is_empty());
        assert!(summary.is_successful());
    }

    #[test]
    fn test_add_document_accumulates_totals() {
        let mut summary = RunSummary::new("run-1", false);
        summary.add_document(processed(3, vec![]));

        let mut skipped = DocumentReport::new("empty.mets");
        skipped.outcome = DocumentOutcome::NoFileSection;
        skipped.add_issue(Issue::new(IssueKind::MissingFileSection, "No file section"));
        summary.add_document(skipped);

        assert_eq!(summary.documents_processed, 1);
        assert_eq!(summary.documents_skipped, 1);
        assert_eq!(summary.files_copied, 3);
        assert_eq!(summary.count(IssueKind::MissingFileSection), 1);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_skips_do_not_fail_the_run() {
        let mut summary = RunSummary::new("run-1", false);
        summary.add_document(processed(
            0,
            vec![
                Issue::new(IssueKind::DestinationExists, "exists"),
                Issue::new(IssueKind::ManifestExists, "exists"),
            ],
        ));
        assert!(summary.is_successful());

        summary.interrupted = true;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_document_issue_gets_document_context() {
        let mut report = DocumentReport::new("a/batch.mets");
        report.add_issue(Issue::new(IssueKind::IoFailure, "disk full"));
        report.add_issue(Issue::new(IssueKind::IoFailure, "denied").with_context("x.tif"));

        assert_eq!(report.issues[0].context.as_deref(), Some("a/batch.mets"));
        assert_eq!(report.issues[1].context.as_deref(), Some("x.tif"));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_issue_from_record_error() {
        let err = RecordError::UnparseableTimestamp {
            id: "F1".to_string(),
            value: "soon".to_string(),
        };
        let issue = Issue::from(&err);
        assert_eq!(issue.kind, IssueKind::UnparseableTimestamp);
        assert_eq!(issue.message, err.to_string());
    }

    #[test]
    fn test_summary_serializes_kinds_in_snake_case() {
        let mut summary = RunSummary::new("run-1", true);
        summary.add_issue(Issue::new(IssueKind::IoFailure, "unreadable"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["issues"][0]["kind"], "io_failure");
        assert_eq!(json["dry_run"], true);
        assert!(json["issues"][0].get("context").is_none());
    }
}
