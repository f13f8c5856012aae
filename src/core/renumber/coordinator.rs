//! Renumber coordinator - drives a whole run
//!
//! Discovers metadata documents under the scan root and processes them one at
//! a time: parse, plan, then write. A document-level failure is reported and
//! the run moves on; only an unreadable scan root stops the run.

use crate::adapters::fs::{create_file_system, discover_documents, DiscoveryOptions, FileSystem};
use crate::adapters::xml::load_document;
use crate::config::RenumberConfig;
use crate::core::normalize::PathLayout;
use crate::core::plan::{plan_batch, PlanOptions};
use crate::core::renumber::batch::{BatchConfig, BatchWriter};
use crate::core::renumber::summary::{
    DocumentOutcome, DocumentReport, Issue, IssueKind, RunSummary,
};
use crate::domain::{NaiveTimezone, RenumberError, Result};
use crate::{log_batch_complete, log_batch_start};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

/// Renumber coordinator
pub struct RenumberCoordinator {
    scan_root: PathBuf,
    discovery: DiscoveryOptions,
    plan_options: PlanOptions,
    writer: BatchWriter,
    shutdown_signal: watch::Receiver<bool>,
}

impl RenumberCoordinator {
    /// Create a coordinator that writes to the local filesystem, or to nothing
    /// when `application.dry_run` is set
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an enumerated setting does not parse
    pub fn new(config: &RenumberConfig, shutdown_signal: watch::Receiver<bool>) -> Result<Self> {
        let file_system = create_file_system(config.application.dry_run);
        Self::with_file_system(config, file_system, shutdown_signal)
    }

    /// Create a coordinator with an explicit filesystem implementation
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an enumerated setting does not parse
    pub fn with_file_system(
        config: &RenumberConfig,
        file_system: Arc<dyn FileSystem>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let plan_options = PlanOptions {
            layout: PathLayout::new(&config.scan.base_dir, config.scan.docs_dir.clone()),
            naive_timezone: NaiveTimezone::from_str(&config.output.naive_timezone)?,
        };
        let discovery = DiscoveryOptions {
            extension: config.scan.document_extension.clone(),
            follow_links: config.scan.follow_links,
            max_depth: config.scan.max_depth,
        };
        let writer = BatchWriter::new(file_system, BatchConfig::from_config(&config.output)?);

        Ok(Self {
            scan_root: PathBuf::from(&config.scan.root),
            discovery,
            plan_options,
            writer,
            shutdown_signal,
        })
    }

    /// Execute the run
    ///
    /// Every log line emitted during the run carries the run's `run_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RenumberError::Discovery`] if the scan root cannot be
    /// enumerated. All other problems are reported in the summary.
    pub async fn execute(&self) -> Result<RunSummary> {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("renumber_run", run_id = %run_id);
        self.run(run_id).instrument(span).await
    }

    async fn run(&self, run_id: String) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(run_id, self.writer.is_dry_run());

        tracing::info!(
            scan_root = %self.scan_root.display(),
            dry_run = summary.dry_run,
            "Starting renumber run"
        );

        let discovered = discover_documents(&self.scan_root, &self.discovery).await?;
        summary.documents_found = discovered.documents.len();
        for unreadable in discovered.unreadable {
            summary.add_issue(
                Issue::new(IssueKind::IoFailure, unreadable)
                    .with_context(self.scan_root.display().to_string()),
            );
        }

        for document in &discovered.documents {
            if self.is_shutdown_requested() {
                tracing::warn!(
                    remaining = summary.documents_found - summary.documents.len(),
                    "Shutdown requested, stopping before next document"
                );
                summary.interrupted = true;
                break;
            }

            let report = self.process_document(document).await;
            summary.add_document(report);
        }

        summary.duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
        summary.log_summary();
        Ok(summary)
    }

    /// Process one metadata document to completion
    ///
    /// Never fails: every problem ends up in the returned report.
    pub async fn process_document(&self, document: &Path) -> DocumentReport {
        let start_time = Instant::now();
        let mut report = DocumentReport::new(document);
        let name = document.display().to_string();

        let root = match load_document(document).await {
            Ok(root) => root,
            Err(e) => {
                let kind = match e {
                    RenumberError::Io(_) => IssueKind::IoFailure,
                    _ => IssueKind::ParseFailure,
                };
                tracing::error!(document = %name, error = %e, "Failed to load metadata document");
                report.outcome = DocumentOutcome::ParseFailed;
                report.add_issue(Issue::new(kind, e.to_string()));
                return report;
            }
        };

        let plan = match plan_batch(&root, &name, &self.plan_options) {
            Ok(plan) => plan,
            Err(e) => {
                let (outcome, kind) = match e {
                    RenumberError::MissingFileSection(_) => {
                        (DocumentOutcome::NoFileSection, IssueKind::MissingFileSection)
                    }
                    _ => (DocumentOutcome::ParseFailed, IssueKind::ParseFailure),
                };
                tracing::warn!(document = %name, error = %e, "Skipping document");
                report.outcome = outcome;
                report.add_issue(Issue::new(kind, e.to_string()));
                return report;
            }
        };

        log_batch_start!(name, plan.entries_found);
        report.entries_found = plan.entries_found;
        for rejected in &plan.rejected {
            report.add_issue(Issue::from(rejected));
        }

        if plan.is_rejected() {
            tracing::warn!(
                document = %name,
                rejected = plan.rejected.len(),
                "Every file entry was rejected"
            );
            report.outcome = DocumentOutcome::Rejected;
            report.add_issue(Issue::new(
                IssueKind::BatchRejected,
                format!("All {} file entries were rejected", plan.rejected.len()),
            ));
            return report;
        }

        report.ranked = plan.ranked.len();
        self.writer.write_batch(&plan.ranked, &mut report).await;

        log_batch_complete!(name, report.copied, start_time.elapsed());
        report
    }

    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }
}
