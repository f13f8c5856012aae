//! Output stage for one batch
//!
//! Copies ranked records into their output directory under their new names and
//! writes one manifest per output directory. Copies run one at a time in
//! ascending rank; nothing existing is ever overwritten.

use crate::adapters::fs::{CopyOutcome, FileSystem, WriteOutcome};
use crate::adapters::manifest::{render_manifest, ManifestPolicy};
use crate::config::OutputConfig;
use crate::core::renumber::summary::{DocumentReport, Issue, IssueKind};
use crate::core::verification::verify_copy;
use crate::domain::{RankedRecord, Result};
use crate::log_record_skipped;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Configuration for writing batches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Output subdirectory name under each batch directory
    pub subdir: String,
    /// Manifest file name
    pub manifest_name: String,
    /// Behavior when the manifest already exists
    pub manifest_policy: ManifestPolicy,
    /// Extension for sources without one
    pub default_extension: String,
    /// Verify each copy's checksum against its source
    pub verify_copies: bool,
}

impl BatchConfig {
    /// Create from the output section of the configuration
    pub fn from_config(output: &OutputConfig) -> Result<Self> {
        Ok(Self {
            subdir: output.subdir.clone(),
            manifest_name: output.manifest_name.clone(),
            manifest_policy: ManifestPolicy::from_str(&output.manifest_policy)?,
            default_extension: output.default_extension.clone(),
            verify_copies: output.verify_copies,
        })
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            subdir: "renumbered".to_string(),
            manifest_name: "manifest.csv".to_string(),
            manifest_policy: ManifestPolicy::Skip,
            default_extension: "tif".to_string(),
            verify_copies: false,
        }
    }
}

/// Writes the renamed copies and manifests of a batch
pub struct BatchWriter {
    file_system: Arc<dyn FileSystem>,
    config: BatchConfig,
}

impl BatchWriter {
    /// Create a new batch writer
    pub fn new(file_system: Arc<dyn FileSystem>, config: BatchConfig) -> Self {
        Self {
            file_system,
            config,
        }
    }

    /// Whether the underlying filesystem writes nothing
    pub fn is_dry_run(&self) -> bool {
        self.file_system.is_dry_run()
    }

    /// Copy every record and write the manifests, recording results in `report`
    ///
    /// `ranked` must be in ascending rank order. Failures are reported per
    /// record; a directory that cannot be created fails only its own records.
    pub async fn write_batch(&self, ranked: &[RankedRecord], report: &mut DocumentReport) {
        let mut prepared: HashSet<PathBuf> = HashSet::new();
        let mut unavailable: HashSet<PathBuf> = HashSet::new();
        let mut by_dir: BTreeMap<PathBuf, Vec<&RankedRecord>> = BTreeMap::new();

        for record in ranked {
            let out_dir = record.output_dir(&self.config.subdir);
            by_dir.entry(out_dir.clone()).or_default().push(record);

            if unavailable.contains(&out_dir) {
                report.copy_failures += 1;
                continue;
            }
            if !prepared.contains(&out_dir) {
                if let Err(e) = self.file_system.ensure_dir(&out_dir).await {
                    tracing::error!(dir = %out_dir.display(), error = %e, "Failed to create output directory");
                    report.add_issue(
                        Issue::new(IssueKind::IoFailure, e.to_string())
                            .with_context(out_dir.display().to_string()),
                    );
                    report.copy_failures += 1;
                    unavailable.insert(out_dir);
                    continue;
                }
                prepared.insert(out_dir);
            }

            self.copy_record(record, report).await;
        }

        for (out_dir, records) in &by_dir {
            if unavailable.contains(out_dir) {
                continue;
            }
            self.write_manifest(out_dir, records, report).await;
        }
    }

    async fn copy_record(&self, record: &RankedRecord, report: &mut DocumentReport) {
        let source = &record.record.source_path;
        let destination =
            record.output_path(&self.config.subdir, &self.config.default_extension);

        match self.file_system.copy_new(source, &destination).await {
            Ok(CopyOutcome::Copied) => {
                report.copied += 1;
                tracing::debug!(
                    rank = record.rank,
                    source = %source.display(),
                    destination = %destination.display(),
                    "Copied"
                );
                if self.config.verify_copies && !self.is_dry_run() {
                    self.verify(source, &destination, report).await;
                }
            }
            Ok(CopyOutcome::DestinationExists) => {
                report.destinations_existing += 1;
                log_record_skipped!(IssueKind::DestinationExists, destination.display());
                report.add_issue(
                    Issue::new(
                        IssueKind::DestinationExists,
                        format!("Output already exists for {}", record.record.id),
                    )
                    .with_context(destination.display().to_string()),
                );
            }
            Ok(CopyOutcome::SourceMissing) => {
                report.sources_missing += 1;
                log_record_skipped!(IssueKind::SourceFileMissing, source.display());
                report.add_issue(
                    Issue::new(
                        IssueKind::SourceFileMissing,
                        format!("Source file missing for {}", record.record.id),
                    )
                    .with_context(source.display().to_string()),
                );
            }
            Err(e) => {
                report.copy_failures += 1;
                tracing::error!(
                    source = %source.display(),
                    destination = %destination.display(),
                    error = %e,
                    "Copy failed"
                );
                report.add_issue(
                    Issue::new(IssueKind::IoFailure, e.to_string()).with_context(format!(
                        "{} -> {}",
                        source.display(),
                        destination.display()
                    )),
                );
            }
        }
    }

    async fn verify(&self, source: &Path, destination: &Path, report: &mut DocumentReport) {
        match verify_copy(source, destination).await {
            Ok(verification) if verification.matches() => report.verified += 1,
            Ok(verification) => report.add_issue(
                Issue::new(
                    IssueKind::ChecksumMismatch,
                    format!(
                        "Copy checksum {} differs from source checksum {}",
                        verification.copy_checksum, verification.source_checksum
                    ),
                )
                .with_context(destination.display().to_string()),
            ),
            Err(e) => report.add_issue(
                Issue::new(IssueKind::IoFailure, e.to_string())
                    .with_context(destination.display().to_string()),
            ),
        }
    }

    async fn write_manifest(
        &self,
        out_dir: &Path,
        records: &[&RankedRecord],
        report: &mut DocumentReport,
    ) {
        let path = out_dir.join(&self.config.manifest_name);
        let overwrite = self.config.manifest_policy == ManifestPolicy::Overwrite;

        let written = match render_manifest(records.iter().copied()) {
            Ok(contents) => self.file_system.write_file(&path, &contents, overwrite).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(WriteOutcome::Written) => {
                report.manifests_written += 1;
                tracing::info!(manifest = %path.display(), rows = records.len(), "Wrote manifest");
            }
            Ok(WriteOutcome::AlreadyExists) => {
                report.manifests_existing += 1;
                log_record_skipped!(IssueKind::ManifestExists, path.display());
                report.add_issue(
                    Issue::new(IssueKind::ManifestExists, "Manifest already exists")
                        .with_context(path.display().to_string()),
                );
            }
            Err(e) => {
                tracing::error!(manifest = %path.display(), error = %e, "Failed to write manifest");
                report.add_issue(
                    Issue::new(IssueKind::IoFailure, e.to_string())
                        .with_context(path.display().to_string()),
                );
            }
        }
    }
}
