//! Run command implementation
//!
//! Discovers every metadata document under the scan root and writes the
//! renamed copies and manifests.

use crate::config::{load_config_or_default, RenumberConfig};
use crate::core::renumber::{RenumberCoordinator, RunSummary};
use crate::domain::RenumberError;
use clap::Args;
use tokio::sync::watch;

/// Most issues printed in the text summary
const MAX_LISTED_ISSUES: usize = 20;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Override the scan root
    #[arg(long)]
    pub root: Option<String>,

    /// Override the directory location references are resolved against
    #[arg(long)]
    pub base_dir: Option<String>,

    /// Report what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Verify each copy against its source with SHA-256
    #[arg(long)]
    pub verify: bool,

    /// Override the manifest policy (skip or overwrite)
    #[arg(long, value_name = "POLICY")]
    pub manifest_policy: Option<String>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let coordinator = match RenumberCoordinator::new(&config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create coordinator");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        if config.application.dry_run && !self.json {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let summary = match coordinator.execute().await {
            Ok(summary) => summary,
            Err(e @ RenumberError::Discovery(_)) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(5);
            }
            Err(e) => return Err(e.into()),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }

        Ok(exit_code(&summary))
    }

    fn apply_overrides(&self, config: &mut RenumberConfig) {
        if let Some(root) = &self.root {
            tracing::info!(root = %root, "Overriding scan root from CLI");
            config.scan.root = root.clone();
        }
        if let Some(base_dir) = &self.base_dir {
            tracing::info!(base_dir = %base_dir, "Overriding base directory from CLI");
            config.scan.base_dir = base_dir.clone();
        }
        if self.dry_run {
            config.application.dry_run = true;
        }
        if self.verify {
            config.output.verify_copies = true;
        }
        if let Some(policy) = &self.manifest_policy {
            config.output.manifest_policy = policy.clone();
        }
    }
}

/// Exit code for a finished run
pub fn exit_code(summary: &RunSummary) -> i32 {
    if summary.interrupted {
        130
    } else if summary.is_successful() {
        0
    } else {
        1
    }
}

fn print_summary(summary: &RunSummary) {
    println!("📊 Run Summary ({})", summary.run_id);
    println!("  Documents Found: {}", summary.documents_found);
    println!("  Documents Processed: {}", summary.documents_processed);
    println!("  Documents Skipped: {}", summary.documents_skipped);
    println!("  Records Ranked: {}", summary.records_ranked);
    println!("  Files Copied: {}", summary.files_copied);
    println!("  Already Present: {}", summary.destinations_existing);
    println!("  Sources Missing: {}", summary.sources_missing);
    println!("  Copy Failures: {}", summary.copy_failures);
    if summary.copies_verified > 0 {
        println!("  Copies Verified: {}", summary.copies_verified);
    }
    println!("  Manifests Written: {}", summary.manifests_written);
    println!("  Duration: {:.2}s", summary.duration_ms as f64 / 1000.0);
    println!();

    let problems: Vec<_> = summary
        .all_issues()
        .filter(|issue| !issue.kind.is_skip())
        .collect();
    if !problems.is_empty() {
        println!("⚠️  Issues:");
        for issue in problems.iter().take(MAX_LISTED_ISSUES) {
            println!("  - {}: {}", issue.kind, issue.message);
            if let Some(context) = &issue.context {
                println!("    Context: {context}");
            }
        }
        if problems.len() > MAX_LISTED_ISSUES {
            println!("  ... and {} more", problems.len() - MAX_LISTED_ISSUES);
        }
        println!();
    }

    if summary.interrupted {
        println!("⚠️  Run interrupted. Re-running skips files that were already copied.");
    } else if problems.is_empty() {
        println!("✅ Run completed successfully!");
    } else {
        println!("⚠️  Run completed with issues");
    }
}
