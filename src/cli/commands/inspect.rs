//! Inspect command implementation
//!
//! Parses and ranks a single metadata document and prints the result. Nothing
//! is written.

use crate::adapters::xml::load_document;
use crate::config::load_config_or_default;
use crate::core::normalize::PathLayout;
use crate::core::plan::{plan_batch, BatchPlan, PlanOptions};
use crate::core::renumber::Issue;
use crate::domain::NaiveTimezone;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Metadata document to inspect
    pub document: PathBuf,

    /// Print the ranking as JSON
    #[arg(long)]
    pub json: bool,
}

/// One ranked record as shown by `inspect`
#[derive(Debug, Serialize)]
pub struct InspectRow {
    /// Zero-based chronological rank
    pub rank: usize,
    /// Creation instant in milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    /// `CREATED` as written in the document
    pub created: String,
    /// `GROUPID` attribute
    pub group_id: String,
    /// `ID` attribute
    pub id: String,
    /// Resolved path of the source image
    pub source_path: PathBuf,
    /// Where `run` would write the copy
    pub output_path: PathBuf,
}

/// What `inspect` reports for a document
#[derive(Debug, Serialize)]
pub struct InspectReport {
    /// Path of the inspected metadata document
    pub document: PathBuf,
    /// File entries found in the file section
    pub entries_found: usize,
    /// Records in rank order
    pub ranked: Vec<InspectRow>,
    /// Entries excluded from ranking
    pub rejected: Vec<Issue>,
}

impl InspectReport {
    /// Build the report from a plan
    pub fn from_plan(
        document: PathBuf,
        plan: &BatchPlan,
        subdir: &str,
        default_extension: &str,
    ) -> Self {
        let ranked = plan
            .ranked
            .iter()
            .map(|r| InspectRow {
                rank: r.rank,
                timestamp_ms: r.timestamp_ms(),
                created: r.record.created.clone(),
                group_id: r.record.group_id.to_string(),
                id: r.record.id.to_string(),
                source_path: r.record.source_path.clone(),
                output_path: r.output_path(subdir, default_extension),
            })
            .collect();

        Self {
            document,
            entries_found: plan.entries_found,
            ranked,
            rejected: plan.rejected.iter().map(Issue::from).collect(),
        }
    }
}

impl InspectArgs {
    /// Execute the inspect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let options = PlanOptions {
            layout: PathLayout::new(&config.scan.base_dir, config.scan.docs_dir.clone()),
            naive_timezone: NaiveTimezone::from_str(&config.output.naive_timezone)?,
        };

        let root = match load_document(&self.document).await {
            Ok(root) => root,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load metadata document");
                eprintln!("❌ {e}");
                return Ok(1);
            }
        };

        let name = self.document.display().to_string();
        let plan = match plan_batch(&root, &name, &options) {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(1);
            }
        };

        let report = InspectReport::from_plan(
            self.document.clone(),
            &plan,
            &config.output.subdir,
            &config.output.default_extension,
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }

        Ok(if report.rejected.is_empty() { 0 } else { 1 })
    }
}

fn print_report(report: &InspectReport) {
    println!("📄 {}", report.document.display());
    println!(
        "  Entries: {}  Ranked: {}  Rejected: {}",
        report.entries_found,
        report.ranked.len(),
        report.rejected.len()
    );
    println!();

    for row in &report.ranked {
        println!(
            "  {:>5}  {}  {:<10}  {}",
            row.rank,
            row.created,
            row.id,
            row.source_path.display()
        );
        println!("         -> {}", row.output_path.display());
    }

    if !report.rejected.is_empty() {
        println!();
        println!("⚠️  Rejected entries:");
        for issue in &report.rejected {
            println!("  - {}: {}", issue.kind, issue.message);
        }
    }
}
