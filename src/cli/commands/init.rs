//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set scan.root and scan.base_dir in {}", self.output);
                println!("  2. Validate configuration: renumber validate-config");
                println!("  3. Preview one batch: renumber inspect <DOCUMENT>");
                println!("  4. Dry run: renumber run --dry-run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Renumber Configuration File
#
# Values may reference environment variables as ${VAR_NAME}.
# Every key can also be overridden with RENUMBER_<SECTION>_<KEY>,
# e.g. RENUMBER_SCAN_ROOT=/archive/NIPNE/DOCS

[application]
log_level = "info"      # trace | debug | info | warn | error
dry_run = false

[scan]
# Directory searched recursively for metadata documents
root = "./DOCS"
# Location references (<root>\<batchDir>\<file>) resolve to
# <base_dir>/<root>/<docs_dir>/<batchDir>/<file>
base_dir = "."
docs_dir = "DOCS"
document_extension = "mets"
follow_links = false
max_depth = 32

[output]
# Created inside each batch directory
subdir = "renumbered"
manifest_name = "manifest.csv"
manifest_policy = "skip"    # skip | overwrite
# Used for source files without an extension
default_extension = "tif"
# Zone for CREATED values without a UTC offset
naive_timezone = "utc"      # utc | local
verify_copies = false

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"    # daily | hourly | never
"#
        .to_string()
    }
}
