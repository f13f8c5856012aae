//! Validate config command implementation

use crate::config::{load_config_or_default, RenumberConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates as well
        match load_config_or_default(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_config(&config);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

fn print_config(config: &RenumberConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);
    println!("  Scan Root: {}", config.scan.root);
    println!("  Base Directory: {}", config.scan.base_dir);
    println!("  Docs Directory: {}", config.scan.docs_dir);
    println!("  Document Extension: .{}", config.scan.document_extension);
    println!("  Output Subdirectory: {}", config.output.subdir);
    println!(
        "  Manifest: {} ({})",
        config.output.manifest_name, config.output.manifest_policy
    );
    println!("  Naive Timezone: {}", config.output.naive_timezone);
    println!("  Verify Copies: {}", config.output.verify_copies);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\nroot = \"/archive/DOCS\"").unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().display().to_string())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\nmax_depth = 0").unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().display().to_string())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_missing_explicit_file() {
        let code = ValidateArgs {}
            .execute("/nonexistent/renumber-custom.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
