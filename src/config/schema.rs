//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) is a valid
//! configuration.

use crate::adapters::manifest::ManifestPolicy;
use crate::domain::NaiveTimezone;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main renumber configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenumberConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Where metadata documents and source images are found
    #[serde(default)]
    pub scan: ScanConfig,

    /// Where and how renamed copies and manifests are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RenumberConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.scan.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (report what would be copied, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Document discovery and source layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory searched recursively for metadata documents
    #[serde(default = "default_scan_root")]
    pub root: String,

    /// Directory that `<root>` segments of location references are relative to
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// Metadata document extension, without the dot
    #[serde(default = "default_document_extension")]
    pub document_extension: String,

    /// Directory name between `<root>` and `<batchDir>` in source paths
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Follow symbolic links while discovering documents
    #[serde(default)]
    pub follow_links: bool,

    /// Maximum directory depth searched below the scan root
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl ScanConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.trim().is_empty() {
            return Err("scan.root cannot be empty".to_string());
        }
        if self.base_dir.trim().is_empty() {
            return Err("scan.base_dir cannot be empty".to_string());
        }
        validate_extension("scan.document_extension", &self.document_extension)?;
        validate_name("scan.docs_dir", &self.docs_dir)?;
        if self.max_depth == 0 {
            return Err("scan.max_depth must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: default_scan_root(),
            base_dir: default_base_dir(),
            document_extension: default_document_extension(),
            docs_dir: default_docs_dir(),
            follow_links: false,
            max_depth: default_max_depth(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Subdirectory of each batch directory that receives the renamed copies
    #[serde(default = "default_subdir")]
    pub subdir: String,

    /// File name of the per-batch manifest
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,

    /// What to do when the manifest already exists (skip or overwrite)
    #[serde(default = "default_manifest_policy")]
    pub manifest_policy: String,

    /// Extension used when a source file has none
    #[serde(default = "default_extension")]
    pub default_extension: String,

    /// Zone for `CREATED` values without a UTC offset (utc or local)
    #[serde(default = "default_naive_timezone")]
    pub naive_timezone: String,

    /// Compare SHA-256 checksums of source and copy after each copy
    #[serde(default)]
    pub verify_copies: bool,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        validate_name("output.subdir", &self.subdir)?;
        validate_name("output.manifest_name", &self.manifest_name)?;
        validate_extension("output.default_extension", &self.default_extension)?;
        ManifestPolicy::from_str(&self.manifest_policy).map_err(|e| e.to_string())?;
        NaiveTimezone::from_str(&self.naive_timezone).map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            subdir: default_subdir(),
            manifest_name: default_manifest_name(),
            manifest_policy: default_manifest_policy(),
            default_extension: default_extension(),
            naive_timezone: default_naive_timezone(),
            verify_copies: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// A single path component: non-empty, no separators, not `.` or `..`
fn validate_name(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if value.contains('/') || value.contains('\\') {
        return Err(format!("{field} must be a single name, got '{value}'"));
    }
    if value == "." || value == ".." {
        return Err(format!("{field} cannot be '{value}'"));
    }
    Ok(())
}

fn validate_extension(field: &str, value: &str) -> Result<(), String> {
    validate_name(field, value)?;
    if value.starts_with('.') {
        return Err(format!(
            "{field} must not start with a dot, got '{value}'"
        ));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_scan_root() -> String {
    "./DOCS".to_string()
}

fn default_base_dir() -> String {
    ".".to_string()
}

fn default_document_extension() -> String {
    "mets".to_string()
}

fn default_docs_dir() -> String {
    "DOCS".to_string()
}

fn default_max_depth() -> usize {
    32
}

fn default_subdir() -> String {
    "renumbered".to_string()
}

fn default_manifest_name() -> String {
    "manifest.csv".to_string()
}

fn default_manifest_policy() -> String {
    "skip".to_string()
}

fn default_extension() -> String {
    "tif".to_string()
}

fn default_naive_timezone() -> String {
    "utc".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RenumberConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scan.root, "./DOCS");
        assert_eq!(config.scan.document_extension, "mets");
        assert_eq!(config.output.subdir, "renumbered");
        assert_eq!(config.output.manifest_policy, "skip");
        assert!(!config.application.dry_run);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RenumberConfig = toml::from_str("").unwrap();
        assert_eq!(config.scan.docs_dir, "DOCS");
        assert_eq!(config.output.naive_timezone, "utc");
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: RenumberConfig = toml::from_str("[output]\nsubdir = \"ordered\"\n").unwrap();
        assert_eq!(config.output.subdir, "ordered");
        assert_eq!(config.output.manifest_name, "manifest.csv");
    }

    #[test]
    fn test_application_log_level_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scan_config_validation() {
        let mut config = ScanConfig::default();
        assert!(config.validate().is_ok());

        config.document_extension = ".mets".to_string();
        assert!(config.validate().is_err());

        config.document_extension = "mets".to_string();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        config.max_depth = 4;
        config.docs_dir = "DOCS/more".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_config_validation() {
        let mut config = OutputConfig::default();
        assert!(config.validate().is_ok());

        config.subdir = "..".to_string();
        assert!(config.validate().is_err());

        config.subdir = "renumbered".to_string();
        config.manifest_policy = "append".to_string();
        assert!(config.validate().is_err());

        config.manifest_policy = "overwrite".to_string();
        config.naive_timezone = "cet".to_string();
        assert!(config.validate().is_err());

        config.naive_timezone = "local".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "never".to_string();
        config.local_enabled = true;
        config.local_path = " ".to_string();
        assert!(config.validate().is_err());
    }
}
