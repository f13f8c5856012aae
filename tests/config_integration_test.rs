//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX so they do not
//! interfere with each other.

use renumber::config::{load_config, load_config_or_default, RenumberConfig};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDES: [&str; 6] = [
    "RENUMBER_APPLICATION_LOG_LEVEL",
    "RENUMBER_APPLICATION_DRY_RUN",
    "RENUMBER_SCAN_ROOT",
    "RENUMBER_SCAN_MAX_DEPTH",
    "RENUMBER_OUTPUT_MANIFEST_POLICY",
    "RENUMBER_OUTPUT_VERIFY_COPIES",
];

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for name in OVERRIDES {
        std::env::remove_var(name);
    }
    std::env::remove_var("TEST_RENUMBER_ARCHIVE");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[scan]
root = "/archive/NIPNE/DOCS"
base_dir = "/archive"
document_extension = "xml"
docs_dir = "IMAGES"
follow_links = true
max_depth = 8

[output]
subdir = "ordered"
manifest_name = "order.csv"
manifest_policy = "overwrite"
default_extension = "jpg"
naive_timezone = "local"
verify_copies = true

[logging]
local_enabled = true
local_path = "/var/log/renumber"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.scan.root, "/archive/NIPNE/DOCS");
    assert_eq!(config.scan.base_dir, "/archive");
    assert_eq!(config.scan.document_extension, "xml");
    assert_eq!(config.scan.docs_dir, "IMAGES");
    assert!(config.scan.follow_links);
    assert_eq!(config.scan.max_depth, 8);
    assert_eq!(config.output.subdir, "ordered");
    assert_eq!(config.output.manifest_name, "order.csv");
    assert_eq!(config.output.manifest_policy, "overwrite");
    assert_eq!(config.output.default_extension, "jpg");
    assert_eq!(config.output.naive_timezone, "local");
    assert!(config.output.verify_copies);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_RENUMBER_ARCHIVE", "/mnt/archive");

    let file = write_config(
        r#"
[scan]
root = "${TEST_RENUMBER_ARCHIVE}/DOCS"
base_dir = "${TEST_RENUMBER_ARCHIVE}"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.scan.root, "/mnt/archive/DOCS");
    assert_eq!(config.scan.base_dir, "/mnt/archive");
    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[scan]\nroot = \"${TEST_RENUMBER_ARCHIVE}\"\n");
    let err = load_config(file.path()).unwrap_err();

    assert!(err.to_string().contains("TEST_RENUMBER_ARCHIVE"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("RENUMBER_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("RENUMBER_APPLICATION_DRY_RUN", "true");
    std::env::set_var("RENUMBER_SCAN_ROOT", "/override/DOCS");
    std::env::set_var("RENUMBER_SCAN_MAX_DEPTH", "3");
    std::env::set_var("RENUMBER_OUTPUT_MANIFEST_POLICY", "overwrite");
    std::env::set_var("RENUMBER_OUTPUT_VERIFY_COPIES", "true");

    let file = write_config(
        r#"
[application]
log_level = "info"

[scan]
root = "/from/file"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert!(config.application.dry_run);
    assert_eq!(config.scan.root, "/override/DOCS");
    assert_eq!(config.scan.max_depth, 3);
    assert_eq!(config.output.manifest_policy, "overwrite");
    assert!(config.output.verify_copies);
    cleanup_env_vars();
}

#[test]
fn test_invalid_override_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("RENUMBER_APPLICATION_DRY_RUN", "maybe");

    let file = write_config("");
    let result = load_config(file.path());

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("RENUMBER_APPLICATION_DRY_RUN"));
    cleanup_env_vars();
}

#[test]
fn test_override_is_validated() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("RENUMBER_OUTPUT_MANIFEST_POLICY", "append");

    let file = write_config("");
    let result = load_config(file.path());

    assert!(result.is_err());
    cleanup_env_vars();
}

#[test]
fn test_invalid_values_fail_validation() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[scan]\ndocs_dir = \"DOCS/IMAGES\"\n",
        "[scan]\nmax_depth = 0\n",
        "[output]\nsubdir = \"..\"\n",
        "[output]\nnaive_timezone = \"mars\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "accepted: {contents}");
    }
}

#[test]
fn test_malformed_toml_fails() {
    let file = write_config("[scan\nroot = ");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_unknown_path_is_an_error() {
    let result = load_config_or_default("/nonexistent/dir/custom.toml");
    assert!(result.is_err());
}

#[test]
fn test_serialized_defaults_round_trip_through_loader() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let rendered = toml::to_string(&RenumberConfig::default()).unwrap();
    let file = write_config(&rendered);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.scan.root, "./DOCS");
    assert_eq!(config.output.manifest_policy, "skip");
}
