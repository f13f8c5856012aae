//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RenumberConfig;
use crate::domain::errors::RenumberError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Configuration file looked up when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "renumber.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RenumberConfig
/// 4. Applies environment variable overrides (RENUMBER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use renumber::config::loader::load_config;
///
/// let config = load_config("renumber.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RenumberConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RenumberError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RenumberError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: RenumberConfig = toml::from_str(&contents)
        .map_err(|e| RenumberError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads configuration, falling back to defaults when the default file is absent
///
/// Only [`DEFAULT_CONFIG_PATH`] may be missing; any other path must exist.
/// Environment overrides and validation apply to the defaults as well.
///
/// # Errors
///
/// Same as [`load_config`]
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<RenumberConfig> {
    let path = path.as_ref();
    if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
        tracing::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
        return finish(RenumberConfig::default());
    }
    load_config(path)
}

fn finish(mut config: RenumberConfig) -> Result<RenumberConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RenumberError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RenumberError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(RenumberError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using RENUMBER_* prefix
///
/// Environment variables follow the pattern: RENUMBER_<SECTION>_<KEY>
/// For example: RENUMBER_SCAN_ROOT, RENUMBER_OUTPUT_MANIFEST_POLICY
fn apply_env_overrides(config: &mut RenumberConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("RENUMBER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool("RENUMBER_APPLICATION_DRY_RUN", &val)?;
    }

    // Scan overrides
    if let Ok(val) = std::env::var("RENUMBER_SCAN_ROOT") {
        config.scan.root = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_SCAN_BASE_DIR") {
        config.scan.base_dir = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_SCAN_DOCUMENT_EXTENSION") {
        config.scan.document_extension = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_SCAN_DOCS_DIR") {
        config.scan.docs_dir = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_SCAN_FOLLOW_LINKS") {
        config.scan.follow_links = parse_bool("RENUMBER_SCAN_FOLLOW_LINKS", &val)?;
    }
    if let Ok(val) = std::env::var("RENUMBER_SCAN_MAX_DEPTH") {
        config.scan.max_depth = val.parse().map_err(|_| {
            RenumberError::Configuration(format!(
                "Invalid RENUMBER_SCAN_MAX_DEPTH: {val}"
            ))
        })?;
    }

    // Output overrides
    if let Ok(val) = std::env::var("RENUMBER_OUTPUT_SUBDIR") {
        config.output.subdir = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_OUTPUT_MANIFEST_NAME") {
        config.output.manifest_name = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_OUTPUT_MANIFEST_POLICY") {
        config.output.manifest_policy = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_OUTPUT_DEFAULT_EXTENSION") {
        config.output.default_extension = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_OUTPUT_NAIVE_TIMEZONE") {
        config.output.naive_timezone = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_OUTPUT_VERIFY_COPIES") {
        config.output.verify_copies = parse_bool("RENUMBER_OUTPUT_VERIFY_COPIES", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RENUMBER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("RENUMBER_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("RENUMBER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("RENUMBER_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        RenumberError::Configuration(format!(
            "Invalid {name}: '{value}' (expected true or false)"
        ))
    })
}
