//! Configuration management for renumber.
//!
//! Configuration is read from a TOML file with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RENUMBER_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! dry_run = false
//!
//! [scan]
//! root = "/archive/NIPNE/DOCS"
//! base_dir = "/archive"
//! document_extension = "mets"
//! docs_dir = "DOCS"
//!
//! [output]
//! subdir = "renumbered"
//! manifest_name = "manifest.csv"
//! manifest_policy = "skip"
//! default_extension = "tif"
//! naive_timezone = "utc"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use renumber::config::load_config;
//!
//! # fn example() {
//! match load_config("renumber.toml") {
//!     Ok(config) => println!("Scanning {}", config.scan.root),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
pub use schema::{ApplicationConfig, LoggingConfig, OutputConfig, RenumberConfig, ScanConfig};
