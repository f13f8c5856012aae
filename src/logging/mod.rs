//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use renumber::logging::init_logging;
//! use renumber::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, parse_rotation, LoggingGuard};

/// Log the start of a batch
///
/// # Example
///
/// ```no_run
/// use renumber::log_batch_start;
///
/// log_batch_start!("DOCS/NIPNE/batch.mets", 42);
/// ```
#[macro_export]
macro_rules! log_batch_start {
    ($document:expr, $entries:expr) => {
        tracing::info!(
            document = %$document,
            entries = $entries,
            "Processing batch"
        );
    };
}

/// Log the completion of a batch
///
/// # Example
///
/// ```no_run
/// use renumber::log_batch_complete;
/// use std::time::Duration;
///
/// log_batch_complete!("DOCS/NIPNE/batch.mets", 40, Duration::from_millis(250));
/// ```
#[macro_export]
macro_rules! log_batch_complete {
    ($document:expr, $copied:expr, $duration:expr) => {
        tracing::info!(
            document = %$document,
            copied = $copied,
            duration_ms = $duration.as_millis(),
            "Batch completed"
        );
    };
}

/// Log a record or manifest that was skipped
///
/// # Example
///
/// ```no_run
/// use renumber::log_record_skipped;
///
/// log_record_skipped!("DestinationExists", "renumbered/1672567200000_0.tif");
/// ```
#[macro_export]
macro_rules! log_record_skipped {
    ($kind:expr, $path:expr) => {
        tracing::info!(
            kind = %$kind,
            path = %$path,
            "Skipped"
        );
    };
}
