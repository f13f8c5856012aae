//! Domain error types
//!
//! This module defines the error hierarchy for renumber. Record-level problems
//! are kept separate from run/document-level problems so callers can decide
//! which ones stop a unit of work and which ones are only reported.

use thiserror::Error;

/// Main renumber error type
///
/// Used for configuration, discovery and document-level failures.
/// Record-level failures are reported as [`RecordError`] instead.
#[derive(Debug, Error)]
pub enum RenumberError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The scan root could not be enumerated
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// A metadata document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A metadata document has no file section
    #[error("No file section found in {0}")]
    MissingFileSection(String),

    /// Manifest rendering errors
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Serialization errors (JSON reports)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors tied to one file entry of a metadata document
///
/// None of these abort the enclosing batch; the entry is excluded and reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field is missing or blank
    #[error("file entry #{position} ({}) is missing required field {field}", .id.as_deref().unwrap_or("no ID"))]
    MalformedRecord {
        /// 1-based position of the entry in document order
        position: usize,
        /// Identifier, when the entry has one
        id: Option<String>,
        /// Name of the missing field
        field: &'static str,
    },

    /// The location reference does not have the `<root>\<batchDir>\<filename>` shape
    #[error("location '{href}' splits into {segments} segment(s), expected 3 non-empty segments")]
    UnparseablePath {
        /// The raw location reference
        href: String,
        /// Number of segments found
        segments: usize,
    },

    /// The creation timestamp is not a valid date-time
    #[error("file entry {id} has unparseable CREATED timestamp '{value}'")]
    UnparseableTimestamp {
        /// Identifier of the entry
        id: String,
        /// The raw timestamp value
        value: String,
    },
}

impl RecordError {
    /// Short name of the error kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::MalformedRecord { .. } => "malformed_record",
            RecordError::UnparseablePath { .. } => "unparseable_path",
            RecordError::UnparseableTimestamp { .. } => "unparseable_timestamp",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RenumberError {
    fn from(err: std::io::Error) -> Self {
        RenumberError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RenumberError {
    fn from(err: serde_json::Error) -> Self {
        RenumberError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RenumberError {
    fn from(err: toml::de::Error) -> Self {
        RenumberError::Configuration(format!("TOML parse error: {err}"))
    }
}
