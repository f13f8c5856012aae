//! Domain models and types for renumber.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`FileId`], [`GroupId`]) taken from the metadata document
//! - **Record shapes** ([`RawFileEntry`], [`FileRecord`], [`RankedRecord`])
//! - **Timestamp parsing** ([`parse_created`], [`NaiveTimezone`])
//! - **Error types** ([`RenumberError`], [`RecordError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! ```rust
//! use renumber::domain::{RenumberError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(RenumberError::MissingFileSection("BATCH/DOCS/SUB/batch.mets".into()))
//! }
//!
//! assert!(matches!(example(), Err(RenumberError::MissingFileSection(_))));
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod timestamp;

// Re-export commonly used types for convenience
pub use errors::{RecordError, RenumberError};
pub use ids::{FileId, GroupId};
pub use record::{FileRecord, RankedRecord, RawFileEntry};
pub use result::Result;
pub use timestamp::{parse_created, NaiveTimezone};
