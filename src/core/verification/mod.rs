//! Copy verification
//!
//! Confirms that renamed copies are byte-identical to their sources.

pub mod checksum;
pub mod verify;

pub use checksum::{calculate_checksum_bytes, file_checksum};
pub use verify::{verify_copy, CopyVerification};
