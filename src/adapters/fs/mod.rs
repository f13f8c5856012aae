//! Filesystem access
//!
//! - [`discovery`] finds metadata documents below the scan root
//! - [`traits::FileSystem`] abstracts the writes a run performs, with a
//!   [`local`] implementation and a [`dry_run`] one that writes nothing

pub mod discovery;
pub mod dry_run;
pub mod factory;
pub mod local;
pub mod traits;

pub use discovery::{discover_documents, Discovered, DiscoveryOptions};
pub use dry_run::DryRunFileSystem;
pub use factory::create_file_system;
pub use local::LocalFileSystem;
pub use traits::{CopyOutcome, FileSystem, WriteOutcome};
