//! Core renumbering logic.
//!
//! # Modules
//!
//! - [`walk`] - Flattens a document's file section into raw file entries
//! - [`normalize`] - Resolves location references into batch and source paths
//! - [`rank`] - Assigns stable chronological ranks
//! - [`plan`] - Runs the three stages above for one document
//! - [`renumber`] - Run orchestration, copying and manifests
//! - [`verification`] - Checksum comparison of copies
//!
//! # Workflow
//!
//! 1. **Discover**: find metadata documents below the scan root
//! 2. **Parse**: read each document into a node tree
//! 3. **Plan**: walk, normalize and rank its file entries
//! 4. **Write**: copy each record to `<timestamp_ms>_<rank>.<ext>` in ascending rank
//! 5. **Manifest**: write one CSV per output directory
//! 6. **Report**: return a run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use renumber::config::load_config;
//! use renumber::core::renumber::RenumberCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("renumber.toml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let coordinator = RenumberCoordinator::new(&config, shutdown_rx)?;
//! let summary = coordinator.execute().await?;
//!
//! println!("Copied: {}", summary.files_copied);
//! println!("Skipped: {}", summary.destinations_existing);
//! # Ok(())
//! # }
//! ```

pub mod normalize;
pub mod plan;
pub mod rank;
pub mod renumber;
pub mod verification;
pub mod walk;
