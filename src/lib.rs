// Renumber - Chronological renaming of scanned image batches
// Copyright (c) 2025 Renumber Contributors
// Licensed under the MIT License

//! # Renumber - chronological renaming of scanned image batches
//!
//! Scanning workflows record each image's creation time in a METS metadata
//! document next to the batch. Renumber reads those documents, orders every
//! batch's images by creation instant and copies them into an output
//! subdirectory as `<unix_millis>_<rank>.<ext>`, with a CSV manifest mapping
//! the new names back to the originals. Source files are never modified, and
//! existing outputs are never overwritten.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Walking, normalizing and ranking file entries; run orchestration
//! - [`adapters`] - XML parsing, filesystem access, manifest rendering
//! - [`domain`] - Records, identifiers, timestamps and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use renumber::config::load_config;
//! use renumber::core::renumber::RenumberCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("renumber.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = RenumberCoordinator::new(&config, shutdown_rx)?;
//!     let summary = coordinator.execute().await?;
//!
//!     println!("Copied {} files", summary.files_copied);
//!     Ok(())
//! }
//! ```
//!
//! ## Ranking
//!
//! Ranks are zero-based positions in ascending creation-instant order. Values
//! are compared as instants, so `2023-01-01T10:00:00Z` and
//! `2023-01-01T12:00:00+02:00` are equal. Equal instants keep document order.
//!
//! ```rust
//! use renumber::adapters::xml::parse_document;
//! use renumber::core::plan::{plan_batch, PlanOptions};
//!
//! let root = parse_document(r#"
//!   <mets><fileSec><fileGrp>
//!     <file ID="a" GROUPID="g" CREATED="2023-01-01T10:00:00"><FLocat href="R\B\a.tif"/></file>
//!     <file ID="b" GROUPID="g" CREATED="2023-01-01T09:00:00"><FLocat href="R\B\b.tif"/></file>
//!   </fileGrp></fileSec></mets>"#).unwrap();
//!
//! let plan = plan_batch(&root, "batch.mets", &PlanOptions::default()).unwrap();
//! let names: Vec<_> = plan.ranked.iter().map(|r| r.output_file_name("tif")).collect();
//! assert_eq!(names, vec!["1672563600000_0.tif", "1672567200000_1.tif"]);
//! ```
//!
//! ## Error Handling
//!
//! Fallible library functions return [`domain::Result`] with
//! [`domain::RenumberError`]. Problems with single file entries are
//! [`domain::RecordError`] values collected alongside the records that
//! succeeded; they never stop a batch.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
