//! Collaborators around the renumbering core
//!
//! - [`xml`] - Metadata document parsing into a tagged node tree
//! - [`fs`] - Document discovery and the filesystem writes of a run
//! - [`manifest`] - Per-batch CSV manifest rendering

pub mod fs;
pub mod manifest;
pub mod xml;
