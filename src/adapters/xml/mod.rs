//! Metadata document parsing
//!
//! Turns a METS document into the tagged [`Node`] tree the walker consumes.

pub mod node;
pub mod parser;

pub use node::{local_name, Element, Node};
pub use parser::parse_document;

use crate::domain::{RenumberError, Result};
use std::path::Path;

/// Read and parse a metadata document from disk
pub async fn load_document(path: &Path) -> Result<Node> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        RenumberError::Io(format!("Failed to read {}: {e}", path.display()))
    })?;
    let text = String::from_utf8(bytes).map_err(|e| {
        RenumberError::Parse(format!("{} is not valid UTF-8: {e}", path.display()))
    })?;

    parse_document(&text).map_err(|e| match e {
        RenumberError::Parse(msg) => RenumberError::Parse(format!("{}: {msg}", path.display())),
        other => other,
    })
}
