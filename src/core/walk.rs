//! Metadata tree walker
//!
//! Flattens the `fileSec` subtree of one METS document into raw file entries.
//! Grouping containers (`fileGrp`) may nest arbitrarily; each `file` inside a
//! group is a terminal entry. Entries are produced in document order and every
//! required field is validated before an entry is constructed.

use crate::adapters::xml::{Element, Node};
use crate::domain::{FileId, GroupId, RawFileEntry, RecordError};

/// Local name of the file section element
pub const FILE_SECTION: &str = "fileSec";
/// Local name of the grouping container
pub const FILE_GROUP: &str = "fileGrp";
/// Local name of a file entry
pub const FILE_ENTRY: &str = "file";
/// Local name of the location reference inside a file entry
pub const LOCATION: &str = "FLocat";

/// Entries and rejections produced from one file section
///
/// Scoped to a single document; nothing is shared between walks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Valid entries in document order
    pub entries: Vec<RawFileEntry>,
    /// File entries that lacked a required field
    pub rejected: Vec<RecordError>,
}

impl WalkOutcome {
    /// Number of file entries seen, valid or not
    pub fn total(&self) -> usize {
        self.entries.len() + self.rejected.len()
    }
}

/// Locate the file section directly under the document root element
pub fn find_file_section(root: &Node) -> Option<&Element> {
    root.elements()
        .into_iter()
        .find_map(|document| document.children_named(FILE_SECTION).next())
}

/// Walk a file section and collect its file entries
///
/// # Examples
///
/// ```
/// use renumber::adapters::xml::parse_document;
/// use renumber::core::walk::{find_file_section, walk_file_section};
///
/// let root = parse_document(r#"
///   <mets><fileSec><fileGrp>
///     <file ID="F1" GROUPID="G1" CREATED="2023-01-01T10:00:00">
///       <FLocat href="BATCH\SUB\a.tif"/>
///     </file>
///   </fileGrp></fileSec></mets>"#).unwrap();
///
/// let outcome = walk_file_section(find_file_section(&root).unwrap());
/// assert_eq!(outcome.entries.len(), 1);
/// assert_eq!(outcome.entries[0].href, "BATCH\\SUB\\a.tif");
/// ```
pub fn walk_file_section(section: &Element) -> WalkOutcome {
    let mut walker = Walker::default();
    for child in section.child_elements() {
        if child.is(FILE_GROUP) {
            walker.visit_group(child);
        }
    }

    tracing::debug!(
        entries = walker.outcome.entries.len(),
        rejected = walker.outcome.rejected.len(),
        "Walked file section"
    );
    walker.outcome
}

#[derive(Default)]
struct Walker {
    position: usize,
    outcome: WalkOutcome,
}

impl Walker {
    fn visit_group(&mut self, group: &Element) {
        for child in group.child_elements() {
            if child.is(FILE_GROUP) {
                self.visit_group(child);
            } else if child.is(FILE_ENTRY) {
                self.visit_file(child);
            }
        }
    }

    fn visit_file(&mut self, file: &Element) {
        self.position += 1;
        match extract_entry(file, self.position) {
            Ok(entry) => self.outcome.entries.push(entry),
            Err(err) => {
                tracing::warn!(position = self.position, error = %err, "Rejected file entry");
                self.outcome.rejected.push(err);
            }
        }
    }
}

fn extract_entry(file: &Element, position: usize) -> Result<RawFileEntry, RecordError> {
    let raw_id = file.field("ID");
    let missing = |field: &'static str| RecordError::MalformedRecord {
        position,
        id: raw_id.clone(),
        field,
    };

    let id = raw_id
        .as_deref()
        .and_then(|id| FileId::new(id).ok())
        .ok_or_else(|| missing("ID"))?;
    let group_id = file
        .field("GROUPID")
        .and_then(|id| GroupId::new(id).ok())
        .ok_or_else(|| missing("GROUPID"))?;
    let created = file.field("CREATED").ok_or_else(|| missing("CREATED"))?;
    let href = file
        .children_named(LOCATION)
        .next()
        .and_then(|location| location.field("href"))
        .ok_or_else(|| missing("FLocat/href"))?;

    Ok(RawFileEntry {
        position,
        id,
        group_id,
        created,
        href,
    })
}
