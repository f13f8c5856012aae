//! Shared fixtures for integration tests

#![allow(dead_code)]

use renumber::config::RenumberConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scan tree laid out as `<tmp>/BATCH/DOCS/<sub>/...`
pub struct ScanTree {
    pub dir: TempDir,
}

impl ScanTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn base(&self) -> &Path {
        self.dir.path()
    }

    pub fn scan_root(&self) -> PathBuf {
        self.base().join("BATCH/DOCS")
    }

    pub fn batch_dir(&self, sub: &str) -> PathBuf {
        self.scan_root().join(sub)
    }

    pub fn output_dir(&self, sub: &str) -> PathBuf {
        self.batch_dir(sub).join("renumbered")
    }

    /// Write a source image with its own name as content
    pub fn image(&self, sub: &str, name: &str) -> PathBuf {
        let path = self.batch_dir(sub).join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    pub fn document(&self, sub: &str, name: &str, xml: &str) -> PathBuf {
        let path = self.batch_dir(sub).join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, xml).unwrap();
        path
    }

    pub fn config(&self) -> RenumberConfig {
        let mut config = RenumberConfig::default();
        config.scan.root = self.scan_root().display().to_string();
        config.scan.base_dir = self.base().display().to_string();
        config
    }
}

/// One `mets:file` entry
pub fn file_entry(id: &str, created: &str, href: &str) -> String {
    format!(
        r#"<mets:file ID="{id}" GROUPID="GRP" CREATED="{created}" MIMETYPE="image/tiff"><mets:FLocat LOCTYPE="URL" xlink:href="{href}"/></mets:file>"#
    )
}

/// A METS document with one file group holding `entries`
pub fn mets(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<mets:mets xmlns:mets="http://www.loc.gov/METS/" xmlns:xlink="http://www.w3.org/1999/xlink">
  <mets:dmdSec ID="DMD1"/>
  <mets:fileSec>
    <mets:fileGrp USE="MASTER">
      {}
    </mets:fileGrp>
  </mets:fileSec>
  <mets:structMap TYPE="physical"/>
</mets:mets>"#,
        entries.join("\n      ")
    )
}

/// Milliseconds since the epoch of a UTC `YYYY-MM-DDTHH:MM:SS` value
pub fn millis(value: &str) -> i64 {
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .unwrap()
        .and_utc()
        .timestamp_millis()
}
