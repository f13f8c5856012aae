//! Renumbering runs
//!
//! [`RenumberCoordinator`] discovers documents and processes them one at a time;
//! [`BatchWriter`] performs the copies and manifest writes of one batch;
//! [`RunSummary`] collects what happened.

pub mod batch;
pub mod coordinator;
pub mod summary;

pub use batch::{BatchConfig, BatchWriter};
pub use coordinator::RenumberCoordinator;
pub use summary::{DocumentOutcome, DocumentReport, Issue, IssueKind, RunSummary};
