//! Storage module for persisting analysis results
//!
//! This module holds the durable side of an analysis:
//! - `AnalysisRecord`: the persisted row created at submission and updated
//!   once at job completion
//! - `RecordStore`: the create/read/update/delete contract the pipeline
//!   depends on
//! - `SqliteStore`: the SQLite-backed implementation

mod record;
mod sqlite;
mod traits;

pub use record::{active_until, AnalysisRecord};
pub use sqlite::SqliteStore;
pub use traits::{RecordStore, StoreError, StoreResult};

use crate::PagelensError;
use std::path::Path;

/// Initializes or opens the record store database
pub fn open_store(path: &Path) -> Result<SqliteStore, PagelensError> {
    Ok(SqliteStore::new(path)?)
}
