//! Record store trait and error types

use crate::storage::AnalysisRecord;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(i64),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Contract between the analysis pipeline and the durable record store
///
/// The pipeline uses exactly two of these at job completion: `find_by_id`
/// to load the row created at submission, and `update` to write the final
/// analyzed state. The rest serve the operation boundary (listing,
/// re-running, deleting records).
pub trait RecordStore {
    /// Inserts a record and returns its assigned id
    fn create(&mut self, record: &AnalysisRecord) -> StoreResult<i64>;

    /// Loads a record by id; NotFound if absent
    fn find_by_id(&self, id: i64) -> StoreResult<AnalysisRecord>;

    /// Writes all fields of an existing record; NotFound if absent
    fn update(&mut self, record: &AnalysisRecord) -> StoreResult<()>;

    /// Returns all records ordered by submission time, newest first
    fn find_all(&self) -> StoreResult<Vec<AnalysisRecord>>;

    /// Deletes a record by id; NotFound if absent
    fn delete(&mut self, id: i64) -> StoreResult<()>;
}
