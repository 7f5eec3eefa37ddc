//! Document store abstraction
//!
//! The ETL only needs a handful of operations on the target collection:
//! probe, count, clear, bulk insert and two aggregations for the summary.
//! [`DocumentStore`] captures them so the pipeline runs against MongoDB in
//! production and an in-memory store for dry runs and tests.

use crate::domain::{AttackRecord, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result of a bulk insert operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    /// Number of identifiers the store reported as inserted
    pub inserted_count: usize,
}

/// Number of documents sharing one `object_type` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    /// Grouping key; `None` for documents without an `object_type` field
    pub object_type: Option<String>,

    /// Number of documents in the group
    pub count: u64,
}

/// Handle to the target collection of the document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Probe the server
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or rejects the probe.
    async fn test_connection(&self) -> Result<()>;

    /// Count every document in the target collection
    async fn count_documents(&self) -> Result<u64>;

    /// Delete every document in the target collection, returning how many were removed
    async fn delete_all(&self) -> Result<u64>;

    /// Insert all records in a single bulk operation
    async fn insert_records(&self, records: Vec<AttackRecord>) -> Result<InsertResult>;

    /// Count documents grouped by `object_type`, sorted by descending count
    async fn count_by_object_type(&self) -> Result<Vec<TypeCount>>;

    /// Most recent `ingested_at` value in the collection
    async fn latest_ingested_at(&self) -> Result<Option<DateTime<Utc>>>;

    /// Release the connection
    async fn close(&self);

    /// `database.collection` for log output
    fn namespace(&self) -> String;
}
