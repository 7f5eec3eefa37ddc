//! In-memory document store
//!
//! Holds BSON documents in a vector, mirroring how the records would look in
//! MongoDB. Dry runs load into this store instead of the real database.

use super::traits::{DocumentStore, InsertResult, TypeCount};
use crate::domain::{AttackRecord, Result, StoreError};
use async_trait::async_trait;
use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Document store backed by a `Vec<Document>`
#[derive(Debug)]
pub struct InMemoryStore {
    namespace: String,
    documents: Mutex<Vec<Document>>,
    close_count: AtomicUsize,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_documents(namespace, Vec::new())
    }

    /// Create a store pre-populated with documents
    pub fn with_documents(namespace: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            namespace: namespace.into(),
            documents: Mutex::new(documents),
            close_count: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the stored documents
    pub fn documents(&self) -> Vec<Document> {
        self.lock().clone()
    }

    /// Number of times [`DocumentStore::close`] was called
    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Document>> {
        // A poisoned lock only means another test thread panicked mid-write
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn count_documents(&self) -> Result<u64> {
        Ok(self.lock().len() as u64)
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut documents = self.lock();
        let deleted = documents.len() as u64;
        documents.clear();
        Ok(deleted)
    }

    async fn insert_records(&self, records: Vec<AttackRecord>) -> Result<InsertResult> {
        let encoded = records
            .iter()
            .map(|record| {
                record
                    .to_document()
                    .map_err(|e| StoreError::EncodeFailed(e.to_string()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let inserted_count = encoded.len();
        self.lock().extend(encoded);

        Ok(InsertResult { inserted_count })
    }

    async fn count_by_object_type(&self) -> Result<Vec<TypeCount>> {
        let mut groups: HashMap<Option<String>, u64> = HashMap::new();
        for document in self.lock().iter() {
            let key = match document.get("object_type") {
                Some(Bson::String(value)) => Some(value.clone()),
                Some(Bson::Null) | None => None,
                Some(other) => Some(other.to_string()),
            };
            *groups.entry(key).or_insert(0) += 1;
        }

        let mut counts: Vec<TypeCount> = groups
            .into_iter()
            .map(|(object_type, count)| TypeCount { object_type, count })
            .collect();
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.object_type.cmp(&b.object_type))
        });

        Ok(counts)
    }

    async fn latest_ingested_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .lock()
            .iter()
            .filter_map(|document| document.get_datetime("ingested_at").ok())
            .max()
            .map(|latest| latest.to_chrono()))
    }

    async fn close(&self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
    }

    fn namespace(&self) -> String {
        self.namespace.clone()
    }
}
