//! MongoDB client implementation
//!
//! Wraps the async `mongodb` driver behind [`DocumentStore`]. Driver errors are
//! converted to [`StoreError`] values carrying the driver's message.

use crate::adapters::database::traits::{DocumentStore, InsertResult, TypeCount};
use crate::config::{redact_connection_string, StoreConfig};
use crate::domain::{AttackRecord, Result, StoreError};
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::options::{ClientOptions, FindOneOptions};
use mongodb::{Client, Collection};
use secrecy::ExposeSecret;

const APP_NAME: &str = "attack-etl";

/// MongoDB-backed document store bound to the target collection
pub struct MongoStore {
    client: Client,
    records: Collection<AttackRecord>,
    documents: Collection<Document>,
    database_name: String,
    collection_name: String,
}

impl MongoStore {
    /// Connect and probe the server
    ///
    /// The server selection timeout bounds both the probe and every later
    /// operation, so an unreachable host fails fast instead of hanging.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUri`] if the connection string cannot be
    /// parsed and [`StoreError::ConnectionFailed`] if the probe fails.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let uri = config.uri.expose_secret();
        tracing::info!(
            uri = %redact_connection_string(uri.as_str()),
            database = %config.database,
            "Connecting to MongoDB"
        );

        let mut options = ClientOptions::parse(uri.as_str())
            .await
            .map_err(|e| StoreError::InvalidUri(e.to_string()))?;
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let database = client.database(&config.database);
        let store = Self {
            records: database.collection::<AttackRecord>(&config.collection),
            documents: database.collection::<Document>(&config.collection),
            client,
            database_name: config.database.clone(),
            collection_name: config.collection.clone(),
        };

        store.test_connection().await?;

        tracing::info!(namespace = %store.namespace(), "Successfully connected to MongoDB");
        Ok(store)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn test_connection(&self) -> Result<()> {
        self.client
            .database(&self.database_name)
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    async fn count_documents(&self) -> Result<u64> {
        let count = self
            .documents
            .count_documents(doc! {}, None)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        Ok(count)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = self
            .documents
            .delete_many(doc! {}, None)
            .await
            .map_err(|e| StoreError::DeleteFailed(e.to_string()))?;
        Ok(result.deleted_count)
    }

    async fn insert_records(&self, records: Vec<AttackRecord>) -> Result<InsertResult> {
        let result = self
            .records
            .insert_many(records, None)
            .await
            .map_err(|e| StoreError::InsertFailed(e.to_string()))?;

        Ok(InsertResult {
            inserted_count: result.inserted_ids.len(),
        })
    }

    async fn count_by_object_type(&self) -> Result<Vec<TypeCount>> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$object_type", "count": { "$sum": 1 } } },
            doc! { "$sort": { "count": -1 } },
        ];

        let groups: Vec<Document> = self
            .documents
            .aggregate(pipeline, None)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        groups.iter().map(type_count_from_group).collect()
    }

    async fn latest_ingested_at(&self) -> Result<Option<DateTime<Utc>>> {
        let options = FindOneOptions::builder()
            .sort(doc! { "ingested_at": -1 })
            .projection(doc! { "ingested_at": 1 })
            .build();

        let latest = self
            .documents
            .find_one(doc! {}, options)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(latest
            .as_ref()
            .and_then(|document| document.get_datetime("ingested_at").ok())
            .map(|value| value.to_chrono()))
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection closed");
    }

    fn namespace(&self) -> String {
        format!("{}.{}", self.database_name, self.collection_name)
    }
}

/// Convert one `$group` output document into a [`TypeCount`]
fn type_count_from_group(group: &Document) -> Result<TypeCount> {
    let object_type = match group.get("_id") {
        Some(Bson::String(value)) => Some(value.clone()),
        Some(Bson::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };

    let count = match group.get("count") {
        Some(Bson::Int32(n)) => u64::try_from(*n).unwrap_or(0),
        Some(Bson::Int64(n)) => u64::try_from(*n).unwrap_or(0),
        other => {
            return Err(StoreError::QueryFailed(format!(
                "Unexpected count value in aggregation result: {other:?}"
            ))
            .into())
        }
    };

    Ok(TypeCount { object_type, count })
}
