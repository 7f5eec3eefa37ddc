//! ETL coordinator - main orchestrator for a run
//!
//! Drives the feed connection, collection lookup, fetch/transform and load
//! stages against an already connected document store.

use crate::adapters::database::traits::DocumentStore;
use crate::adapters::taxii::{ApiRoot, CollectionInfo, TaxiiClient};
use crate::config::EtlConfig;
use crate::core::etl::retry::RetryPolicy;
use crate::core::etl::stage::RunStage;
use crate::core::etl::summary::{EtlSummary, LoadReport, StoreSummary};
use crate::core::transform::{transform_objects, type_breakdown};
use crate::domain::{AttackRecord, EtlError, FeedError, Result};
use crate::log_stage;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// ETL coordinator
pub struct EtlCoordinator {
    config: EtlConfig,
    store: Arc<dyn DocumentStore>,
    feed: TaxiiClient,
    run_id: Uuid,
    dry_run: bool,
}

impl EtlCoordinator {
    /// Create a coordinator for one run
    ///
    /// # Errors
    ///
    /// Returns an error if the feed client cannot be built from the config.
    pub fn new(config: EtlConfig, store: Arc<dyn DocumentStore>, dry_run: bool) -> Result<Self> {
        let feed = TaxiiClient::new(&config.feed)?;
        Ok(Self {
            config,
            store,
            feed,
            run_id: Uuid::new_v4(),
            dry_run,
        })
    }

    /// Identifier attached to this run's logs
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Execute the pipeline
    ///
    /// The store connection is not closed here; the caller owns it.
    pub async fn execute(&self) -> Result<EtlSummary> {
        let start_time = Instant::now();
        let mut summary = EtlSummary::new(self.run_id, self.dry_run);

        match self.run_stages(&mut summary).await {
            Ok(()) => {
                summary.duration = start_time.elapsed();
                advance(&mut summary, RunStage::Done);
                summary.log_summary();
                Ok(summary)
            }
            Err(e) => {
                let failed_at = summary.stage;
                advance(&mut summary, RunStage::Terminated { exit_code: e.exit_code() });
                tracing::debug!(
                    failed_at = %failed_at,
                    duration_secs = format!("{:.2}", start_time.elapsed().as_secs_f64()),
                    "ETL run terminated"
                );
                Err(e)
            }
        }
    }

    async fn run_stages(&self, summary: &mut EtlSummary) -> Result<()> {
        advance(summary, RunStage::ConfigLoaded);
        advance(summary, RunStage::StoreConnected);

        let api_root = self.connect_feed().await?;
        summary.api_root_title = Some(api_root.title().to_string());
        advance(summary, RunStage::FeedConnected);

        let collection = self.locate_collection(&api_root).await?;
        summary.collection_title = Some(collection.title.clone());
        summary.collection_id = Some(collection.id.clone());
        advance(summary, RunStage::CollectionLocated);

        let (fetched, records) = self
            .fetch_and_transform(&api_root, &collection, Utc::now())
            .await;
        summary.fetched_objects = fetched;
        summary.transformed_records = records.len();
        advance(summary, RunStage::DataFetched);

        summary.load = self.load(records).await?;
        advance(summary, RunStage::DataLoaded);

        summary.store_summary = self.print_store_summary().await;
        advance(summary, RunStage::SummaryPrinted);

        Ok(())
    }

    /// Connect to the TAXII server, retrying with a fixed delay
    async fn connect_feed(&self) -> Result<ApiRoot> {
        let feed_config = &self.config.feed;
        tracing::info!(
            url = %feed_config.url,
            max_attempts = feed_config.max_attempts,
            "Connecting to TAXII server"
        );

        let policy = RetryPolicy::new(feed_config.max_attempts, feed_config.retry_delay);
        let api_root = policy.run(|| self.feed.first_api_root()).await?;

        tracing::info!(
            api_root = %api_root.title(),
            url = %api_root.url,
            "Connected to TAXII server"
        );
        Ok(api_root)
    }

    /// Enumerate the API root's collections and pick the target one
    async fn locate_collection(&self, api_root: &ApiRoot) -> Result<CollectionInfo> {
        let collections = self.feed.collections(api_root).await?;
        if collections.is_empty() {
            return Err(FeedError::NoCollections(api_root.title().to_string()).into());
        }

        tracing::debug!(count = collections.len(), "Collections available");

        let needle = &self.config.feed.collection_title_match;
        let collection = match select_collection(&collections, needle) {
            Ok(collection) => collection.clone(),
            Err(e) => {
                tracing::error!(wanted = %needle, "Target collection not found");
                for available in &collections {
                    tracing::info!(
                        title = %available.title,
                        id = %available.id,
                        "Available collection"
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(
            collection_title = %collection.title,
            collection_id = %collection.id,
            "Found target collection"
        );
        Ok(collection)
    }

    /// Fetch the collection's objects and transform them
    ///
    /// Failures are logged and produce no records; the load stage then
    /// reports the run as failed.
    async fn fetch_and_transform(
        &self,
        api_root: &ApiRoot,
        collection: &CollectionInfo,
        ingested_at: DateTime<Utc>,
    ) -> (usize, Vec<AttackRecord>) {
        match self.try_fetch_and_transform(api_root, collection, ingested_at).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching or transforming data");
                (0, Vec::new())
            }
        }
    }

    async fn try_fetch_and_transform(
        &self,
        api_root: &ApiRoot,
        collection: &CollectionInfo,
        ingested_at: DateTime<Utc>,
    ) -> Result<(usize, Vec<AttackRecord>)> {
        tracing::info!(collection_id = %collection.id, "Fetching objects from collection");
        let envelope = self.feed.objects(api_root, collection).await?;

        if envelope.more {
            tracing::warn!(
                next = envelope.next.as_deref().unwrap_or(""),
                "Server reports more pages; only the first page is ingested"
            );
        }

        let Some(objects) = envelope.objects else {
            tracing::warn!("No data received from TAXII server");
            return Ok((0, Vec::new()));
        };

        tracing::info!(count = objects.len(), "Retrieved objects from feed");

        let records = transform_objects(&objects, &self.config.transform, ingested_at)?;
        tracing::info!(count = records.len(), "Transformed relevant objects");

        for (object_type, count) in type_breakdown(&records) {
            tracing::info!(object_type = %object_type, count, "Object type breakdown");
        }

        Ok((objects.len(), records))
    }

    /// Replace the target collection's contents with `records`
    async fn load(&self, records: Vec<AttackRecord>) -> Result<LoadReport> {
        if records.is_empty() {
            tracing::warn!("No data to insert, skipping load");
            return Err(EtlError::Load("no records to load".to_string()));
        }

        let namespace = self.store.namespace();
        tracing::info!(count = records.len(), namespace = %namespace, "Loading records");

        let existing_documents = self.store.count_documents().await.map_err(load_failed)?;
        let deleted_documents = if existing_documents > 0 {
            tracing::info!(count = existing_documents, "Clearing existing documents");
            self.store.delete_all().await.map_err(load_failed)?
        } else {
            0
        };

        let result = self.store.insert_records(records).await.map_err(load_failed)?;
        if result.inserted_count == 0 {
            return Err(EtlError::Load("no documents were inserted".to_string()));
        }
        tracing::info!(count = result.inserted_count, "Successfully inserted documents");

        let final_documents = self.store.count_documents().await.map_err(load_failed)?;
        tracing::info!(count = final_documents, "Total documents in collection");

        Ok(LoadReport {
            existing_documents,
            deleted_documents,
            inserted_documents: result.inserted_count,
            final_documents,
        })
    }

    /// Print the summary block; failures only warn
    async fn print_store_summary(&self) -> Option<StoreSummary> {
        match StoreSummary::collect(self.store.as_ref()).await {
            Ok(store_summary) => {
                println!("\n{store_summary}");
                Some(store_summary)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not generate summary");
                None
            }
        }
    }
}

/// Pick the first collection whose title contains `needle`
///
/// # Errors
///
/// Returns [`EtlError::CollectionNotFound`] listing every available title.
pub fn select_collection<'a>(
    collections: &'a [CollectionInfo],
    needle: &str,
) -> Result<&'a CollectionInfo> {
    collections
        .iter()
        .find(|c| c.title.contains(needle))
        .ok_or_else(|| EtlError::CollectionNotFound {
            wanted: needle.to_string(),
            available: collections.iter().map(|c| c.title.clone()).collect(),
        })
}

fn advance(summary: &mut EtlSummary, stage: RunStage) {
    summary.stage = stage;
    log_stage!(stage);
}

fn load_failed(err: EtlError) -> EtlError {
    tracing::error!(error = %err, "Document store write failed");
    EtlError::Load(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(id: &str, title: &str) -> CollectionInfo {
        CollectionInfo {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            can_read: true,
            can_write: false,
            media_types: vec![],
        }
    }

    #[test]
    fn test_select_collection_first_match_wins() {
        let collections = vec![
            collection("1", "Mobile ATT&CK"),
            collection("2", "Enterprise ATT&CK"),
            collection("3", "Enterprise ATT&CK v2"),
        ];

        let selected = select_collection(&collections, "Enterprise ATT&CK").unwrap();
        assert_eq!(selected.id, "2");
    }

    #[test]
    fn test_select_collection_is_case_sensitive_substring() {
        let collections = vec![collection("1", "enterprise att&ck")];
        assert!(select_collection(&collections, "Enterprise ATT&CK").is_err());
    }

    #[test]
    fn test_select_collection_lists_every_title_once() {
        let collections = vec![collection("1", "Mobile ATT&CK"), collection("2", "ICS ATT&CK")];

        match select_collection(&collections, "Enterprise ATT&CK") {
            Err(EtlError::CollectionNotFound { wanted, available }) => {
                assert_eq!(wanted, "Enterprise ATT&CK");
                assert_eq!(available, vec!["Mobile ATT&CK", "ICS ATT&CK"]);
            }
            other => panic!("Expected CollectionNotFound, got {other:?}"),
        }
    }
}
