//! Document store factory
//!
//! Picks the store implementation for a run: MongoDB normally, the in-memory
//! store for dry runs.

use crate::adapters::database::memory::InMemoryStore;
use crate::adapters::database::traits::DocumentStore;
use crate::adapters::mongo::MongoStore;
use crate::config::StoreConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the document store for a run
///
/// # Errors
///
/// Returns an error if the MongoDB connection string is invalid or the server
/// cannot be reached within the server selection timeout.
pub async fn create_document_store(
    config: &StoreConfig,
    dry_run: bool,
) -> Result<Arc<dyn DocumentStore>> {
    if dry_run {
        tracing::info!(
            namespace = %config.namespace(),
            "Dry run: loading into an in-memory store, MongoDB will not be contacted"
        );
        return Ok(Arc::new(InMemoryStore::new(config.namespace())));
    }

    tracing::info!("Creating MongoDB client");
    let store = MongoStore::connect(config).await?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[tokio::test]
    async fn test_dry_run_does_not_touch_mongodb() {
        let config = StoreConfig::new(secret_string("mongodb://unreachable.invalid:27017"), "intel");
        let store = create_document_store(&config, true).await.unwrap();

        assert_eq!(store.namespace(), "intel.mitre_attack_raw");
        assert_eq!(store.count_documents().await.unwrap(), 0);
    }
}
