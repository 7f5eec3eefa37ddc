//! ETL orchestration
//!
//! [`run_etl`] connects the document store and hands it to [`run_with_store`],
//! which owns the store for the rest of the run and closes it exactly once,
//! whether the pipeline succeeds, fails or is interrupted.

pub mod coordinator;
pub mod retry;
pub mod stage;
pub mod summary;

pub use coordinator::{select_collection, EtlCoordinator};
pub use retry::RetryPolicy;
pub use stage::RunStage;
pub use summary::{EtlSummary, LoadReport, StoreSummary};

use crate::adapters::database::{create_document_store, DocumentStore};
use crate::config::EtlConfig;
use crate::domain::{EtlError, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::Instrument;

/// Run the full pipeline
///
/// A failed store probe aborts the run before any feed request is made.
///
/// # Errors
///
/// Returns the error of the first fatal stage, or [`EtlError::Interrupted`]
/// when `shutdown` flips to `true` mid-run.
pub async fn run_etl(
    config: EtlConfig,
    dry_run: bool,
    mut shutdown: watch::Receiver<bool>,
) -> Result<EtlSummary> {
    let store = tokio::select! {
        biased;
        _ = shutdown_requested(&mut shutdown) => {
            tracing::warn!("ETL pipeline interrupted by user");
            return Err(EtlError::Interrupted);
        }
        store = create_document_store(&config.store, dry_run) => store?,
    };

    run_with_store(config, store, dry_run, shutdown).await
}

/// Run the pipeline against an already connected store
///
/// The store is closed before this returns.
pub async fn run_with_store(
    config: EtlConfig,
    store: Arc<dyn DocumentStore>,
    dry_run: bool,
    mut shutdown: watch::Receiver<bool>,
) -> Result<EtlSummary> {
    let result = match EtlCoordinator::new(config, store.clone(), dry_run) {
        Ok(coordinator) => {
            let span = tracing::info_span!("etl_run", run_id = %coordinator.run_id(), dry_run);
            tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown) => {
                    tracing::warn!("ETL pipeline interrupted by user");
                    Err(EtlError::Interrupted)
                }
                result = coordinator.execute().instrument(span) => result,
            }
        }
        Err(e) => Err(e),
    };

    store.close().await;
    result
}

/// Resolve once a shutdown has been requested
///
/// Never resolves if the sender is dropped without requesting shutdown.
pub async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_requested_resolves_on_signal() {
        let (tx, mut rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = tx.send(true);
        });

        tokio::time::timeout(Duration::from_secs(5), shutdown_requested(&mut rx))
            .await
            .expect("shutdown should be observed");
    }

    #[tokio::test]
    async fn test_shutdown_requested_pending_when_sender_dropped() {
        let (tx, mut rx) = watch::channel(false);
        drop(tx);

        let result =
            tokio::time::timeout(Duration::from_millis(50), shutdown_requested(&mut rx)).await;
        assert!(result.is_err());
    }
}
