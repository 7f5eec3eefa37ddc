//! Run summary and store reporting

use crate::adapters::database::traits::{DocumentStore, TypeCount};
use crate::core::etl::stage::RunStage;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

const RULE_WIDTH: usize = 50;

/// Snapshot of the target collection, as printed after a successful load
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSummary {
    /// Total document count
    pub total_documents: u64,

    /// Counts per `object_type`, largest first
    pub by_type: Vec<TypeCount>,

    /// Most recent `ingested_at`, if any document has one
    pub latest_ingestion: Option<DateTime<Utc>>,
}

impl StoreSummary {
    /// Query the store for a summary
    pub async fn collect(store: &dyn DocumentStore) -> Result<Self> {
        Ok(Self {
            total_documents: store.count_documents().await?,
            by_type: store.count_by_object_type().await?,
            latest_ingestion: store.latest_ingested_at().await?,
        })
    }
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "DATA SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total documents: {}", self.total_documents)?;
        writeln!(f)?;
        writeln!(f, "Breakdown by type:")?;
        for entry in &self.by_type {
            writeln!(
                f,
                "  {}: {}",
                entry.object_type.as_deref().unwrap_or("(none)"),
                entry.count
            )?;
        }
        if let Some(latest) = self.latest_ingestion {
            writeln!(f)?;
            writeln!(f, "Latest ingestion: {}", latest.to_rfc3339())?;
        }
        write!(f, "{rule}")
    }
}

/// Outcome of the load stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Documents present before the load
    pub existing_documents: u64,

    /// Documents removed before inserting
    pub deleted_documents: u64,

    /// Documents inserted by this run
    pub inserted_documents: usize,

    /// Documents present after the load
    pub final_documents: u64,
}

/// Summary of one ETL run
#[derive(Debug, Clone)]
pub struct EtlSummary {
    pub run_id: Uuid,

    /// Last stage reached
    pub stage: RunStage,

    /// Records were loaded into an in-memory store
    pub dry_run: bool,

    pub api_root_title: Option<String>,

    pub collection_title: Option<String>,

    pub collection_id: Option<String>,

    /// Objects received from the feed
    pub fetched_objects: usize,

    /// Records produced by the transform stage
    pub transformed_records: usize,

    pub load: LoadReport,

    /// Store snapshot, absent when it could not be computed
    pub store_summary: Option<StoreSummary>,

    pub duration: Duration,
}

impl EtlSummary {
    /// Create an empty summary for a run
    pub fn new(run_id: Uuid, dry_run: bool) -> Self {
        Self {
            run_id,
            stage: RunStage::Init,
            dry_run,
            api_root_title: None,
            collection_title: None,
            collection_id: None,
            fetched_objects: 0,
            transformed_records: 0,
            load: LoadReport::default(),
            store_summary: None,
            duration: Duration::ZERO,
        }
    }

    /// Check if the run reached the end of the pipeline
    pub fn is_successful(&self) -> bool {
        self.stage == RunStage::Done
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            stage = %self.stage,
            dry_run = self.dry_run,
            collection = self.collection_title.as_deref().unwrap_or(""),
            fetched = self.fetched_objects,
            transformed = self.transformed_records,
            deleted = self.load.deleted_documents,
            inserted = self.load.inserted_documents,
            duration_secs = format!("{:.2}", self.duration.as_secs_f64()),
            "ETL pipeline completed successfully"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_store_summary_display() {
        let summary = StoreSummary {
            total_documents: 4,
            by_type: vec![
                TypeCount {
                    object_type: Some("malware".to_string()),
                    count: 2,
                },
                TypeCount {
                    object_type: Some("attack-pattern".to_string()),
                    count: 1,
                },
                TypeCount {
                    object_type: Some("intrusion-set".to_string()),
                    count: 1,
                },
            ],
            latest_ingestion: Some(Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()),
        };

        let text = summary.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(50));
        assert_eq!(lines[1], "DATA SUMMARY");
        assert!(text.contains("Total documents: 4"));
        assert!(text.contains("  malware: 2\n  attack-pattern: 1\n  intrusion-set: 1"));
        assert!(text.contains("Latest ingestion: 2026-10-19T08:30:00+00:00"));
        assert_eq!(*lines.last().unwrap(), "=".repeat(50));
    }

    #[test]
    fn test_store_summary_display_empty() {
        let summary = StoreSummary {
            total_documents: 0,
            by_type: vec![],
            latest_ingestion: None,
        };
        let text = summary.to_string();
        assert!(text.contains("Total documents: 0"));
        assert!(!text.contains("Latest ingestion"));
    }

    #[test]
    fn test_etl_summary_new() {
        let summary = EtlSummary::new(Uuid::new_v4(), true);
        assert_eq!(summary.stage, RunStage::Init);
        assert!(summary.dry_run);
        assert!(!summary.is_successful());
        assert_eq!(summary.load, LoadReport::default());
    }
}
