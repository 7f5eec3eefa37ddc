//! Data transformation logic
//!
//! Turns raw feed objects into [`AttackRecord`]s. Objects whose type is not in
//! the configured allowlist are dropped; a malformed retained object fails the
//! whole batch so a partial set never replaces the stored collection.

pub mod normalize;

pub use normalize::normalize_object;

use crate::config::TransformConfig;
use crate::domain::{AttackRecord, ObjectType, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Transform a batch of raw feed objects
///
/// Every record in the batch shares `ingested_at`. Input order is preserved.
///
/// # Examples
///
/// ```
/// use attack_etl::config::TransformConfig;
/// use attack_etl::core::transform::transform_objects;
/// use serde_json::json;
///
/// # fn example() -> attack_etl::domain::Result<()> {
/// let objects = vec![
///     json!({"type": "attack-pattern", "name": "Phishing"}),
///     json!({"type": "course-of-action", "name": "User Training"}),
/// ];
/// let records = transform_objects(&objects, &TransformConfig::default(), chrono::Utc::now())?;
/// assert_eq!(records.len(), 1);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns the first transformation error encountered.
pub fn transform_objects(
    objects: &[Value],
    config: &TransformConfig,
    ingested_at: DateTime<Utc>,
) -> Result<Vec<AttackRecord>> {
    let mut records = Vec::new();
    for raw in objects {
        if let Some(record) = normalize_object(raw, config, ingested_at)? {
            records.push(record);
        }
    }

    tracing::debug!(
        input = objects.len(),
        retained = records.len(),
        dropped = objects.len() - records.len(),
        "Transformed feed objects"
    );

    Ok(records)
}

/// Count records per object type
pub fn type_breakdown(records: &[AttackRecord]) -> BTreeMap<ObjectType, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.object_type).or_insert(0) += 1;
    }
    counts
}
