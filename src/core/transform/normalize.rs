//! Projection of a single feed object into an [`AttackRecord`]

use crate::config::TransformConfig;
use crate::domain::{AttackRecord, EtlError, ObjectType, Result, StixObject};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::str::FromStr;

const DEFAULT_NAME: &str = "Unknown";

/// Normalize one raw feed object
///
/// Returns `Ok(None)` for objects whose type is not retained. The type is
/// checked before any other field, so dropped objects are never parsed.
///
/// # Errors
///
/// Returns a transformation error if `raw` is not a JSON object or one of the
/// projected fields of a retained object has the wrong shape.
pub fn normalize_object(
    raw: &Value,
    config: &TransformConfig,
    ingested_at: DateTime<Utc>,
) -> Result<Option<AttackRecord>> {
    let Some(fields) = raw.as_object() else {
        return Err(EtlError::Transformation(format!(
            "Feed object is not a JSON object: {}",
            truncate(&raw.to_string(), 80)
        )));
    };

    let Some(object_type) = retained_type(fields.get("type"), config) else {
        return Ok(None);
    };

    let object = StixObject::from_value(raw)?;

    Ok(Some(AttackRecord {
        mitre_id: object.id,
        name: object.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        description: object.description.unwrap_or_default(),
        object_type,
        created: object.created,
        modified: object.modified,
        labels: object.labels,
        external_references: object.external_references,
        kill_chain_phases: object.kill_chain_phases,
        ingested_at,
        source: config.source.clone(),
        raw_object: raw.clone(),
    }))
}

fn retained_type(value: Option<&Value>, config: &TransformConfig) -> Option<ObjectType> {
    let object_type = ObjectType::from_str(value?.as_str()?).ok()?;
    config.object_types.contains(&object_type).then_some(object_type)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
