//! Normalized ATT&CK record
//!
//! One record is persisted per retained feed object. The record keeps a few
//! projected fields for querying plus the untouched source object.

use crate::domain::stix::ObjectType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provenance tag written into every record
pub const RECORD_SOURCE: &str = "MITRE ATT&CK TAXII Server";

/// Normalized record as stored in the target collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    /// STIX identifier of the source object
    pub mitre_id: Option<String>,

    /// Display name, `"Unknown"` when the source has none
    pub name: String,

    /// Description, empty when the source has none
    pub description: String,

    /// STIX type of the source object
    pub object_type: ObjectType,

    pub created: Option<String>,

    pub modified: Option<String>,

    pub labels: Vec<Value>,

    pub external_references: Vec<Value>,

    pub kill_chain_phases: Vec<Value>,

    /// Time the run transformed this record, stored as a native BSON date
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub ingested_at: DateTime<Utc>,

    /// Provenance tag
    pub source: String,

    /// Complete, unmodified source object
    pub raw_object: Value,
}

impl AttackRecord {
    /// Encode the record as a BSON document
    pub fn to_document(&self) -> std::result::Result<bson::Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> AttackRecord {
        AttackRecord {
            mitre_id: Some("malware--6a21e3a4-5ffe-4581-af9a-6a54c7536f44".to_string()),
            name: "Emotet".to_string(),
            description: String::new(),
            object_type: ObjectType::Malware,
            created: Some("2019-03-26T19:23:01.705Z".to_string()),
            modified: None,
            labels: vec![json!("malware")],
            external_references: vec![json!({"source_name": "mitre-attack", "external_id": "S0367"})],
            kill_chain_phases: Vec::new(),
            ingested_at: Utc::now(),
            source: RECORD_SOURCE.to_string(),
            raw_object: json!({"type": "malware", "name": "Emotet", "x_mitre_version": "1.5"}),
        }
    }

    #[test]
    fn test_record_encodes_ingested_at_as_bson_date() {
        let record = sample_record();
        let doc = record.to_document().unwrap();

        let stored = doc.get_datetime("ingested_at").unwrap();
        assert_eq!(
            stored.timestamp_millis(),
            record.ingested_at.timestamp_millis()
        );
        assert_eq!(doc.get_str("object_type").unwrap(), "malware");
        assert_eq!(doc.get_str("source").unwrap(), RECORD_SOURCE);
    }

    #[test]
    fn test_record_keeps_raw_object() {
        let doc = sample_record().to_document().unwrap();
        let raw = doc.get_document("raw_object").unwrap();
        assert_eq!(raw.get_str("x_mitre_version").unwrap(), "1.5");
    }

    #[test]
    fn test_record_keeps_extra_phase_fields() {
        let record = AttackRecord {
            kill_chain_phases: vec![json!({
                "kill_chain_name": "mitre-attack",
                "phase_name": "execution",
                "x_mitre_note": "added in v14"
            })],
            ..sample_record()
        };

        let doc = record.to_document().unwrap();
        let phases = doc.get_array("kill_chain_phases").unwrap();
        let phase = phases[0].as_document().unwrap();
        assert_eq!(phase.get_str("phase_name").unwrap(), "execution");
        assert_eq!(phase.get_str("x_mitre_note").unwrap(), "added in v14");
    }

    #[test]
    fn test_record_absent_fields_encode_as_null() {
        let doc = sample_record().to_document().unwrap();
        assert_eq!(doc.get("modified"), Some(&bson::Bson::Null));
    }
}
