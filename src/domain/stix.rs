//! STIX object views
//!
//! The feed publishes STIX 2.x objects whose schema is defined externally. Only
//! the fields the ETL projects are typed here; everything else rides along in
//! the raw JSON value.

use crate::domain::{EtlError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// STIX object types retained by the ETL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectType {
    /// Techniques and sub-techniques
    AttackPattern,
    /// Threat groups
    IntrusionSet,
    /// Malware families
    Malware,
}

impl ObjectType {
    /// Every retained type, in allowlist order
    pub const ALL: [ObjectType; 3] = [
        ObjectType::AttackPattern,
        ObjectType::IntrusionSet,
        ObjectType::Malware,
    ];

    /// STIX `type` tag for this object type
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::AttackPattern => "attack-pattern",
            ObjectType::IntrusionSet => "intrusion-set",
            ObjectType::Malware => "malware",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "attack-pattern" => Ok(ObjectType::AttackPattern),
            "intrusion-set" => Ok(ObjectType::IntrusionSet),
            "malware" => Ok(ObjectType::Malware),
            other => Err(EtlError::Transformation(format!(
                "Unsupported STIX object type: {other}"
            ))),
        }
    }
}

/// Typed view over the projected fields of a STIX object
///
/// Absent fields become `None` or empty; explicit JSON `null` is treated the
/// same as absent for the sequence fields. Sequence elements are kept as raw
/// JSON, so phases and references carry every field the feed sent.
#[derive(Debug, Clone, Deserialize)]
pub struct StixObject {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type", default)]
    pub object_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub created: Option<String>,

    #[serde(default)]
    pub modified: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub external_references: Vec<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub kill_chain_phases: Vec<Value>,
}

impl StixObject {
    /// Parse the projected fields out of a raw feed object
    ///
    /// # Errors
    ///
    /// Returns a transformation error if the value is not a JSON object or a
    /// projected field has the wrong shape.
    pub fn from_value(raw: &Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(EtlError::Transformation(format!(
                "Expected a JSON object, found {}",
                json_kind(raw)
            )));
        }

        Self::deserialize(raw).map_err(|e| {
            EtlError::Transformation(format!(
                "Malformed object {}: {e}",
                raw.get("id").and_then(Value::as_str).unwrap_or("<no id>")
            ))
        })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
