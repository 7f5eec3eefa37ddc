//! TAXII 2.1 resource models
//!
//! Wire representations of the discovery, API root, collections and envelope
//! resources. Unknown fields are ignored.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Server discovery resource
#[derive(Debug, Clone, Deserialize)]
pub struct Discovery {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Default API root, if the server names one
    #[serde(default)]
    pub default: Option<String>,

    /// URLs of the API roots, absolute or relative to the discovery URL
    #[serde(default)]
    pub api_roots: Vec<String>,
}

/// API root information resource
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRootInfo {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub versions: Vec<String>,

    #[serde(default)]
    pub max_content_length: Option<u64>,
}

/// A resolved API root
#[derive(Debug, Clone)]
pub struct ApiRoot {
    /// Absolute URL, always ending in `/`
    pub url: Url,

    /// Information resource served at `url`
    pub info: ApiRootInfo,
}

impl ApiRoot {
    /// Title of the API root, or its URL when the server gives none
    pub fn title(&self) -> &str {
        self.info.title.as_deref().unwrap_or(self.url.as_str())
    }
}

/// Collections resource
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub collections: Vec<CollectionInfo>,
}

/// One collection listed by an API root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionInfo {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub can_read: bool,

    #[serde(default)]
    pub can_write: bool,

    #[serde(default)]
    pub media_types: Vec<String>,
}

/// Envelope returned by the objects endpoint
///
/// `objects` is `None` when the server omits the field entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub more: bool,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub objects: Option<Vec<Value>>,
}
