//! TAXII 2.1 HTTP client
//!
//! Covers the four read-only endpoints the pipeline needs: discovery, API root
//! information, collection listing and collection objects. Pagination is not
//! followed.

use super::models::{ApiRoot, ApiRootInfo, CollectionInfo, Collections, Discovery, Envelope};
use crate::config::FeedConfig;
use crate::domain::{FeedError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Media type for TAXII 2.1 requests
pub const TAXII_MEDIA_TYPE: &str = "application/taxii+json;version=2.1";

const USER_AGENT: &str = concat!("attack-etl/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a single TAXII server
#[derive(Debug, Clone)]
pub struct TaxiiClient {
    client: Client,
    discovery_url: Url,
}

impl TaxiiClient {
    /// Build a client for the configured discovery URL
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] for an unparseable URL and
    /// [`FeedError::ConnectionFailed`] if the HTTP client cannot be built.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let discovery_url = Url::parse(&config.url)
            .map_err(|e| FeedError::InvalidUrl(format!("{}: {e}", config.url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(TAXII_MEDIA_TYPE));

        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.request_timeout))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| FeedError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            discovery_url: with_trailing_slash(discovery_url),
        })
    }

    /// Fetch the server discovery resource
    pub async fn discover(&self) -> Result<Discovery> {
        self.get_json(&self.discovery_url).await
    }

    /// Discover the server and resolve its first API root
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NoApiRoots`] when discovery lists none, plus any
    /// transport or decoding error.
    pub async fn first_api_root(&self) -> Result<ApiRoot> {
        let discovery = self.discover().await?;

        let first = discovery
            .api_roots
            .first()
            .ok_or_else(|| FeedError::NoApiRoots(self.discovery_url.to_string()))?;

        tracing::debug!(
            server = discovery.title.as_deref().unwrap_or("untitled"),
            api_roots = discovery.api_roots.len(),
            "TAXII discovery succeeded"
        );

        let url = self.resolve(first)?;
        let info = self.api_root_info(&url).await?;
        Ok(ApiRoot { url, info })
    }

    /// Fetch the information resource of an API root
    pub async fn api_root_info(&self, url: &Url) -> Result<ApiRootInfo> {
        self.get_json(url).await
    }

    /// List the collections of an API root
    pub async fn collections(&self, api_root: &ApiRoot) -> Result<Vec<CollectionInfo>> {
        let url = join(&api_root.url, "collections/")?;
        let response: Option<Collections> = self.get_optional_json(&url).await?;
        Ok(response.map(|c| c.collections).unwrap_or_default())
    }

    /// Fetch the first page of a collection's objects
    ///
    /// An empty response body yields an empty envelope.
    pub async fn objects(&self, api_root: &ApiRoot, collection: &CollectionInfo) -> Result<Envelope> {
        let url = join(&api_root.url, &format!("collections/{}/objects/", collection.id))?;
        let envelope: Option<Envelope> = self.get_optional_json(&url).await?;
        Ok(envelope.unwrap_or_default())
    }

    /// Resolve an API root reference against the discovery URL
    fn resolve(&self, reference: &str) -> Result<Url> {
        let url = self
            .discovery_url
            .join(reference)
            .map_err(|e| FeedError::InvalidUrl(format!("{reference}: {e}")))?;
        Ok(with_trailing_slash(url))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        self.get_optional_json(url)
            .await?
            .ok_or_else(|| FeedError::InvalidResponse(format!("Empty response from {url}")).into())
    }

    /// GET a JSON resource, returning `None` for an empty body
    async fn get_optional_json<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>> {
        tracing::debug!(url = %url, "TAXII request");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Timeout(format!("{url}: {e}"))
            } else {
                FeedError::ConnectionFailed(format!("{url}: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::InvalidResponse(format!("{url}: {e}")))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| FeedError::InvalidResponse(format!("{url}: {e}")).into())
    }
}

fn status_error(status: StatusCode, message: String) -> FeedError {
    if status.is_server_error() {
        FeedError::ServerError {
            status: status.as_u16(),
            message,
        }
    } else {
        FeedError::ClientError {
            status: status.as_u16(),
            message,
        }
    }
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|e| FeedError::InvalidUrl(format!("{base}{path}: {e}")).into())
}

/// Relative joins drop the last path segment unless the base ends in `/`
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EtlError;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> TaxiiClient {
        let config = FeedConfig {
            url: format!("{}/taxii/", server.url()),
            ..Default::default()
        };
        TaxiiClient::new(&config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = FeedConfig {
            url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            TaxiiClient::new(&config),
            Err(EtlError::Feed(FeedError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn test_with_trailing_slash() {
        let url = with_trailing_slash(Url::parse("https://example.org/api1").unwrap());
        assert_eq!(url.as_str(), "https://example.org/api1/");
        let url = with_trailing_slash(Url::parse("https://example.org/api1/").unwrap());
        assert_eq!(url.as_str(), "https://example.org/api1/");
    }

    #[tokio::test]
    async fn test_first_api_root_resolves_relative_url() {
        let mut server = mockito::Server::new_async().await;
        let discovery = server
            .mock("GET", "/taxii/")
            .match_header("accept", TAXII_MEDIA_TYPE)
            .with_body(r#"{"title": "ATT&CK", "api_roots": ["../api/v21"]}"#)
            .create_async()
            .await;
        let root = server
            .mock("GET", "/api/v21/")
            .with_body(r#"{"title": "ATT&CK API", "versions": ["application/taxii+json;version=2.1"]}"#)
            .create_async()
            .await;

        let api_root = client_for(&server).first_api_root().await.unwrap();

        assert_eq!(api_root.url.path(), "/api/v21/");
        assert_eq!(api_root.title(), "ATT&CK API");
        discovery.assert_async().await;
        root.assert_async().await;
    }

    #[tokio::test]
    async fn test_first_api_root_requires_roots() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/taxii/")
            .with_body(r#"{"title": "empty", "api_roots": []}"#)
            .create_async()
            .await;

        let result = client_for(&server).first_api_root().await;
        assert!(matches!(result, Err(EtlError::Feed(FeedError::NoApiRoots(_)))));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/taxii/")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let result = client_for(&server).discover().await;
        match result {
            Err(EtlError::Feed(FeedError::ServerError { status, message })) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("Expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_objects_empty_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/api/collections/abc/objects/$".to_string()))
            .with_body("")
            .create_async()
            .await;

        let api_root = ApiRoot {
            url: Url::parse(&format!("{}/api/", server.url())).unwrap(),
            info: ApiRootInfo::default(),
        };
        let collection = CollectionInfo {
            id: "abc".to_string(),
            title: "Enterprise ATT&CK".to_string(),
            description: None,
            can_read: true,
            can_write: false,
            media_types: vec![],
        };

        let envelope = client_for(&server).objects(&api_root, &collection).await.unwrap();
        assert!(envelope.objects.is_none());
        assert!(!envelope.more);
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/taxii/")
            .with_body("{not json")
            .create_async()
            .await;

        let result = client_for(&server).discover().await;
        assert!(matches!(result, Err(EtlError::Feed(FeedError::InvalidResponse(_)))));
    }
}
