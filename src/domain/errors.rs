//! Domain error types
//!
//! This module defines the error hierarchy for the ETL run. Errors never expose
//! third-party types (MongoDB driver, HTTP client); causes are carried as text.

use thiserror::Error;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when the load stage fails (nothing to load, or write failure)
pub const EXIT_LOAD_FAILED: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIGURATION: i32 = 2;
/// Exit code for feed data errors (target collection missing)
pub const EXIT_FEED_DATA: i32 = 3;
/// Exit code for store or feed connectivity errors
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code for unanticipated errors
pub const EXIT_FATAL: i32 = 5;
/// Exit code after a user interruption (SIGINT convention)
pub const EXIT_INTERRUPTED: i32 = 130;

/// Main ETL error type
///
/// Connector stages return these as fatal signals. The fetch/transform stage
/// never surfaces an error to the caller; it degrades to an empty record set.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Configuration-related errors (missing environment variables, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document store errors
    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    /// Intelligence feed errors
    #[error("TAXII feed error: {0}")]
    Feed(#[from] FeedError),

    /// No collection on the API root matched the requested title
    #[error("Collection matching '{wanted}' not found (available: {})", available.join(", "))]
    CollectionNotFound {
        /// Substring that was searched for
        wanted: String,
        /// Titles of every collection the API root offered
        available: Vec<String>,
    },

    /// Transformation errors (malformed or unexpected object fields)
    #[error("Transformation error: {0}")]
    Transformation(String),

    /// Load stage failures
    #[error("Load error: {0}")]
    Load(String),

    /// The run was interrupted by a shutdown signal
    #[error("Interrupted by user")]
    Interrupted,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl EtlError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            EtlError::Configuration(_) => EXIT_CONFIGURATION,
            EtlError::Store(_) => EXIT_CONNECTION,
            EtlError::Feed(FeedError::NoCollections(_)) => EXIT_FEED_DATA,
            EtlError::Feed(_) => EXIT_CONNECTION,
            EtlError::CollectionNotFound { .. } => EXIT_FEED_DATA,
            EtlError::Transformation(_) | EtlError::Load(_) => EXIT_LOAD_FAILED,
            EtlError::Interrupted => EXIT_INTERRUPTED,
            EtlError::Serialization(_) | EtlError::Io(_) | EtlError::Other(_) => EXIT_FATAL,
        }
    }
}

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection string could not be parsed
    #[error("Invalid connection string: {0}")]
    InvalidUri(String),

    /// The server could not be reached or rejected the probe
    #[error("Failed to connect to document store: {0}")]
    ConnectionFailed(String),

    /// Counting or aggregating documents failed
    #[error("Failed to query documents: {0}")]
    QueryFailed(String),

    /// Deleting documents failed
    #[error("Failed to delete documents: {0}")]
    DeleteFailed(String),

    /// Inserting documents failed
    #[error("Failed to insert documents: {0}")]
    InsertFailed(String),

    /// A record could not be converted to the store's document format
    #[error("Failed to encode document: {0}")]
    EncodeFailed(String),
}

/// TAXII feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Failed to reach the TAXII server
    #[error("Failed to connect to TAXII server: {0}")]
    ConnectionFailed(String),

    /// Discovery succeeded but listed no API roots
    #[error("No API roots found on TAXII server {0}")]
    NoApiRoots(String),

    /// The API root offered no collections
    #[error("No collections found in API root {0}")]
    NoCollections(String),

    /// Every connection attempt failed
    #[error("Cannot connect to TAXII server after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Error from the final attempt
        last_error: String,
    },

    /// A URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response body from the server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl From<std::io::Error> for EtlError {
    fn from(err: std::io::Error) -> Self {
        EtlError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EtlError {
    fn from(err: serde_json::Error) -> Self {
        EtlError::Serialization(err.to_string())
    }
}
