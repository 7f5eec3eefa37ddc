//! CLI command implementations

pub mod run;
pub mod status;
pub mod validate;

use crate::domain::{EtlError, FeedError};

/// Print an anticipated failure as one line plus guidance, returning its exit code
pub(crate) fn report_failure(err: &EtlError) -> i32 {
    eprintln!("❌ {err}");
    if let Some(hint) = guidance(err) {
        eprintln!("   {hint}");
    }
    err.exit_code()
}

fn guidance(err: &EtlError) -> Option<&'static str> {
    match err {
        EtlError::Configuration(_) => {
            Some("Set MONGO_URI and MONGO_DB in the environment or in a .env file.")
        }
        EtlError::Store(_) => {
            Some("Check that MongoDB is running and that MONGO_URI is correct.")
        }
        EtlError::Feed(FeedError::NoCollections(_)) | EtlError::CollectionNotFound { .. } => {
            Some("The TAXII server no longer publishes the expected collection.")
        }
        EtlError::Feed(_) => Some("Check network access to https://cti-taxii.mitre.org."),
        EtlError::Load(_) | EtlError::Transformation(_) => {
            Some("No data was written; the collection keeps its previous contents unless a write failed midway.")
        }
        EtlError::Interrupted => None,
        EtlError::Serialization(_) | EtlError::Io(_) | EtlError::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_failure_returns_exit_code() {
        let err = EtlError::Configuration("Missing required environment variables: MONGO_URI".into());
        assert_eq!(report_failure(&err), 2);
        assert_eq!(report_failure(&EtlError::Interrupted), 130);
    }

    #[test]
    fn test_guidance_for_store_errors() {
        let err: EtlError = crate::domain::StoreError::ConnectionFailed("timeout".into()).into();
        assert!(guidance(&err).unwrap().contains("MongoDB"));
    }
}
