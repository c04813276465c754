//! Store error types.

use tfar_core::{AssetRole, ChecksumError, KeyRingError};

/// Errors from provider and module store operations.
///
/// Only version-name decode failures are tolerated during listing (they
/// travel alongside the result as [`tfar_core::DecodeFailures`]); every
/// variant here is terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Ambient credentials could not produce an access token.
    #[error("failed to obtain access token: {0}")]
    Credentials(#[source] gcp_auth::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),

    /// A listing page request failed in transit.
    #[error("listing {endpoint} failed: {source}")]
    ListingTransport {
        endpoint: String,
        source: reqwest::Error,
    },

    /// A listing page request returned a non-2xx status.
    #[error("listing {endpoint} returned {status}: {body}")]
    ListingStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// A listing page could not be decoded.
    #[error("failed to decode listing page from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// A listing handed back the page token it was just queried with.
    #[error("listing {endpoint} repeated page token {token:?}")]
    PaginationStalled { endpoint: String, token: String },

    /// A download request failed in transit.
    #[error("downloading {object} failed: {source}")]
    DownloadTransport {
        object: String,
        source: reqwest::Error,
    },

    /// A download returned anything but 200.
    #[error("downloading {object} returned status {status}")]
    DownloadFailed { object: String, status: u16 },

    /// Reading a downloaded body failed part way.
    #[error("reading {object} failed: {source}")]
    AssetRead {
        object: String,
        source: std::io::Error,
    },

    /// A required provider file is missing for the requested build.
    #[error("{role} not found for {build}")]
    AssetNotFound { role: AssetRole, build: String },

    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    #[error(transparent)]
    KeyRing(#[from] KeyRingError),

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl StoreError {
    /// Whether the error describes a missing or unusable resource rather
    /// than a transport or internal failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::AssetNotFound { .. } | Self::Checksum(_) | Self::KeyRing(_) => true,
            Self::DownloadFailed { status, .. } | Self::ListingStatus { status, .. } => {
                *status == 404
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_not_found_names_role() {
        let err = StoreError::AssetNotFound {
            role: AssetRole::ChecksumManifest,
            build: "1.0.0 (linux/amd64)".into(),
        };
        assert_eq!(err.to_string(), "checksum manifest not found for 1.0.0 (linux/amd64)");
        assert!(err.is_not_found());
    }

    #[test]
    fn stalled_pagination_is_internal() {
        let err = StoreError::PaginationStalled {
            endpoint: "GET versions of hashi/foo".into(),
            token: "t1".into(),
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("\"t1\""));
    }

    #[test]
    fn upstream_404_is_not_found() {
        let err = StoreError::DownloadFailed {
            object: "x".into(),
            status: 404,
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn upstream_500_is_internal() {
        let err = StoreError::ListingStatus {
            endpoint: "x".into(),
            status: 503,
            body: String::new(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn parser_errors_are_not_found() {
        let err = StoreError::from(KeyRingError::MalformedKeyRing { count: 2 });
        assert!(err.is_not_found());
        let err = StoreError::from(ChecksumError::DigestNotFound { file: "a".into() });
        assert!(err.is_not_found());
    }
}
