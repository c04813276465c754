//! Access-token sources for the backing store.
//!
//! Production uses the ambient platform identity (application default
//! credentials or the metadata server) through `gcp_auth`. A fixed token
//! exists for emulators and tests and is never read from configuration.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::error::StoreError;

/// OAuth scope required by the Artifact Registry APIs.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Where bearer tokens come from.
///
/// Custom `Debug` implementation redacts token material.
#[derive(Clone)]
pub enum Credentials {
    /// Ambient platform identity; tokens are refreshed by the provider.
    Ambient(Arc<dyn gcp_auth::TokenProvider>),
    /// A fixed bearer token.
    Fixed(Zeroizing<String>),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ambient(_) => f.write_str("Credentials::Ambient"),
            Self::Fixed(_) => f.write_str("Credentials::Fixed([REDACTED])"),
        }
    }
}

impl Credentials {
    /// Discover the ambient identity. Called once at process start.
    pub async fn ambient() -> Result<Self, StoreError> {
        let provider = gcp_auth::provider()
            .await
            .map_err(StoreError::Credentials)?;
        Ok(Self::Ambient(provider))
    }

    pub fn fixed(token: impl Into<String>) -> Self {
        Self::Fixed(Zeroizing::new(token.into()))
    }

    /// Current bearer token.
    pub async fn bearer_token(&self) -> Result<Zeroizing<String>, StoreError> {
        match self {
            Self::Ambient(provider) => {
                let token = provider
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .map_err(StoreError::Credentials)?;
                Ok(Zeroizing::new(token.as_str().to_string()))
            }
            Self::Fixed(token) => Ok(token.clone()),
        }
    }
}
