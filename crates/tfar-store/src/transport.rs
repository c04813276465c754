//! The authenticated transport shared by every store.
//!
//! Built once at process start and passed by `Arc` into each store
//! constructor. It holds no per-request state.

use std::sync::Arc;

use url::Url;

use crate::config::StoreConfig;
use crate::credentials::Credentials;
use crate::error::StoreError;

/// HTTP client, credentials and fixed repository scope.
#[derive(Debug)]
pub struct Transport {
    http: reqwest::Client,
    credentials: Credentials,
    config: StoreConfig,
    scope: String,
}

impl Transport {
    pub fn new(config: StoreConfig, credentials: Credentials) -> Result<Arc<Self>, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::ClientInit)?;
        let scope = config.scope();
        Ok(Arc::new(Self {
            http,
            credentials,
            config,
            scope,
        }))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// `projects/{project}/locations/{location}`.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Resource name of a repository.
    pub fn repository(&self, namespace: &str) -> String {
        format!("{}/repositories/{namespace}", self.scope)
    }

    /// Endpoint URL with `path` appended as individually escaped segments.
    pub(crate) fn url<I, S>(&self, path: I) -> Result<Url, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.config.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                crate::config::ConfigError::InvalidUrl(
                    self.config.endpoint.to_string(),
                    "not a base URL".to_string(),
                )
            })?;
            segments.pop_if_empty();
            for segment in path {
                segments.push(segment.as_ref());
            }
        }
        Ok(url)
    }

    /// A GET request carrying a fresh bearer token.
    pub(crate) async fn get(&self, url: Url) -> Result<reqwest::RequestBuilder, StoreError> {
        let token = self.credentials.bearer_token().await?;
        Ok(self.http.get(url).bearer_auth(token.as_str()))
    }
}
