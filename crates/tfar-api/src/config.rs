//! Process configuration from environment variables.
//!
//! | Variable                | Default                                   |
//! |-------------------------|-------------------------------------------|
//! | `PORT`                  | `8080`                                    |
//! | `PROJECT_ID`            | required                                  |
//! | `LOCATION`              | `us`                                      |
//! | `ARTIFACT_REGISTRY_URL` | `https://artifactregistry.googleapis.com` |
//! | `LOG_FORMAT`            | `text` (`json` for structured output)     |

use tfar_store::config::DEFAULT_ENDPOINT;
use tfar_store::StoreConfig;
use url::Url;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration for the registry process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    pub project_id: String,
    pub location: String,
    /// Artifact Registry API base URL.
    pub endpoint: Url,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            None => 8080,
        };

        let project_id = lookup("PROJECT_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("PROJECT_ID"))?;

        let location = lookup("LOCATION")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "us".to_string());

        let raw_endpoint =
            lookup("ARTIFACT_REGISTRY_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&raw_endpoint)
            .map_err(|_| ConfigError::Invalid("ARTIFACT_REGISTRY_URL", raw_endpoint))?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::Invalid("LOG_FORMAT", other.to_string())),
        };

        Ok(Self {
            port,
            project_id,
            location,
            endpoint,
            log_format,
        })
    }

    /// Store configuration derived from this process configuration.
    pub fn store_config(&self) -> Result<StoreConfig, tfar_store::ConfigError> {
        StoreConfig::with_endpoint(
            self.project_id.clone(),
            self.location.clone(),
            self.endpoint.clone(),
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
