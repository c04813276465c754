//! Store configuration.
//!
//! The store never reads the environment; the binary builds a
//! [`StoreConfig`] and hands it over at startup.

use url::Url;

/// Public Artifact Registry API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://artifactregistry.googleapis.com";

/// Items requested per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Location of the backing repositories and how to reach them.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Cloud project owning the repositories.
    pub project_id: String,
    /// Region or multi-region of the repositories (e.g. `us`).
    pub location: String,
    /// Base URL for both the listing and the download API.
    pub endpoint: Url,
    /// Listing page size.
    pub page_size: u32,
}

impl StoreConfig {
    /// Configuration against the public endpoint.
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|e| ConfigError::InvalidUrl(DEFAULT_ENDPOINT.to_string(), e.to_string()))?;
        Self::with_endpoint(project_id, location, endpoint)
    }

    /// Configuration against an explicit endpoint (emulators, tests).
    pub fn with_endpoint(
        project_id: impl Into<String>,
        location: impl Into<String>,
        endpoint: Url,
    ) -> Result<Self, ConfigError> {
        let project_id = project_id.into();
        let location = location.into();
        if project_id.trim().is_empty() {
            return Err(ConfigError::Missing("project id"));
        }
        if location.trim().is_empty() {
            return Err(ConfigError::Missing("location"));
        }
        if endpoint.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                endpoint.to_string(),
                "not a base URL".to_string(),
            ));
        }
        Ok(Self {
            project_id,
            location,
            endpoint,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Resource prefix shared by every repository: `projects/{p}/locations/{l}`.
    pub fn scope(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.location)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_combines_project_and_location() {
        let cfg = StoreConfig::new("my-project", "us").unwrap();
        assert_eq!(cfg.scope(), "projects/my-project/locations/us");
        assert_eq!(cfg.endpoint.as_str(), "https://artifactregistry.googleapis.com/");
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn empty_project_is_rejected() {
        assert!(matches!(
            StoreConfig::new("  ", "us"),
            Err(ConfigError::Missing("project id"))
        ));
    }

    #[test]
    fn empty_location_is_rejected() {
        assert!(matches!(
            StoreConfig::new("p", ""),
            Err(ConfigError::Missing("location"))
        ));
    }

    #[test]
    fn non_base_endpoint_is_rejected() {
        let url = Url::parse("mailto:ops@example.com").unwrap();
        assert!(StoreConfig::with_endpoint("p", "us", url).is_err());
    }
}
