//! # Registry Records
//!
//! Request-scoped values built from live store listings. None of them are
//! persisted or cached.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codec::VersionTriple;
use crate::error::DecodeFailures;
use crate::keyring::SigningKey;

/// Plugin protocol versions advertised for every provider build.
pub const PROVIDER_PROTOCOLS: &[&str] = &["5.0"];

/// One `{os, arch}` build target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

/// One semantic version with its platforms, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVersion {
    pub version: String,
    pub protocols: Vec<String>,
    pub platforms: Vec<Platform>,
}

/// Every published build of a provider, grouped by semantic version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderVersionSet {
    versions: BTreeMap<String, Vec<Platform>>,
}

impl ProviderVersionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode raw store version names and group them.
    ///
    /// A name that fails to decode is recorded and skipped; the rest of the
    /// listing is still grouped. The failures come back alongside the set.
    pub fn from_raw_versions<I, S>(raw_versions: I) -> (Self, Option<DecodeFailures>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        let mut failures = DecodeFailures::new();
        for raw in raw_versions {
            match VersionTriple::decode(raw.as_ref()) {
                Ok(triple) => set.insert(triple),
                Err(err) => failures.push(err),
            }
        }
        (set, failures.into_option())
    }

    /// Add one build. A platform already listed for the version is ignored.
    pub fn insert(&mut self, triple: VersionTriple) {
        let platform = Platform {
            os: triple.os,
            arch: triple.arch,
        };
        let platforms = self.versions.entry(triple.version).or_default();
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Platforms published for `version`.
    pub fn platforms(&self, version: &str) -> Option<&[Platform]> {
        self.versions.get(version).map(Vec::as_slice)
    }

    /// Versions in ascending string order, each tagged with the protocols.
    pub fn versions(&self) -> Vec<ProviderVersion> {
        self.versions
            .iter()
            .map(|(version, platforms)| ProviderVersion {
                version: version.clone(),
                protocols: PROVIDER_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
                platforms: platforms.clone(),
            })
            .collect()
    }
}

/// Everything a client needs to download and verify one provider build.
///
/// Download URLs are registry-relative and served by this registry's own
/// asset endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAssetDescriptor {
    pub protocols: Vec<String>,
    pub os: String,
    pub arch: String,
    /// Bare binary archive name, as listed in the checksum manifest.
    pub filename: String,
    pub download_url: String,
    pub shasums_url: String,
    pub shasums_signature_url: String,
    /// Lowercase hex SHA-256 of the binary archive.
    pub shasum: String,
    /// Zero or one key; the key file is optional.
    pub signing_keys: Vec<SigningKey>,
}

/// One module version and where to fetch its archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleVersion {
    pub version: String,
    /// Registry-relative archive path, delivered via `X-Terraform-Get`.
    pub source_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(os: &str, arch: &str) -> Platform {
        Platform {
            os: os.into(),
            arch: arch.into(),
        }
    }

    #[test]
    fn groups_by_version_and_reports_bad_names() {
        let (set, failures) = ProviderVersionSet::from_raw_versions([
            "1.0.0-linux-amd64",
            "1.0.0-darwin-arm64",
            "bad",
        ]);

        let versions = set.versions();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version, "1.0.0");
        assert_eq!(versions[0].protocols, vec!["5.0".to_string()]);
        assert_eq!(
            versions[0].platforms,
            vec![platform("linux", "amd64"), platform("darwin", "arm64")]
        );

        let failures = failures.expect("bad entry must be reported");
        assert_eq!(failures.len(), 1);
        assert!(failures.to_string().contains("bad"));
    }

    #[test]
    fn clean_listing_has_no_failures() {
        let (set, failures) =
            ProviderVersionSet::from_raw_versions(["1.0.0-linux-amd64", "1.1.0-linux-amd64"]);
        assert!(failures.is_none());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn duplicate_platforms_collapse() {
        let (set, _) =
            ProviderVersionSet::from_raw_versions(["1.0.0-linux-amd64", "1.0.0-linux-amd64"]);
        assert_eq!(set.platforms("1.0.0").unwrap().len(), 1);
    }

    #[test]
    fn all_bad_yields_empty_set() {
        let (set, failures) = ProviderVersionSet::from_raw_versions(["a", "b-c"]);
        assert!(set.is_empty());
        assert_eq!(failures.unwrap().len(), 2);
    }
}
