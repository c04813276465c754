//! # Version Codec
//!
//! Bidirectional mapping between a provider build's externally visible
//! identity `(version, os, arch)` and the flat version name the artifact
//! store keeps for it, plus parsing of store file ids.
//!
//! ## Scheme
//!
//! ```text
//! store version  = {version}-{os}-{arch}
//! store file id  = {package}:{store version}:{file name}
//! ```
//!
//! The store's listing API returns full resource names
//! (`projects/../packages/foo/versions/1.0.0-linux-amd64`); only the last
//! path segment is meaningful here. A semantic version with a pre-release
//! suffix contains the delimiter and therefore cannot be represented.

use std::fmt;

use crate::error::CodecError;

/// Separator between the fields of a store version name.
pub const VERSION_DELIMITER: char = '-';

/// Separator between the parts of a store file id.
pub const FILE_ID_DELIMITER: char = ':';

/// A provider build's identity: semantic version, OS and architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTriple {
    pub version: String,
    pub os: String,
    pub arch: String,
}

impl VersionTriple {
    pub fn new(
        version: impl Into<String>,
        os: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Join the three fields into the store version name.
    pub fn encode(&self) -> String {
        encode(&self.version, &self.os, &self.arch)
    }

    /// Split a store version name back into its three fields.
    ///
    /// Accepts either the bare version name or a full resource name.
    pub fn decode(raw: &str) -> Result<Self, CodecError> {
        let name = last_segment(raw);
        let parts: Vec<&str> = name.split(VERSION_DELIMITER).collect();
        match parts.as_slice() {
            [version, os, arch] => Ok(Self::new(*version, *os, *arch)),
            _ => Err(CodecError::InvalidVersionFormat {
                raw: raw.to_string(),
                fields: parts.len(),
            }),
        }
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.version, self.os, self.arch)
    }
}

/// Join `(version, os, arch)` into a store version name.
pub fn encode(version: &str, os: &str, arch: &str) -> String {
    format!("{version}{VERSION_DELIMITER}{os}{VERSION_DELIMITER}{arch}")
}

/// Last `/`-separated segment of a store resource name.
pub fn last_segment(resource_name: &str) -> &str {
    resource_name
        .rsplit('/')
        .next()
        .unwrap_or(resource_name)
}

/// Identifier of one file inside the store: `{package}:{version}:{file name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreFileId {
    pub package: String,
    pub version: String,
    pub file_name: String,
}

impl StoreFileId {
    pub fn new(
        package: impl Into<String>,
        version: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            file_name: file_name.into(),
        }
    }

    /// Parse a file id or a full file resource name.
    ///
    /// Listings may percent-encode the `:` separators as `%3A`. Returns
    /// `None` when the id does not have three parts.
    pub fn parse(raw: &str) -> Option<Self> {
        let id = last_segment(raw).replace("%3A", ":").replace("%3a", ":");
        let mut parts = id.splitn(3, FILE_ID_DELIMITER);
        let package = parts.next()?;
        let version = parts.next()?;
        let file_name = parts.next()?;
        if package.is_empty() || version.is_empty() || file_name.is_empty() {
            return None;
        }
        Some(Self::new(package, version, file_name))
    }
}

impl fmt::Display for StoreFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FILE_ID_DELIMITER}{}{FILE_ID_DELIMITER}{}",
            self.package, self.version, self.file_name
        )
    }
}
