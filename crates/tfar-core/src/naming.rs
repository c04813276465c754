//! # Asset Naming
//!
//! Deterministic file-name conventions that locate provider assets and
//! module archives inside the store.
//!
//! ## Provider assets
//!
//! All four files of a provider build share the prefix
//! `terraform-provider-{name}_{version}` and differ by role suffix:
//!
//! | Role                | Suffix                 | Required |
//! |---------------------|------------------------|----------|
//! | binary archive      | `_{os}_{arch}.zip`     | yes      |
//! | checksum manifest   | `_SHA256SUMS`          | yes      |
//! | checksum signature  | `_SHA256SUMS.sig`      | yes      |
//! | public key          | `_gpg-public-key.pem`  | no       |
//!
//! ## Modules
//!
//! A module `(name, system)` lives in package `terraform-{system}-{name}`
//! and each version holds exactly one archive,
//! `terraform-{system}-{name}_{version}.zip`.

use std::fmt;

use crate::codec::StoreFileId;

/// Logical package in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageKey {
    pub namespace: String,
    pub package: String,
}

impl PackageKey {
    /// Providers map `namespace/name` straight onto repository/package.
    pub fn provider(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            package: name.into(),
        }
    }

    /// Modules combine name and system as `terraform-{system}-{name}`.
    pub fn module(namespace: impl Into<String>, name: &str, system: &str) -> Self {
        Self {
            namespace: namespace.into(),
            package: format!("terraform-{system}-{name}"),
        }
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.package)
    }
}

/// Role of one file in a provider build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetRole {
    Binary,
    ChecksumManifest,
    ChecksumSignature,
    PublicKey,
}

impl AssetRole {
    /// Roles whose absence fails resolution.
    pub const REQUIRED: [AssetRole; 3] = [
        AssetRole::Binary,
        AssetRole::ChecksumManifest,
        AssetRole::ChecksumSignature,
    ];

    /// Human-readable role name, used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "provider binary",
            Self::ChecksumManifest => "checksum manifest",
            Self::ChecksumSignature => "checksum signature",
            Self::PublicKey => "public key",
        }
    }

    /// File-name suffix following the shared prefix.
    pub fn suffix(self, os: &str, arch: &str) -> String {
        match self {
            Self::Binary => format!("_{os}_{arch}.zip"),
            Self::ChecksumManifest => "_SHA256SUMS".to_string(),
            Self::ChecksumSignature => "_SHA256SUMS.sig".to_string(),
            Self::PublicKey => "_gpg-public-key.pem".to_string(),
        }
    }

    /// Content type served for this role's download.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Binary => "application/zip",
            Self::ChecksumManifest => "text/plain; charset=utf-8",
            Self::ChecksumSignature => "application/pgp-signature",
            Self::PublicKey => "application/pgp-keys",
        }
    }

    /// Guess the role from a bare file name, for content-type selection.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        if file_name.ends_with("_SHA256SUMS") {
            Some(Self::ChecksumManifest)
        } else if file_name.ends_with("_SHA256SUMS.sig") {
            Some(Self::ChecksumSignature)
        } else if file_name.ends_with("_gpg-public-key.pem") {
            Some(Self::PublicKey)
        } else if file_name.ends_with(".zip") {
            Some(Self::Binary)
        } else {
            None
        }
    }
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared file-name prefix of a provider build's assets.
pub fn provider_prefix(name: &str, version: &str) -> String {
    format!("terraform-provider-{name}_{version}")
}

/// Classify a bare file name against a provider build, by exact match on
/// prefix plus role suffix.
pub fn classify(file_name: &str, prefix: &str, os: &str, arch: &str) -> Option<AssetRole> {
    let rest = file_name.strip_prefix(prefix)?;
    [
        AssetRole::Binary,
        AssetRole::ChecksumManifest,
        AssetRole::ChecksumSignature,
        AssetRole::PublicKey,
    ]
    .into_iter()
    .find(|role| rest == role.suffix(os, arch))
}

/// Canonical archive name of a module version.
pub fn module_archive(package: &PackageKey, version: &str) -> String {
    format!("{}_{version}.zip", package.package)
}

/// Store file id of a module version's archive.
pub fn module_archive_id(package: &PackageKey, version: &str) -> StoreFileId {
    StoreFileId::new(
        package.package.clone(),
        version,
        module_archive(package, version),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_package_combines_system_and_name() {
        let key = PackageKey::module("acme", "vpc", "aws");
        assert_eq!(key.package, "terraform-aws-vpc");
        assert_eq!(key.to_string(), "acme/terraform-aws-vpc");
    }

    #[test]
    fn provider_package_is_direct() {
        let key = PackageKey::provider("acme", "foo");
        assert_eq!(key.package, "foo");
    }

    #[test]
    fn classify_each_role() {
        let prefix = provider_prefix("foo", "1.0.0");
        let cases = [
            ("terraform-provider-foo_1.0.0_linux_amd64.zip", AssetRole::Binary),
            ("terraform-provider-foo_1.0.0_SHA256SUMS", AssetRole::ChecksumManifest),
            ("terraform-provider-foo_1.0.0_SHA256SUMS.sig", AssetRole::ChecksumSignature),
            ("terraform-provider-foo_1.0.0_gpg-public-key.pem", AssetRole::PublicKey),
        ];
        for (name, role) in cases {
            assert_eq!(classify(name, &prefix, "linux", "amd64"), Some(role), "{name}");
        }
    }

    #[test]
    fn classify_ignores_other_platforms_and_versions() {
        let prefix = provider_prefix("foo", "1.0.0");
        assert_eq!(
            classify("terraform-provider-foo_1.0.0_darwin_arm64.zip", &prefix, "linux", "amd64"),
            None
        );
        assert_eq!(
            classify("terraform-provider-foo_1.0.01_SHA256SUMS", &prefix, "linux", "amd64"),
            None
        );
        assert_eq!(
            classify("terraform-provider-bar_1.0.0_SHA256SUMS", &prefix, "linux", "amd64"),
            None
        );
    }

    #[test]
    fn module_archive_id_is_deterministic() {
        let key = PackageKey::module("acme", "vpc", "aws");
        let id = module_archive_id(&key, "1.2.3");
        assert_eq!(id.to_string(), "terraform-aws-vpc:1.2.3:terraform-aws-vpc_1.2.3.zip");
    }

    #[test]
    fn role_from_file_name() {
        assert_eq!(
            AssetRole::from_file_name("x_SHA256SUMS.sig"),
            Some(AssetRole::ChecksumSignature)
        );
        assert_eq!(AssetRole::from_file_name("x_SHA256SUMS"), Some(AssetRole::ChecksumManifest));
        assert_eq!(AssetRole::from_file_name("README"), None);
    }
}
