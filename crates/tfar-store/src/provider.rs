//! # Provider Store
//!
//! Provider mapping onto the artifact store:
//!
//! | Registry concept               | Store concept                  |
//! |--------------------------------|--------------------------------|
//! | namespace                      | repository                     |
//! | provider name                  | package                        |
//! | `(version, os, arch)`          | version `{version}-{os}-{arch}`|
//! | binary, SHA256SUMS, .sig, key  | files under that version       |

use std::collections::HashMap;
use std::sync::Arc;

use tfar_core::naming::{classify, provider_prefix};
use tfar_core::{
    AssetRole, ChecksumManifest, DecodeFailures, PackageKey, ProviderAssetDescriptor,
    ProviderVersionSet, SigningKey, StoreFileId, VersionTriple, PROVIDER_PROTOCOLS,
};
use tokio::io::AsyncBufReadExt;

use crate::error::StoreError;
use crate::fetcher::{AssetFetcher, AssetStream};
use crate::listing;
use crate::transport::Transport;

/// Resolves provider versions and build assets.
#[derive(Debug, Clone)]
pub struct ProviderStore {
    transport: Arc<Transport>,
    fetcher: AssetFetcher,
}

impl ProviderStore {
    pub fn new(transport: Arc<Transport>) -> Self {
        let fetcher = AssetFetcher::new(Arc::clone(&transport));
        Self { transport, fetcher }
    }

    /// Every published build of `namespace/name`, grouped by version.
    ///
    /// Store versions whose names do not decode are skipped and returned
    /// as the second element; the caller decides whether to log them. A
    /// failed listing call fails the whole operation.
    pub async fn list_versions(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(ProviderVersionSet, Option<DecodeFailures>), StoreError> {
        let package = PackageKey::provider(namespace, name);
        let raw = listing::version_names(&self.transport, &package).await?;
        Ok(ProviderVersionSet::from_raw_versions(raw))
    }

    /// Resolve one build to its download descriptor.
    ///
    /// Requires the binary, checksum manifest and signature; the public
    /// key is optional.
    pub async fn get_version(
        &self,
        namespace: &str,
        name: &str,
        version: &str,
        os: &str,
        arch: &str,
    ) -> Result<ProviderAssetDescriptor, StoreError> {
        let package = PackageKey::provider(namespace, name);
        let triple = VersionTriple::new(version, os, arch);
        let files = listing::file_names(&self.transport, &package, &triple.encode()).await?;

        let assets = ProviderAssets::resolve(&files, name, &triple)?;

        let manifest = self.read_manifest(namespace, &assets.checksum_manifest).await?;
        let shasum = manifest.digest_for(&assets.binary.file_name)?.to_string();

        let signing_keys = match &assets.public_key {
            Some(key_file) => vec![self.read_signing_key(namespace, key_file).await?],
            None => {
                tracing::debug!(%package, build = %triple, "no public key file published");
                Vec::new()
            }
        };

        Ok(ProviderAssetDescriptor {
            protocols: PROVIDER_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
            os: triple.os,
            arch: triple.arch,
            filename: assets.binary.file_name.clone(),
            download_url: asset_url(namespace, &assets.binary),
            shasums_url: asset_url(namespace, &assets.checksum_manifest),
            shasums_signature_url: asset_url(namespace, &assets.checksum_signature),
            shasum,
            signing_keys,
        })
    }

    /// Open one provider file by store file id.
    pub async fn get_asset(&self, namespace: &str, file_id: &str) -> Result<AssetStream, StoreError> {
        self.fetcher.fetch(namespace, file_id).await
    }

    async fn read_manifest(
        &self,
        namespace: &str,
        file: &StoreFileId,
    ) -> Result<ChecksumManifest, StoreError> {
        let stream = self.fetcher.fetch(namespace, &file.to_string()).await?;
        let object = stream.object().to_string();
        let mut lines = stream.into_reader().lines();
        let mut manifest = ChecksumManifest::new();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| StoreError::AssetRead {
                object: object.clone(),
                source: e,
            })?
        {
            manifest.push_line(&line);
        }
        Ok(manifest)
    }

    async fn read_signing_key(
        &self,
        namespace: &str,
        file: &StoreFileId,
    ) -> Result<SigningKey, StoreError> {
        let armored = self
            .fetcher
            .fetch(namespace, &file.to_string())
            .await?
            .into_bytes()
            .await?;
        Ok(SigningKey::from_armored(&armored)?)
    }
}

/// The files of one build, classified by role.
#[derive(Debug)]
struct ProviderAssets {
    binary: StoreFileId,
    checksum_manifest: StoreFileId,
    checksum_signature: StoreFileId,
    public_key: Option<StoreFileId>,
}

impl ProviderAssets {
    fn resolve(
        file_names: &[String],
        name: &str,
        triple: &VersionTriple,
    ) -> Result<Self, StoreError> {
        let prefix = provider_prefix(name, &triple.version);
        let mut found: HashMap<AssetRole, StoreFileId> = HashMap::new();

        for raw in file_names {
            let Some(id) = StoreFileId::parse(raw) else {
                tracing::debug!(file = %raw, "ignoring file without a store file id");
                continue;
            };
            if let Some(role) = classify(&id.file_name, &prefix, &triple.os, &triple.arch) {
                found.entry(role).or_insert(id);
            }
        }

        let mut take = |role: AssetRole| {
            found.remove(&role).ok_or_else(|| StoreError::AssetNotFound {
                role,
                build: format!("terraform-provider-{name} {triple}"),
            })
        };
        let binary = take(AssetRole::Binary)?;
        let checksum_manifest = take(AssetRole::ChecksumManifest)?;
        let checksum_signature = take(AssetRole::ChecksumSignature)?;
        let public_key = take(AssetRole::PublicKey).ok();

        Ok(Self {
            binary,
            checksum_manifest,
            checksum_signature,
            public_key,
        })
    }
}

/// Registry-relative download path for a provider file.
fn asset_url(namespace: &str, file: &StoreFileId) -> String {
    format!("/download/provider/{namespace}/asset/{file}")
}
