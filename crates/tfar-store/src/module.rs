//! # Module Store
//!
//! Module `(namespace, name, system)` lives in repository `namespace`,
//! package `terraform-{system}-{name}`. Each store version holds one
//! archive with a canonical name, so resolving a version needs no file
//! discovery.

use std::sync::Arc;

use tfar_core::codec::last_segment;
use tfar_core::naming::module_archive_id;
use tfar_core::{ModuleVersion, PackageKey};

use crate::error::StoreError;
use crate::fetcher::{AssetFetcher, AssetStream};
use crate::listing;
use crate::transport::Transport;

/// Lists module versions and locates their archives.
#[derive(Debug, Clone)]
pub struct ModuleStore {
    transport: Arc<Transport>,
    fetcher: AssetFetcher,
}

impl ModuleStore {
    pub fn new(transport: Arc<Transport>) -> Self {
        let fetcher = AssetFetcher::new(Arc::clone(&transport));
        Self { transport, fetcher }
    }

    /// Every published version of the module, in listing order.
    pub async fn list_versions(
        &self,
        namespace: &str,
        name: &str,
        system: &str,
    ) -> Result<Vec<ModuleVersion>, StoreError> {
        let package = PackageKey::module(namespace, name, system);
        let raw = listing::version_names(&self.transport, &package).await?;
        Ok(raw
            .iter()
            .map(|raw| source_for(&package, last_segment(raw)))
            .collect())
    }

    /// Source location of one module version. Makes no network call.
    pub fn get_version(
        &self,
        namespace: &str,
        name: &str,
        system: &str,
        version: &str,
    ) -> ModuleVersion {
        source_for(&PackageKey::module(namespace, name, system), version)
    }

    /// Open one module file by store file id.
    pub async fn get_asset(&self, namespace: &str, file_id: &str) -> Result<AssetStream, StoreError> {
        self.fetcher.fetch(namespace, file_id).await
    }
}

fn source_for(package: &PackageKey, version: &str) -> ModuleVersion {
    let archive = module_archive_id(package, version);
    ModuleVersion {
        version: version.to_string(),
        source_url: format!("/download/module/{}/asset/{archive}", package.namespace),
    }
}
