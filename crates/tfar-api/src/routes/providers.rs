//! # Provider Registry Protocol
//!
//! Terraform lists a provider's versions with their platforms, then
//! requests the package descriptor for one version and platform. The
//! descriptor points back at `/download/provider/...` for the binary,
//! checksum manifest and its signature.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tfar_core::{Platform, ProviderAssetDescriptor, ProviderVersion, SigningKey};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Provider version listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderVersionsResponse {
    pub versions: Vec<ProviderVersionEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderVersionEntry {
    pub version: String,
    pub protocols: Vec<String>,
    pub platforms: Vec<PlatformEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformEntry {
    pub os: String,
    pub arch: String,
}

/// Package descriptor for one provider build.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderPackageResponse {
    pub protocols: Vec<String>,
    pub os: String,
    pub arch: String,
    pub filename: String,
    pub download_url: String,
    pub shasums_url: String,
    pub shasums_signature_url: String,
    pub shasum: String,
    pub signing_keys: SigningKeys,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SigningKeys {
    pub gpg_public_keys: Vec<GpgPublicKey>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GpgPublicKey {
    pub key_id: String,
    pub ascii_armor: String,
}

impl From<Platform> for PlatformEntry {
    fn from(p: Platform) -> Self {
        Self {
            os: p.os,
            arch: p.arch,
        }
    }
}

impl From<ProviderVersion> for ProviderVersionEntry {
    fn from(v: ProviderVersion) -> Self {
        Self {
            version: v.version,
            protocols: v.protocols,
            platforms: v.platforms.into_iter().map(PlatformEntry::from).collect(),
        }
    }
}

impl From<SigningKey> for GpgPublicKey {
    fn from(k: SigningKey) -> Self {
        Self {
            key_id: k.key_id,
            ascii_armor: k.ascii_armor,
        }
    }
}

impl From<ProviderAssetDescriptor> for ProviderPackageResponse {
    fn from(d: ProviderAssetDescriptor) -> Self {
        Self {
            protocols: d.protocols,
            os: d.os,
            arch: d.arch,
            filename: d.filename,
            download_url: d.download_url,
            shasums_url: d.shasums_url,
            shasums_signature_url: d.shasums_signature_url,
            shasum: d.shasum,
            signing_keys: SigningKeys {
                gpg_public_keys: d.signing_keys.into_iter().map(GpgPublicKey::from).collect(),
            },
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/providers/:namespace/:name/versions",
            get(list_provider_versions),
        )
        .route(
            "/v1/providers/:namespace/:name/:version/download/:os/:arch",
            get(download_provider),
        )
}

/// GET /v1/providers/{namespace}/{name}/versions: List versions and platforms.
///
/// Store versions with undecodable names are left out of the listing and
/// logged; they never fail the request.
#[utoipa::path(
    get,
    path = "/v1/providers/{namespace}/{name}/versions",
    params(
        ("namespace" = String, Path, description = "Repository holding the provider"),
        ("name" = String, Path, description = "Provider type name"),
    ),
    responses(
        (status = 200, description = "Published versions", body = ProviderVersionsResponse),
        (status = 404, description = "Unknown provider"),
        (status = 500, description = "Backing store failure"),
    ),
    tag = "providers"
)]
async fn list_provider_versions(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Result<Json<ProviderVersionsResponse>, AppError> {
    let (versions, failures) = state
        .providers
        .list_versions(&namespace, &name)
        .await
        .map_err(|err| AppError::from_store(err, &format!("{namespace}/{name}")))?;

    if let Some(failures) = failures {
        tracing::warn!(
            namespace = %namespace,
            name = %name,
            skipped = failures.len(),
            errors = %failures,
            "skipped store versions with unrecognized names"
        );
    }

    Ok(Json(ProviderVersionsResponse {
        versions: versions
            .versions()
            .into_iter()
            .map(ProviderVersionEntry::from)
            .collect(),
    }))
}

/// GET /v1/providers/{namespace}/{name}/{version}/download/{os}/{arch}: Package descriptor.
#[utoipa::path(
    get,
    path = "/v1/providers/{namespace}/{name}/{version}/download/{os}/{arch}",
    params(
        ("namespace" = String, Path, description = "Repository holding the provider"),
        ("name" = String, Path, description = "Provider type name"),
        ("version" = String, Path, description = "Provider version"),
        ("os" = String, Path, description = "Target operating system"),
        ("arch" = String, Path, description = "Target architecture"),
    ),
    responses(
        (status = 200, description = "Package descriptor", body = ProviderPackageResponse),
        (status = 404, description = "Build missing or incomplete"),
        (status = 500, description = "Backing store failure"),
    ),
    tag = "providers"
)]
async fn download_provider(
    State(state): State<AppState>,
    Path((namespace, name, version, os, arch)): Path<(String, String, String, String, String)>,
) -> Result<Json<ProviderPackageResponse>, AppError> {
    let descriptor = state
        .providers
        .get_version(&namespace, &name, &version, &os, &arch)
        .await
        .map_err(|err| {
            AppError::from_store(err, &format!("{namespace}/{name} {version} {os}_{arch}"))
        })?;
    Ok(Json(descriptor.into()))
}
