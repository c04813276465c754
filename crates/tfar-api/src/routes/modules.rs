//! # Module Registry Protocol
//!
//! Terraform lists a module's versions, then asks for one version's
//! download location and fetches the archive from the URL in the
//! `X-Terraform-Get` header.

use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying a module's source location.
pub const X_TERRAFORM_GET: HeaderName = HeaderName::from_static("x-terraform-get");

/// Module version listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleVersionsResponse {
    /// Always exactly one entry, for the requested module.
    pub modules: Vec<ModuleVersionList>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleVersionList {
    pub versions: Vec<ModuleVersionEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleVersionEntry {
    pub version: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/modules/:namespace/:name/:system/versions",
            get(list_module_versions),
        )
        .route(
            "/v1/modules/:namespace/:name/:system/:version/download",
            get(download_module),
        )
}

/// GET /v1/modules/{namespace}/{name}/{system}/versions: List versions.
#[utoipa::path(
    get,
    path = "/v1/modules/{namespace}/{name}/{system}/versions",
    params(
        ("namespace" = String, Path, description = "Repository holding the module"),
        ("name" = String, Path, description = "Module name"),
        ("system" = String, Path, description = "Target system, e.g. aws"),
    ),
    responses(
        (status = 200, description = "Published versions", body = ModuleVersionsResponse),
        (status = 404, description = "Unknown module"),
        (status = 500, description = "Backing store failure"),
    ),
    tag = "modules"
)]
async fn list_module_versions(
    State(state): State<AppState>,
    Path((namespace, name, system)): Path<(String, String, String)>,
) -> Result<Json<ModuleVersionsResponse>, AppError> {
    let versions = state
        .modules
        .list_versions(&namespace, &name, &system)
        .await
        .map_err(|err| AppError::from_store(err, &format!("{namespace}/{name}/{system}")))?;

    Ok(Json(ModuleVersionsResponse {
        modules: vec![ModuleVersionList {
            versions: versions
                .into_iter()
                .map(|v| ModuleVersionEntry { version: v.version })
                .collect(),
        }],
    }))
}

/// GET /v1/modules/{namespace}/{name}/{system}/{version}/download: Locate an archive.
#[utoipa::path(
    get,
    path = "/v1/modules/{namespace}/{name}/{system}/{version}/download",
    params(
        ("namespace" = String, Path, description = "Repository holding the module"),
        ("name" = String, Path, description = "Module name"),
        ("system" = String, Path, description = "Target system, e.g. aws"),
        ("version" = String, Path, description = "Module version"),
    ),
    responses(
        (status = 204, description = "Source location in the X-Terraform-Get header"),
        (status = 404, description = "Path parameters cannot form a source location"),
    ),
    tag = "modules"
)]
async fn download_module(
    State(state): State<AppState>,
    Path((namespace, name, system, version)): Path<(String, String, String, String)>,
) -> Result<(StatusCode, [(HeaderName, HeaderValue); 1]), AppError> {
    let module = state.modules.get_version(&namespace, &name, &system, &version);
    let location = HeaderValue::try_from(module.source_url).map_err(|_| {
        tracing::warn!(
            namespace = %namespace,
            name = %name,
            system = %system,
            version = ?version,
            "module source is not a valid header value"
        );
        AppError::NotFound(format!("{namespace}/{name}/{system} {version:?}"))
    })?;
    Ok((StatusCode::NO_CONTENT, [(X_TERRAFORM_GET, location)]))
}
