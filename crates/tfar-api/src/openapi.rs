//! # OpenAPI Document Assembly
//!
//! Assembles the utoipa-documented registry routes into one document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the registry surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Terraform Registry on Artifact Registry",
        version = "0.1.0",
        description = "Module and provider registry protocols served from Artifact Registry generic repositories.",
        license(name = "Apache-2.0")
    ),
    paths(
        // Discovery
        crate::routes::discovery::well_known,
        crate::routes::discovery::health,
        // Modules
        crate::routes::modules::list_module_versions,
        crate::routes::modules::download_module,
        // Providers
        crate::routes::providers::list_provider_versions,
        crate::routes::providers::download_provider,
        // Assets
        crate::routes::assets::provider_asset,
        crate::routes::assets::module_asset,
    ),
    components(schemas(
        crate::routes::discovery::DiscoveryDocument,
        crate::routes::discovery::HealthResponse,
        crate::routes::modules::ModuleVersionsResponse,
        crate::routes::modules::ModuleVersionList,
        crate::routes::modules::ModuleVersionEntry,
        crate::routes::providers::ProviderVersionsResponse,
        crate::routes::providers::ProviderVersionEntry,
        crate::routes::providers::PlatformEntry,
        crate::routes::providers::ProviderPackageResponse,
        crate::routes::providers::SigningKeys,
        crate::routes::providers::GpgPublicKey,
    )),
    tags(
        (name = "discovery", description = "Service discovery and health"),
        (name = "modules", description = "Module registry protocol"),
        (name = "providers", description = "Provider registry protocol"),
        (name = "assets", description = "Stored file downloads"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI JSON document at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
