//! # Service Discovery
//!
//! Terraform resolves a registry host by fetching
//! `/.well-known/terraform.json` and reading the base path of each
//! protocol it needs.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Base path of the module registry protocol.
pub const MODULES_V1: &str = "/v1/modules/";
/// Base path of the provider registry protocol.
pub const PROVIDERS_V1: &str = "/v1/providers/";

const DISCOVERY_DOCUMENT: &str = "terraform.json";

/// Discovery document.
#[derive(Debug, Serialize, ToSchema)]
pub struct DiscoveryDocument {
    #[serde(rename = "modules.v1")]
    pub modules_v1: String,
    #[serde(rename = "providers.v1")]
    pub providers_v1: String,
}

impl Default for DiscoveryDocument {
    fn default() -> Self {
        Self {
            modules_v1: MODULES_V1.to_string(),
            providers_v1: PROVIDERS_V1.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/.well-known/:name", get(well_known))
        .route("/health", get(health))
}

/// GET /: Banner.
async fn index() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"), "\n")
}

/// GET /.well-known/{name}: Discovery document.
#[utoipa::path(
    get,
    path = "/.well-known/{name}",
    params(("name" = String, Path, description = "Well-known document, only `terraform.json` exists")),
    responses(
        (status = 200, description = "Discovery document", body = DiscoveryDocument),
        (status = 404, description = "Unknown document"),
    ),
    tag = "discovery"
)]
async fn well_known(Path(name): Path<String>) -> Response {
    if name != DISCOVERY_DOCUMENT {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(DiscoveryDocument::default()).into_response()
}

/// GET /health: Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is serving", body = HealthResponse)),
    tag = "discovery"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_document_uses_dotted_keys() {
        let json = serde_json::to_value(DiscoveryDocument::default()).unwrap();
        assert_eq!(json["modules.v1"], "/v1/modules/");
        assert_eq!(json["providers.v1"], "/v1/providers/");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
