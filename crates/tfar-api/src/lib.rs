//! # tfar-api: Terraform Registry Facade
//!
//! Serves the Terraform module and provider registry protocols over the
//! stores in `tfar-store`. Handlers are thin: they call one store
//! operation, map the result onto a typed wire record and map failures
//! onto 404 or 500.
//!
//! ## API Surface
//!
//! | Route                                                       | Module                  |
//! |-------------------------------------------------------------|-------------------------|
//! | `/.well-known/terraform.json`, `/health`, `/`               | [`routes::discovery`]   |
//! | `/v1/modules/{ns}/{name}/{system}/...`                      | [`routes::modules`]     |
//! | `/v1/providers/{ns}/{name}/...`                             | [`routes::providers`]   |
//! | `/download/{provider,module}/{ns}/asset/{asset_name}`       | [`routes::assets`]      |
//!
//! ## OpenAPI
//!
//! Generated via utoipa derive macros, served at `/openapi.json`.

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::discovery::router())
        .merge(routes::modules::router())
        .merge(routes::providers::router())
        .merge(routes::assets::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
