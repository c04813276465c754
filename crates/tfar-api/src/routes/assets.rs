//! # Asset Downloads
//!
//! Streams stored files to the client without buffering them. The asset
//! name is a store file id as published in provider descriptors and
//! module source URLs.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures::TryStreamExt;
use tfar_core::{AssetRole, StoreFileId};
use tfar_store::AssetStream;

use crate::error::AppError;
use crate::state::AppState;

const OCTET_STREAM: &str = "application/octet-stream";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/download/provider/:namespace/asset/:asset_name",
            get(provider_asset),
        )
        .route(
            "/download/module/:namespace/asset/:asset_name",
            get(module_asset),
        )
}

/// GET /download/provider/{namespace}/asset/{asset_name}: Stream a provider file.
#[utoipa::path(
    get,
    path = "/download/provider/{namespace}/asset/{asset_name}",
    params(
        ("namespace" = String, Path, description = "Repository holding the file"),
        ("asset_name" = String, Path, description = "Store file id"),
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "No such file"),
        (status = 500, description = "Backing store failure"),
    ),
    tag = "assets"
)]
async fn provider_asset(
    State(state): State<AppState>,
    Path((namespace, asset_name)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let stream = state
        .providers
        .get_asset(&namespace, &asset_name)
        .await
        .map_err(|err| AppError::from_store(err, &format!("{namespace}/{asset_name}")))?;
    Ok(stream_response(&asset_name, stream))
}

/// GET /download/module/{namespace}/asset/{asset_name}: Stream a module archive.
#[utoipa::path(
    get,
    path = "/download/module/{namespace}/asset/{asset_name}",
    params(
        ("namespace" = String, Path, description = "Repository holding the file"),
        ("asset_name" = String, Path, description = "Store file id"),
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "No such file"),
        (status = 500, description = "Backing store failure"),
    ),
    tag = "assets"
)]
async fn module_asset(
    State(state): State<AppState>,
    Path((namespace, asset_name)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let stream = state
        .modules
        .get_asset(&namespace, &asset_name)
        .await
        .map_err(|err| AppError::from_store(err, &format!("{namespace}/{asset_name}")))?;
    Ok(stream_response(&asset_name, stream))
}

/// Content type for a store file id, chosen from its bare file name.
pub fn content_type_for(asset_name: &str) -> &'static str {
    let file_name = StoreFileId::parse(asset_name)
        .map(|id| id.file_name)
        .unwrap_or_else(|| asset_name.to_string());
    AssetRole::from_file_name(&file_name)
        .map(AssetRole::content_type)
        .unwrap_or(OCTET_STREAM)
}

// The body owns the upstream response; it is released when the body is
// dropped, whether fully sent, failed or abandoned by the client.
fn stream_response(asset_name: &str, stream: AssetStream) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(content_type_for(asset_name)),
    );
    if let Some(len) = stream.content_length() {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    }

    let object = stream.object().to_string();
    let body = stream.into_byte_stream().inspect_err(move |err| {
        tracing::error!(object = %object, error = %err, "asset stream interrupted");
    });

    (headers, Body::from_stream(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_follow_file_role() {
        assert_eq!(
            content_type_for("terraform-provider-foo:1.0.0-linux-amd64:terraform-provider-foo_1.0.0_SHA256SUMS"),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            content_type_for("p:v:terraform-provider-foo_1.0.0_SHA256SUMS.sig"),
            "application/pgp-signature"
        );
        assert_eq!(
            content_type_for("p:v:terraform-provider-foo_1.0.0_gpg-public-key.pem"),
            "application/pgp-keys"
        );
        assert_eq!(
            content_type_for("terraform-aws-vpc:1.0.0:terraform-aws-vpc_1.0.0.zip"),
            "application/zip"
        );
    }

    #[test]
    fn unknown_files_are_octet_streams() {
        assert_eq!(content_type_for("p:v:README.md"), OCTET_STREAM);
        assert_eq!(content_type_for("not-a-file-id"), OCTET_STREAM);
    }
}
