//! Contract tests for ModuleStore and the asset fetcher.

use futures::TryStreamExt;
use tfar_store::{AssetFetcher, Credentials, ModuleStore, StoreConfig, StoreError, Transport};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCOPE: &str = "projects/test-project/locations/us";

fn transport(mock_server: &MockServer) -> std::sync::Arc<Transport> {
    let config =
        StoreConfig::with_endpoint("test-project", "us", mock_server.uri().parse().unwrap())
            .unwrap();
    Transport::new(config, Credentials::fixed("test-token")).unwrap()
}

// ── ModuleStore ──────────────────────────────────────────────────────

#[tokio::test]
async fn list_versions_derives_package_and_source_urls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/v1/{SCOPE}/repositories/acme/packages/terraform-aws-vpc/versions"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "versions": [
                {"name": format!("{SCOPE}/repositories/acme/packages/terraform-aws-vpc/versions/1.0.0")},
                {"name": format!("{SCOPE}/repositories/acme/packages/terraform-aws-vpc/versions/1.1.0")}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = ModuleStore::new(transport(&mock_server));
    let versions = store.list_versions("acme", "vpc", "aws").await.unwrap();

    let listed: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
    assert_eq!(listed, vec!["1.0.0", "1.1.0"]);
    assert_eq!(
        versions[1].source_url,
        "/download/module/acme/asset/terraform-aws-vpc:1.1.0:terraform-aws-vpc_1.1.0.zip"
    );
}

#[tokio::test]
async fn list_versions_transport_failure_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let store = ModuleStore::new(transport(&mock_server));
    let err = store.list_versions("acme", "vpc", "aws").await.unwrap_err();
    assert!(matches!(err, StoreError::ListingStatus { status: 500, .. }));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn get_version_is_pure_and_idempotent() {
    let mock_server = MockServer::start().await;

    // Any request reaching the backend fails the test on drop.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = ModuleStore::new(transport(&mock_server));
    let first = store.get_version("acme", "vpc", "aws", "2.0.0");
    let second = store.get_version("acme", "vpc", "aws", "2.0.0");
    assert_eq!(first, second);
    assert_eq!(first.version, "2.0.0");
    assert_eq!(
        first.source_url,
        "/download/module/acme/asset/terraform-aws-vpc:2.0.0:terraform-aws-vpc_2.0.0.zip"
    );
}

#[tokio::test]
async fn get_asset_downloads_archive() {
    let mock_server = MockServer::start().await;
    let id = "terraform-aws-vpc:2.0.0:terraform-aws-vpc_2.0.0.zip";

    Mock::given(method("GET"))
        .and(path(format!("/download/v1/{SCOPE}/repositories/acme/files/{id}:download")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = ModuleStore::new(transport(&mock_server));
    let body = store.get_asset("acme", id).await.unwrap().into_bytes().await.unwrap();
    assert_eq!(&body[..], b"PK\x03\x04");
}

// ── AssetFetcher ─────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_sends_bearer_token_and_alt_media() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/download/v1/{SCOPE}/repositories/acme/files/a:b:c.txt:download")))
        .and(query_param("alt", "media"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = AssetFetcher::new(transport(&mock_server));
    let stream = fetcher.fetch("acme", "a:b:c.txt").await.unwrap();
    assert_eq!(stream.content_length(), Some(5));
    let chunks: Vec<bytes::Bytes> = stream.into_byte_stream().try_collect().await.unwrap();
    assert_eq!(chunks.concat(), b"hello");
}

#[tokio::test]
async fn fetch_non_200_is_download_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such file"))
        .mount(&mock_server)
        .await;

    let fetcher = AssetFetcher::new(transport(&mock_server));
    match fetcher.fetch("acme", "a:b:c.txt").await {
        Err(StoreError::DownloadFailed { status, object }) => {
            assert_eq!(status, 404);
            assert!(object.ends_with("files/a:b:c.txt"));
        }
        Err(other) => panic!("expected DownloadFailed, got: {other:?}"),
        Ok(_) => panic!("a failed download must not yield a stream"),
    }
}

#[tokio::test]
async fn fetch_treats_other_success_codes_as_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let fetcher = AssetFetcher::new(transport(&mock_server));
    let err = fetcher.fetch("acme", "a:b:c.txt").await.unwrap_err();
    assert!(matches!(err, StoreError::DownloadFailed { status: 204, .. }));
}
