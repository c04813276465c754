//! Paginated listing calls against the backing store.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/v1/{scope}/repositories/{ns}/packages/{pkg}/versions` | list versions |
//! | GET | `/v1/{scope}/repositories/{ns}/files?filter=owner="..."` | list files |
//!
//! Both follow `nextPageToken` until it comes back empty. Any failed page
//! aborts the whole listing; nothing partial is returned.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tfar_core::PackageKey;

use crate::error::StoreError;
use crate::transport::Transport;

/// One page of a listing response.
trait Page: DeserializeOwned {
    fn into_parts(self) -> (Vec<String>, Option<String>);
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionsPage {
    #[serde(default)]
    versions: Vec<NamedResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilesPage {
    #[serde(default)]
    files: Vec<NamedResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Only the resource name is used; other fields are ignored.
#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

impl Page for VersionsPage {
    fn into_parts(self) -> (Vec<String>, Option<String>) {
        (
            self.versions.into_iter().map(|v| v.name).collect(),
            self.next_page_token,
        )
    }
}

impl Page for FilesPage {
    fn into_parts(self) -> (Vec<String>, Option<String>) {
        (
            self.files.into_iter().map(|f| f.name).collect(),
            self.next_page_token,
        )
    }
}

/// Resource names of every version of `package`.
pub(crate) async fn version_names(
    transport: &Transport,
    package: &PackageKey,
) -> Result<Vec<String>, StoreError> {
    let mut path: Vec<String> = vec!["v1".into()];
    path.extend(transport.scope().split('/').map(String::from));
    path.extend([
        "repositories".to_string(),
        package.namespace.clone(),
        "packages".to_string(),
        package.package.clone(),
        "versions".to_string(),
    ]);
    let endpoint = format!("GET versions of {package}");
    paginate::<VersionsPage>(transport, &endpoint, &path, &[]).await
}

/// Resource names of every file owned by one version of `package`.
pub(crate) async fn file_names(
    transport: &Transport,
    package: &PackageKey,
    store_version: &str,
) -> Result<Vec<String>, StoreError> {
    let repository = transport.repository(&package.namespace);
    let owner = format!(
        "{repository}/packages/{}/versions/{store_version}",
        package.package
    );
    let filter = format!("owner=\"{owner}\"");

    let mut path: Vec<String> = vec!["v1".into()];
    path.extend(repository.split('/').map(String::from));
    path.push("files".into());
    let endpoint = format!("GET files of {package} {store_version}");
    paginate::<FilesPage>(transport, &endpoint, &path, &[("filter", filter.as_str())]).await
}

async fn paginate<P: Page>(
    transport: &Transport,
    endpoint: &str,
    path: &[String],
    query: &[(&str, &str)],
) -> Result<Vec<String>, StoreError> {
    let page_size = transport.config().page_size.to_string();
    let mut names = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let mut url = transport.url(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("pageSize", &page_size);
            if let Some(token) = &page_token {
                pairs.append_pair("pageToken", token);
            }
        }

        let resp = transport
            .get(url)
            .await?
            .send()
            .await
            .map_err(|e| StoreError::ListingTransport {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::ListingStatus {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        let page: P = resp.json().await.map_err(|e| StoreError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        let (mut batch, next) = page.into_parts();
        names.append(&mut batch);
        pages += 1;

        match next {
            Some(token) if token.is_empty() => break,
            Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                return Err(StoreError::PaginationStalled {
                    endpoint: endpoint.to_string(),
                    token,
                });
            }
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    tracing::debug!(endpoint, pages, items = names.len(), "listing complete");
    Ok(names)
}
