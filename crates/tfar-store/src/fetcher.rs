//! Authenticated asset downloads.
//!
//! `GET {endpoint}/download/v1/{repository}/files/{file id}:download?alt=media`
//!
//! A download that does not answer 200 is an error and its response is
//! dropped on the spot, so a caller only ever holds a stream for a
//! successful download. Bodies are never buffered here; the caller decides
//! whether to stream or collect.

use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use tokio::io::AsyncBufRead;
use tokio_util::io::StreamReader;

use crate::error::StoreError;
use crate::transport::Transport;

/// Downloads store objects through the shared transport.
#[derive(Debug, Clone)]
pub struct AssetFetcher {
    transport: Arc<Transport>,
}

impl AssetFetcher {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Open the file `file_id` in repository `namespace`.
    pub async fn fetch(&self, namespace: &str, file_id: &str) -> Result<AssetStream, StoreError> {
        let repository = self.transport.repository(namespace);
        let object = format!("{repository}/files/{file_id}");

        let mut path: Vec<String> = vec!["download".into(), "v1".into()];
        path.extend(repository.split('/').map(String::from));
        path.push("files".into());
        path.push(format!("{file_id}:download"));

        let mut url = self.transport.url(&path)?;
        url.query_pairs_mut().append_pair("alt", "media");

        let resp = self
            .transport
            .get(url)
            .await?
            .send()
            .await
            .map_err(|e| StoreError::DownloadTransport {
                object: object.clone(),
                source: e,
            })?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            tracing::debug!(%object, status = status.as_u16(), "download rejected");
            return Err(StoreError::DownloadFailed {
                object,
                status: status.as_u16(),
            });
        }

        Ok(AssetStream {
            object,
            response: resp,
        })
    }
}

/// An open download. Dropping it releases the connection.
#[derive(Debug)]
pub struct AssetStream {
    object: String,
    response: reqwest::Response,
}

impl AssetStream {
    /// Store resource name of the object being read.
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Length advertised by the store, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Body as a stream of chunks.
    pub fn into_byte_stream(self) -> BoxStream<'static, Result<Bytes, std::io::Error>> {
        self.response
            .bytes_stream()
            .map_err(std::io::Error::other)
            .boxed()
    }

    /// Body as a buffered async reader.
    pub fn into_reader(self) -> impl AsyncBufRead + Send + Unpin {
        StreamReader::new(self.into_byte_stream())
    }

    /// Collect the whole body. Only for small auxiliary files.
    pub async fn into_bytes(self) -> Result<Bytes, StoreError> {
        let object = self.object;
        self.response
            .bytes()
            .await
            .map_err(|e| StoreError::AssetRead {
                object,
                source: std::io::Error::other(e),
            })
    }
}
