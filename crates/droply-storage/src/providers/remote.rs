//! Client for the remote media API.
//!
//! Uploads are multipart posts to the upload endpoint. Lookup and deletion
//! go through the management API. Every request authenticates with HTTP
//! basic auth using the private key as user name and an empty password.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info};

use droply_core::config::storage::RemoteStorageConfig;
use droply_core::error::{AppError, ErrorKind};
use droply_core::result::AppResult;
use droply_core::traits::{BlobStore, StoredBlob};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_id: String,
    url: String,
    file_path: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedFile {
    file_id: String,
}

/// Blob store backed by the remote media API.
#[derive(Debug, Clone)]
pub struct RemoteBlobStore {
    client: Client,
    upload_endpoint: Url,
    api_endpoint: Url,
    authorization: HeaderValue,
}

impl RemoteBlobStore {
    /// Build a client from configuration.
    pub fn new(config: &RemoteStorageConfig) -> AppResult<Self> {
        let upload_endpoint = parse_endpoint(&config.upload_endpoint)?;
        let api_endpoint = parse_endpoint(&format!(
            "{}/",
            config.api_endpoint.trim_end_matches('/')
        ))?;

        let credentials = STANDARD.encode(format!("{}:", config.private_key));
        let mut authorization = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid remote private key", e)
            })?;
        authorization.set_sensitive(true);

        let client = Client::builder().build().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })?;

        info!(upload = %upload_endpoint, api = %api_endpoint, "Remote blob store configured");
        Ok(Self {
            client,
            upload_endpoint,
            api_endpoint,
            authorization,
        })
    }

    fn files_url(&self, suffix: &str) -> AppResult<Url> {
        self.api_endpoint.join(suffix).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid media API path: {suffix}"),
                e,
            )
        })
    }
}

fn parse_endpoint(raw: &str) -> AppResult<Url> {
    Url::parse(raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Invalid media API endpoint: {raw}"),
            e,
        )
    })
}

fn transport_error(operation: &str, e: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Media API {operation} request failed"),
        e,
    )
}

fn status_error(operation: &str, status: StatusCode) -> AppError {
    AppError::external_service(format!("Media API {operation} returned {status}"))
}

#[async_trait]
impl BlobStore for RemoteBlobStore {
    fn provider_type(&self) -> &str {
        "remote"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut url = self.files_url("files")?;
        url.query_pairs_mut().append_pair("limit", "1");
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await
            .map_err(|e| transport_error("health", e))?;
        Ok(response.status().is_success())
    }

    async fn store(&self, data: Bytes, file_name: &str, folder: &str) -> AppResult<StoredBlob> {
        let size = data.len();
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(data.to_vec()).file_name(file_name.to_string()),
            )
            .text("fileName", file_name.to_string())
            .text("folder", folder.to_string())
            .text("useUniqueFileName", "false");

        let response = self
            .client
            .post(self.upload_endpoint.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error("upload", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error("upload", status));
        }
        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| transport_error("upload", e))?;

        debug!(file_id = %uploaded.file_id, path = %uploaded.file_path, size, "Uploaded blob");
        Ok(StoredBlob {
            store_id: uploaded.file_id,
            file_path: uploaded.file_path,
            url: uploaded.url,
            thumbnail_url: uploaded.thumbnail_url,
        })
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<String>> {
        let mut url = self.files_url("files")?;
        url.query_pairs_mut()
            .append_pair("searchQuery", &format!("name = \"{name}\""))
            .append_pair("limit", "1");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await
            .map_err(|e| transport_error("search", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error("search", status));
        }
        let files: Vec<ListedFile> = response
            .json()
            .await
            .map_err(|e| transport_error("search", e))?;
        Ok(files.into_iter().next().map(|f| f.file_id))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let url = self.files_url(&format!("files/{key}"))?;
        let response = self
            .client
            .delete(url)
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await
            .map_err(|e| transport_error("delete", e))?;

        match response.status() {
            status if status.is_success() => {
                debug!(key = %key, "Deleted remote blob");
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                debug!(key = %key, "Remote blob already absent");
                Ok(())
            }
            status => Err(status_error("delete", status)),
        }
    }
}
