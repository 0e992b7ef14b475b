//! Shared harness for HTTP-level tests over in-memory stores.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use droply_api::{AppState, build_app};
use droply_auth::TokenIssuer;
use droply_core::config::AppConfig;
use droply_core::error::AppError;
use droply_core::result::AppResult;
use droply_core::traits::{BlobStore, StoredBlob};
use droply_core::types::OwnerId;
use droply_database::MemoryEntryRepository;
use droply_storage::providers::MemoryBlobStore;

const BOUNDARY: &str = "droply-test-boundary";

/// Test application wrapping the full router.
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryEntryRepository>,
    pub blobs: Arc<MemoryBlobStore>,
    refusals: Arc<RefusingBlobStore>,
    issuer: TokenIssuer,
}

/// Memory blob store that refuses to delete selected objects.
#[derive(Debug)]
struct RefusingBlobStore {
    inner: Arc<MemoryBlobStore>,
    refused: Mutex<HashSet<String>>,
}

#[async_trait]
impl BlobStore for RefusingBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn store(&self, data: Bytes, file_name: &str, folder: &str) -> AppResult<StoredBlob> {
        self.inner.store(data, file_name, folder).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<String>> {
        self.inner.find_by_name(name).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let refused = self
            .refused
            .lock()
            .expect("lock")
            .iter()
            .any(|fragment| key.contains(fragment.as_str()));
        if refused {
            return Err(AppError::external_service("delete refused"));
        }
        self.inner.delete(key).await
    }
}

/// Status and decoded JSON body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "test-secret".to_string();
        config.storage.remote.public_key = "public_test".to_string();
        config.storage.remote.private_key = "private_test".to_string();
        config.storage.remote.url_endpoint = "https://cdn.example/droply".to_string();
        tweak(&mut config);

        let repo = Arc::new(MemoryEntryRepository::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let refusals = Arc::new(RefusingBlobStore {
            inner: blobs.clone(),
            refused: Mutex::new(HashSet::new()),
        });
        let issuer = TokenIssuer::new(&config.auth);
        let state = AppState::new(config, repo.clone(), refusals.clone());

        Self {
            router: build_app(state),
            repo,
            blobs,
            refusals,
            issuer,
        }
    }

    /// Make blob deletes fail for any object whose path contains `fragment`.
    pub fn refuse_blob_delete(&self, fragment: &str) {
        self.refusals
            .refused
            .lock()
            .expect("lock")
            .insert(fragment.to_string());
    }

    /// Bearer token for `owner`.
    pub fn token(&self, owner: &str) -> String {
        let owner = OwnerId::parse(owner).expect("owner");
        self.issuer
            .issue(&owner, chrono::Duration::minutes(5))
            .expect("token")
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };
        self.send(req).await
    }

    /// Multipart upload the way the browser client sends it.
    pub async fn upload(
        &self,
        token: &str,
        parent_id: Option<Uuid>,
        user_id: Option<&str>,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        let mut text_field = |name: &str, value: &str| {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        };
        if let Some(user_id) = user_id {
            text_field("userId", user_id);
        }
        if let Some(parent_id) = parent_id {
            text_field("parentId", &parent_id.to_string());
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/entries")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request");
        self.send(req).await
    }

    /// Create a root folder and return its id.
    pub async fn folder(&self, token: &str, name: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id_of(&response.body["data"])
    }

    /// Upload a small PDF into `parent` and return its id.
    pub async fn pdf(&self, token: &str, parent: Uuid, name: &str) -> Uuid {
        let response = self
            .upload(token, Some(parent), None, name, "application/pdf", b"%PDF-1.7")
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id_of(&response.body["data"]["file"])
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }
}

pub fn id_of(value: &Value) -> Uuid {
    value["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("entry id")
}
