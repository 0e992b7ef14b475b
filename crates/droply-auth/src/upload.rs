//! Short-lived credentials that let a client upload straight to the blob
//! store without seeing the private key.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use droply_core::config::storage::{MAX_UPLOAD_TOKEN_TTL_SECONDS, StorageConfig};
use droply_core::error::{AppError, ErrorKind};
use droply_core::types::OwnerId;

/// Parameters a client attaches to a direct upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCredential {
    /// One-time token.
    pub token: String,
    /// Expiry as seconds since epoch.
    pub expire: i64,
    /// Signature over the token, expiry, and folder.
    pub signature: String,
    /// Public key identifying this account at the blob store.
    pub public_key: String,
    /// Base URL for delivered content.
    pub url_endpoint: String,
    /// Folder the credential is scoped to.
    pub folder: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct UploadClaims {
    token: String,
    exp: i64,
    folder: String,
    sub: String,
}

/// Issues [`UploadCredential`]s signed with the blob store private key.
#[derive(Clone)]
pub struct UploadCredentialIssuer {
    signing_key: EncodingKey,
    public_key: String,
    url_endpoint: String,
    root_folder: String,
    ttl: Duration,
}

impl std::fmt::Debug for UploadCredentialIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCredentialIssuer")
            .field("public_key", &self.public_key)
            .field("root_folder", &self.root_folder)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl UploadCredentialIssuer {
    /// Creates an issuer from storage configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            signing_key: EncodingKey::from_secret(config.remote.private_key.as_bytes()),
            public_key: config.remote.public_key.clone(),
            url_endpoint: config.remote.url_endpoint.clone(),
            root_folder: config.root_folder.trim_end_matches('/').to_string(),
            ttl: Duration::seconds(
                config
                    .upload_token_ttl_seconds
                    .min(MAX_UPLOAD_TOKEN_TTL_SECONDS) as i64,
            ),
        }
    }

    /// Issue a credential scoped to `owner`'s folder.
    pub fn issue(&self, owner: &OwnerId) -> Result<UploadCredential, AppError> {
        let token = Uuid::new_v4().to_string();
        let expire = (Utc::now() + self.ttl).timestamp();
        let folder = format!("{}/{}", self.root_folder, owner);

        let claims = UploadClaims {
            token: token.clone(),
            exp: expire,
            folder: folder.clone(),
            sub: owner.as_str().to_string(),
        };
        let signature = encode(&Header::default(), &claims, &self.signing_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign upload credential", e)
        })?;

        Ok(UploadCredential {
            token,
            expire,
            signature,
            public_key: self.public_key.clone(),
            url_endpoint: self.url_endpoint.clone(),
            folder,
        })
    }
}
