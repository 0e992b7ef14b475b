//! Bearer token issuance for local development and operator tooling.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use droply_core::config::auth::AuthConfig;
use droply_core::error::{AppError, ErrorKind};
use droply_core::types::OwnerId;

use super::claims::IdentityClaims;

/// Signs identity tokens with the shared secret the verifier checks.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: Option<String>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates an issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
        }
    }

    /// Issue a token for `owner` valid for `ttl`.
    pub fn issue(&self, owner: &OwnerId, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = IdentityClaims {
            sub: owner.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.issuer.clone(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign identity token", e)
        })
    }
}
