//! Bearer token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use droply_core::config::auth::AuthConfig;
use droply_core::error::AppError;
use droply_core::types::OwnerId;

use super::claims::IdentityClaims;

/// Resolves a bearer token to the caller's owner id.
#[derive(Clone)]
pub struct IdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl IdentityVerifier {
    /// Creates a verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validate `token` and return the owner it identifies.
    pub fn verify(&self, token: &str) -> Result<OwnerId, AppError> {
        let claims = self.decode(token)?;
        let owner = OwnerId::parse(claims.sub)
            .ok_or_else(|| AppError::authentication("Token subject is empty"))?;
        debug!(owner_id = %owner, "Verified caller identity");
        Ok(owner)
    }

    fn decode(&self, token: &str) -> Result<IdentityClaims, AppError> {
        decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::authentication("Unexpected token issuer")
                }
                jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(claim) => {
                    AppError::authentication(format!("Token is missing the '{claim}' claim"))
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use droply_core::error::ErrorKind;

    use super::*;
    use crate::jwt::TokenIssuer;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            issuer: None,
            leeway_seconds: 0,
        }
    }

    #[test]
    fn test_roundtrip_identity() {
        let token = TokenIssuer::new(&config())
            .issue(&OwnerId::parse("user_1").expect("owner"), Duration::minutes(5))
            .expect("issue");
        let owner = IdentityVerifier::new(&config()).verify(&token).expect("verify");
        assert_eq!(owner.as_str(), "user_1");
    }

    #[test]
    fn test_rejects_foreign_secret() {
        let mut other = config();
        other.jwt_secret = "other".into();
        let token = TokenIssuer::new(&other)
            .issue(&OwnerId::parse("user_1").expect("owner"), Duration::minutes(5))
            .expect("issue");
        let err = IdentityVerifier::new(&config()).verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_rejects_expired() {
        let token = TokenIssuer::new(&config())
            .issue(&OwnerId::parse("user_1").expect("owner"), Duration::minutes(-5))
            .expect("issue");
        let err = IdentityVerifier::new(&config()).verify(&token).unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = IdentityVerifier::new(&config()).verify("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_enforces_issuer() {
        let mut with_issuer = config();
        with_issuer.issuer = Some("https://id.example.com".into());
        let token = TokenIssuer::new(&config())
            .issue(&OwnerId::parse("user_1").expect("owner"), Duration::minutes(5))
            .expect("issue");
        let err = IdentityVerifier::new(&with_issuer).verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Token is missing the 'iss' claim");
    }

    #[test]
    fn test_issuer_must_match() {
        let mut with_issuer = config();
        with_issuer.issuer = Some("https://id.example.com".into());
        let mut other_issuer = config();
        other_issuer.issuer = Some("https://evil.example.com".into());
        let owner = OwnerId::parse("user_1").expect("owner");

        let good = TokenIssuer::new(&with_issuer)
            .issue(&owner, Duration::minutes(5))
            .expect("issue");
        let verified = IdentityVerifier::new(&with_issuer).verify(&good).expect("verify");
        assert_eq!(verified, owner);

        let foreign = TokenIssuer::new(&other_issuer)
            .issue(&owner, Duration::minutes(5))
            .expect("issue");
        let err = IdentityVerifier::new(&with_issuer).verify(&foreign).unwrap_err();
        assert_eq!(err.message, "Unexpected token issuer");
    }
}
