//! `AuthUser` extractor: verifies the bearer token and yields the caller's
//! request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use droply_core::error::AppError;
use droply_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }

    /// Reject requests that name an owner other than the authenticated one.
    ///
    /// Clients echo their own id as `userId`; absence is fine, a mismatch
    /// is treated as an identity failure.
    pub fn ensure_claimed(&self, claimed: Option<&str>) -> Result<(), AppError> {
        match claimed.map(str::trim).filter(|c| !c.is_empty()) {
            Some(claimed) if self.0.owner != *claimed => {
                tracing::warn!(
                    owner_id = %self.0.owner,
                    claimed = %claimed,
                    "Claimed owner does not match token subject"
                );
                Err(AppError::authentication("Unauthorized"))
            }
            _ => Ok(()),
        }
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let owner = state.verifier.verify(token)?;
        Ok(AuthUser(RequestContext::new(owner)))
    }
}
