//! Typed path parameters.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use droply_core::error::AppError;

use crate::error::ApiError;

/// Entry id taken from the `{id}` path segment.
///
/// A segment that is not a UUID cannot name any entry, so it is answered
/// like an unknown id.
#[derive(Debug, Clone, Copy)]
pub struct EntryId(pub Uuid);

impl<S> FromRequestParts<S> for EntryId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError(AppError::not_found("File not found")))?;
        parse_entry_id(&raw).map(EntryId).map_err(ApiError)
    }
}

/// Parses an entry id, treating malformed input as not found.
pub fn parse_entry_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        tracing::debug!(id = %raw, "Malformed entry id in path");
        AppError::not_found("File not found")
    })
}
