//! Upload credential handler.

use axum::Json;
use axum::extract::State;

use droply_auth::UploadCredential;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/auth/blob-token
///
/// Returned unwrapped: client upload widgets read the fields at top level.
pub async fn blob_token(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UploadCredential>, ApiError> {
    let credential = state.upload_credentials.issue(&auth.owner)?;
    tracing::debug!(owner_id = %auth.owner, expire = credential.expire, "Upload credential issued");
    Ok(Json(credential))
}
