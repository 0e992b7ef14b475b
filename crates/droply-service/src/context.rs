//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};

use droply_core::types::OwnerId;

/// Context for the current authenticated request.
///
/// Every service method takes one, and every repository call it makes is
/// scoped to `owner`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated caller.
    pub owner: OwnerId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            request_time: Utc::now(),
        }
    }
}
