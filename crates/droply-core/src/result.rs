//! Convenience result type alias for Droply.

use crate::error::AppError;

/// A specialized `Result` type for Droply operations.
pub type AppResult<T> = Result<T, AppError>;
