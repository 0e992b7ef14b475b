//! # droply-api
//!
//! HTTP API layer for Droply built on Axum.
//!
//! Every route except health resolves the caller from a bearer token
//! before any service runs. Domain errors become status codes in one
//! place, [`error::ApiError`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
