//! Request handlers for all API endpoints.

pub mod auth;
pub mod entry;
pub mod folder;
pub mod health;
pub mod trash;
