//! # droply-core
//!
//! Core crate for Droply. Contains the blob store trait, configuration
//! schemas, the owner identifier, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Droply crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
