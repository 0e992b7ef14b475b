//! Entry use cases: browsing, renaming, starring, trashing, and uploads.

pub mod parent;
pub mod service;
pub mod upload;

pub use service::EntryService;
pub use upload::{UploadRequest, UploadService};
