//! # droply-storage
//!
//! Blob store implementations for Droply: a client for the remote media
//! API, a local filesystem store, and an in-memory store. Also hosts the
//! key derivation and the cleanup chain used when content is deleted.

pub mod cleanup;
pub mod key;
pub mod manager;
pub mod providers;
pub mod timeout;

pub use cleanup::remove_blob;
pub use key::{key_from_path, resolve_key};
pub use manager::build_blob_store;
pub use timeout::TimeoutBlobStore;
