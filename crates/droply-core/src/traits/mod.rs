//! Core traits defined in `droply-core` and implemented by other crates.

pub mod blob;

pub use blob::{BlobStore, StoredBlob};
