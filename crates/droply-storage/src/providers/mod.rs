//! Blob store implementations.

pub mod local;
pub mod memory;
pub mod remote;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
pub use remote::RemoteBlobStore;
