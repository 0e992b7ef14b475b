//! # droply-service
//!
//! The hierarchy manager. Each service coordinates the entry repository
//! and the blob store for one group of use cases and decides the order in
//! which the two stores are touched.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod entry;
pub mod folder;
pub mod policy;
pub mod trash;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use entry::{EntryService, UploadRequest, UploadService};
pub use folder::FolderService;
pub use policy::UploadPolicy;
pub use trash::{PurgeReport, TrashService};
