//! Permanent deletion and trash purge.

pub mod service;

pub use service::{PurgeReport, TrashService};
