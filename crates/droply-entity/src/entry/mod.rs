//! Entry (file or folder) entity.

pub mod model;

pub use model::{CreateEntry, Entry, EntryContent, EntryPatch, extension_of};
