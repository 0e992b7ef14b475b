//! # droply-entity
//!
//! The `entries` table row and the value objects used to create and patch
//! it. Files and folders share one model; `is_folder` tells them apart.

pub mod entry;

pub use entry::model::{CreateEntry, Entry, EntryContent, EntryPatch};
