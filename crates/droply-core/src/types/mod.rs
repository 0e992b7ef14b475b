//! Core type definitions used across the Droply workspace.

pub mod owner;

pub use owner::OwnerId;
