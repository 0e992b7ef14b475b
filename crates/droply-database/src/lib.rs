//! # droply-database
//!
//! PostgreSQL connection management, migrations, and the entry
//! repositories behind the [`EntryStore`] contract.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{EntryRepository, EntryStore, MemoryEntryRepository};
