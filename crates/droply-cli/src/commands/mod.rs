//! CLI command definitions and dispatch.

pub mod config;
pub mod entries;
pub mod migrate;
pub mod token;
pub mod trash;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use droply_core::config::AppConfig;
use droply_core::error::AppError;
use droply_core::types::OwnerId;
use droply_database::repositories::EntryStore;
use droply_database::{DatabasePool, EntryRepository};
use droply_service::RequestContext;

use crate::output::OutputFormat;

/// Droply: personal file hierarchy over an external blob store
#[derive(Debug, Parser)]
#[command(name = "droply", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load on top of `config/default.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Browse an owner's entries
    Entries(entries::EntriesArgs),
    /// Inspect or empty an owner's trash
    Trash(trash::TrashArgs),
    /// Issue bearer tokens for local testing
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Config(args) => config::execute(args, &self.env).await,
            Commands::Entries(args) => entries::execute(args, &self.env, self.format).await,
            Commands::Trash(args) => trash::execute(args, &self.env, self.format).await,
            Commands::Token(args) => token::execute(args, &self.env).await,
        }
    }
}

/// Helper: load and validate configuration
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    let config = AppConfig::load(env)?;
    config.validate()?;
    Ok(config)
}

/// Helper: connect to the PostgreSQL metadata store
pub async fn connect_database(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.provider != "postgres" {
        return Err(AppError::configuration(format!(
            "database provider '{}' has no persistent state to operate on",
            config.database.provider
        )));
    }
    DatabasePool::connect(&config.database).await
}

/// Helper: entry repository over the configured database
pub async fn open_entry_store(config: &AppConfig) -> Result<Arc<dyn EntryStore>, AppError> {
    let pool = connect_database(config).await?;
    Ok(Arc::new(EntryRepository::new(pool.pool().clone())))
}

/// Helper: act on behalf of `owner`
pub fn context_for(owner: &str) -> Result<RequestContext, AppError> {
    let owner = OwnerId::parse(owner).ok_or_else(|| AppError::validation("Owner id is required"))?;
    Ok(RequestContext::new(owner))
}
