//! Droply server
//!
//! Wires the metadata store, the blob store, and the HTTP layer together.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use droply_api::AppState;
use droply_core::config::AppConfig;
use droply_core::error::AppError;
use droply_database::repositories::EntryStore;
use droply_database::{DatabasePool, EntryRepository, MemoryEntryRepository};

#[tokio::main]
async fn main() {
    let env = std::env::var("DROPLY_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env).and_then(|c| c.validate().map(|_| c)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Droply v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Metadata store ───────────────────────────────────
    let (entry_store, db): (Arc<dyn EntryStore>, Option<DatabasePool>) =
        match config.database.provider.as_str() {
            "memory" => {
                tracing::warn!("Using in-memory metadata store, entries are lost on restart");
                (Arc::new(MemoryEntryRepository::new()), None)
            }
            _ => {
                let db = DatabasePool::connect(&config.database).await?;
                if config.database.run_migrations {
                    droply_database::migration::run_migrations(db.pool()).await?;
                }
                (Arc::new(EntryRepository::new(db.pool().clone())), Some(db))
            }
        };

    // ── Step 2: Blob store ───────────────────────────────────────
    let blob_store = droply_storage::build_blob_store(&config.storage).await?;
    tracing::info!(
        provider = blob_store.provider_type(),
        timeout_seconds = config.storage.operation_timeout_seconds,
        "Blob store ready"
    );

    // ── Step 3: Services and HTTP ────────────────────────────────
    let state = AppState::new(config, entry_store, blob_store);
    droply_api::serve(state).await?;

    // ── Step 4: Release connections ──────────────────────────────
    if let Some(db) = db {
        db.close().await;
    }
    tracing::info!("Droply shut down gracefully");
    Ok(())
}
