//! Trash inspection and purge commands.

use clap::{Args, Subcommand};

use droply_core::error::AppError;
use droply_service::TrashService;
use droply_storage::build_blob_store;

use super::entries::EntryRow;
use crate::output::{self, OutputFormat};

/// Arguments for trash commands
#[derive(Debug, Args)]
pub struct TrashArgs {
    /// Trash subcommand
    #[command(subcommand)]
    pub command: TrashCommand,
}

/// Trash subcommands
#[derive(Debug, Subcommand)]
pub enum TrashCommand {
    /// List an owner's trashed entries
    List {
        /// Owner id
        #[arg(short, long)]
        owner: String,
    },
    /// Permanently delete everything in an owner's trash
    Empty {
        /// Owner id
        #[arg(short, long)]
        owner: String,
    },
}

/// Execute trash commands
pub async fn execute(args: &TrashArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let entries = super::open_entry_store(&config).await?;
    let blobs = build_blob_store(&config.storage).await?;
    let service = TrashService::new(entries, blobs, config.storage.purge_concurrency);

    match &args.command {
        TrashCommand::List { owner } => {
            let ctx = super::context_for(owner)?;
            let trashed = service.list_trashed(&ctx).await?;
            let rows: Vec<EntryRow> = trashed.iter().map(EntryRow::from).collect();
            output::print_list(&rows, format);
        }
        TrashCommand::Empty { owner } => {
            let ctx = super::context_for(owner)?;
            let report = service.empty_trash(&ctx).await?;
            match format {
                OutputFormat::Json => output::print_item(&report),
                OutputFormat::Table => {
                    output::print_success(&report.message);
                    output::print_kv("Trashed", &report.trashed.to_string());
                    output::print_kv("Rows deleted", &report.deleted.to_string());
                    if report.blob_failures > 0 {
                        output::print_warning(&format!(
                            "{} blob(s) could not be removed and are orphaned",
                            report.blob_failures
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}
