//! Entry browsing commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use droply_core::error::AppError;
use droply_entity::Entry;
use droply_service::EntryService;
use droply_service::entry::parent::parse_parent_id;

use crate::output::{self, OutputFormat};

/// Arguments for entry commands
#[derive(Debug, Args)]
pub struct EntriesArgs {
    /// Entry subcommand
    #[command(subcommand)]
    pub command: EntriesCommand,
}

/// Entry subcommands
#[derive(Debug, Subcommand)]
pub enum EntriesCommand {
    /// List the children of a folder, or the owner's root set
    List {
        /// Owner id
        #[arg(short, long)]
        owner: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent: Option<String>,
    },
}

/// Entry display row
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    /// Entry ID
    pub id: String,
    /// Name
    pub name: String,
    /// "folder" or the MIME type
    pub kind: String,
    /// Size in bytes
    pub size: String,
    /// Starred
    pub starred: bool,
    /// Trashed
    pub trashed: bool,
    /// Last modified
    pub updated_at: String,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.clone(),
            kind: if entry.is_folder {
                "folder".to_string()
            } else {
                entry.mime_type.clone().unwrap_or_else(|| "-".to_string())
            },
            size: entry
                .size_bytes
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            starred: entry.is_starred,
            trashed: entry.is_trashed,
            updated_at: entry.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute entry commands
pub async fn execute(
    args: &EntriesArgs,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let service = EntryService::new(super::open_entry_store(&config).await?);

    match &args.command {
        EntriesCommand::List { owner, parent } => {
            let ctx = super::context_for(owner)?;
            let parent_id = parse_parent_id(parent.as_deref())?;
            let entries = service.list_children(&ctx, parent_id).await?;
            let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use droply_core::types::OwnerId;
    use droply_entity::{CreateEntry, EntryContent};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_row_for_folder_and_file() {
        let owner = OwnerId::parse("alice").expect("owner");
        let folder = CreateEntry::folder(&owner, None, "Docs").into_entry(Uuid::new_v4(), Utc::now());
        let row = EntryRow::from(&folder);
        assert_eq!(row.kind, "folder");
        assert_eq!(row.size, "-");

        let file = CreateEntry::file(
            &owner,
            Some(folder.id),
            "a.pdf",
            EntryContent {
                size_bytes: 42,
                mime_type: "application/pdf".into(),
                storage_path: "/droply/alice/a".into(),
                file_url: "https://cdn/a".into(),
                thumbnail_url: None,
            },
        )
        .into_entry(Uuid::new_v4(), Utc::now());
        let row = EntryRow::from(&file);
        assert_eq!(row.kind, "application/pdf");
        assert_eq!(row.size, "42");
    }
}
