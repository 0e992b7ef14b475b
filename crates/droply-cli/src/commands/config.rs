//! Configuration inspection commands.

use clap::{Args, Subcommand};

use droply_core::config::AppConfig;
use droply_core::error::AppError;
use droply_database::connection::mask_password;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate the effective configuration
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, env: &str) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = AppConfig::load(env)?;
            output::print_item(&redacted(config));
        }
        ConfigCommand::Validate => {
            let config = AppConfig::load(env)?;
            if let Err(e) = config.validate() {
                output::print_error(&format!("Configuration invalid: {}", e.message));
                return Err(e);
            }
            output::print_success(&format!("Configuration '{}' is valid", env));
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv(
                "Database",
                &format!(
                    "{} {}",
                    config.database.provider,
                    mask_password(&config.database.url)
                ),
            );
            output::print_kv("Blob store", &config.storage.provider);
            output::print_kv("Blob root folder", &config.storage.root_folder);
            if config.auth.jwt_secret == AppConfig::default().auth.jwt_secret {
                output::print_warning("auth.jwt_secret is still the built-in default");
            }
        }
    }

    Ok(())
}

fn redacted(mut config: AppConfig) -> AppConfig {
    const MASK: &str = "****";
    config.database.url = mask_password(&config.database.url);
    config.auth.jwt_secret = MASK.to_string();
    if !config.storage.remote.private_key.is_empty() {
        config.storage.remote.private_key = MASK.to_string();
    }
    config
}
