//! Bearer token issuance for local testing.

use chrono::Duration;
use clap::{Args, Subcommand};

use droply_auth::TokenIssuer;
use droply_core::error::AppError;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Sign a token for an owner with the configured secret
    Issue {
        /// Owner id
        #[arg(short, long)]
        owner: String,
        /// Lifetime in minutes
        #[arg(short, long, default_value = "60")]
        ttl_minutes: i64,
    },
}

/// Execute token commands
pub async fn execute(args: &TokenArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let issuer = TokenIssuer::new(&config.auth);

    match &args.command {
        TokenCommand::Issue { owner, ttl_minutes } => {
            if *ttl_minutes <= 0 {
                return Err(AppError::validation("ttl-minutes must be positive"));
            }
            let ctx = super::context_for(owner)?;
            let token = issuer.issue(&ctx.owner, Duration::minutes(*ttl_minutes))?;
            println!("{}", token);
        }
    }

    Ok(())
}
