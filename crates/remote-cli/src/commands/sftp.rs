//! SFTP subcommand implementations.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use remote_core::{CancellationToken, SftpAuthRequest};

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct SftpCommand {
    #[command(subcommand)]
    pub command: SftpSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SftpSubcommand {
    /// Check a username and password against the Panel
    Auth(AuthArgs),
}

#[derive(Args, Debug)]
pub struct AuthArgs {
    /// SFTP username
    #[arg(long)]
    pub username: String,

    /// SFTP password
    #[arg(long)]
    pub password: String,

    /// Address the login came from
    #[arg(long, default_value = "127.0.0.1")]
    pub ip: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn handle(cmd: SftpCommand, ctx: &CancellationToken) -> Result<()> {
    match cmd.command {
        SftpSubcommand::Auth(args) => auth(args, ctx).await,
    }
}

async fn auth(args: AuthArgs, ctx: &CancellationToken) -> Result<()> {
    let client = config::connect()?;
    let request = SftpAuthRequest::new(args.username, args.password, args.ip);

    match client.validate_sftp_credentials(ctx, &request).await {
        Ok(response) => {
            output::success("Credentials accepted");
            output::json(&response, args.pretty)
        }
        Err(err) if err.is_invalid_credentials() => {
            output::error("Credentials rejected");
            bail!("Invalid SFTP credentials for {}", request.username)
        }
        Err(err) => Err(err).context("Failed to validate SFTP credentials"),
    }
}
