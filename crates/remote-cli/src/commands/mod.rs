//! Subcommand implementations.

pub mod backups;
pub mod configure;
pub mod servers;
pub mod sftp;

use anyhow::Result;
use remote_core::CancellationToken;

use crate::cli::Commands;

pub async fn handle(cmd: Commands, ctx: &CancellationToken) -> Result<()> {
    match cmd {
        Commands::Configure(args) => configure::run(args),
        Commands::Servers(cmd) => servers::handle(cmd, ctx).await,
        Commands::Backups(cmd) => backups::handle(cmd, ctx).await,
        Commands::Sftp(cmd) => sftp::handle(cmd, ctx).await,
    }
}
