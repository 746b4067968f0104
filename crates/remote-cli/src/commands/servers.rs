//! Server subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use remote_core::CancellationToken;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct ServersCommand {
    #[command(subcommand)]
    pub command: ServersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ServersSubcommand {
    /// List every server assigned to this node
    List(ListArgs),

    /// Fetch the configuration of one server
    Get(UuidArgs),

    /// Fetch the installation script of one server
    InstallScript(UuidArgs),

    /// Report the outcome of an installation
    InstallStatus(StatusArgs),

    /// Report the outcome of an archive
    ArchiveStatus(StatusArgs),

    /// Report the outcome of a transfer
    TransferStatus(StatusArgs),

    /// Mark servers stuck installing or restoring as installed
    Reset,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Servers requested per page
    #[arg(long, default_value_t = 50)]
    pub per_page: u32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct UuidArgs {
    /// Server UUID
    pub uuid: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Server UUID
    pub uuid: String,

    /// Report the operation as failed
    #[arg(long)]
    pub failed: bool,
}

pub async fn handle(cmd: ServersCommand, ctx: &CancellationToken) -> Result<()> {
    let client = config::connect()?;

    match cmd.command {
        ServersSubcommand::List(args) => {
            let servers = client
                .get_servers(ctx, args.per_page)
                .await
                .context("Failed to list servers")?;

            if servers.is_empty() {
                eprintln!("{}", "No servers assigned to this node.".dimmed());
                return Ok(());
            }

            for server in &servers {
                output::json(server, args.pretty)?;
            }
            Ok(())
        }
        ServersSubcommand::Get(args) => {
            let config = client
                .get_server_configuration(ctx, &args.uuid)
                .await
                .context("Failed to fetch server configuration")?;
            output::json(&config, args.pretty)
        }
        ServersSubcommand::InstallScript(args) => {
            let script = client
                .get_installation_script(ctx, &args.uuid)
                .await
                .context("Failed to fetch installation script")?;
            output::json(&script, args.pretty)
        }
        ServersSubcommand::InstallStatus(args) => {
            client
                .set_installation_status(ctx, &args.uuid, !args.failed)
                .await
                .context("Failed to report installation status")?;
            output::success(&format!("Installation status reported for {}", args.uuid));
            Ok(())
        }
        ServersSubcommand::ArchiveStatus(args) => {
            client
                .set_archive_status(ctx, &args.uuid, !args.failed)
                .await
                .context("Failed to report archive status")?;
            output::success(&format!("Archive status reported for {}", args.uuid));
            Ok(())
        }
        ServersSubcommand::TransferStatus(args) => {
            client
                .set_transfer_status(ctx, &args.uuid, !args.failed)
                .await
                .context("Failed to report transfer status")?;
            output::success(&format!("Transfer status reported for {}", args.uuid));
            Ok(())
        }
        ServersSubcommand::Reset => {
            client
                .reset_servers_state(ctx)
                .await
                .context("Failed to reset server states")?;
            output::success("Server states reset");
            Ok(())
        }
    }
}
