//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{backups, configure, servers, sftp};

/// Node-side CLI for the Panel remote API.
#[derive(Parser, Debug)]
#[command(name = "panel-remote")]
#[command(author, version = env!("PANEL_REMOTE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the Panel URL and node token
    Configure(configure::ConfigureArgs),

    /// Server listing, configuration and lifecycle status
    Servers(servers::ServersCommand),

    /// Backup upload and status reporting
    Backups(backups::BackupsCommand),

    /// SFTP credential checks
    Sftp(sftp::SftpCommand),
}
