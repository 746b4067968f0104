//! Backup subcommand implementations.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use remote_core::{BackupRequest, CancellationToken};

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct BackupsCommand {
    #[command(subcommand)]
    pub command: BackupsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BackupsSubcommand {
    /// Request presigned upload URLs for a backup
    UploadUrls(UploadUrlsArgs),

    /// Report the outcome of a backup
    Status(StatusArgs),

    /// Report the outcome of a restoration
    RestoreStatus(RestoreStatusArgs),
}

#[derive(Args, Debug)]
pub struct UploadUrlsArgs {
    /// Backup UUID
    pub backup: String,

    /// Backup size in bytes
    #[arg(long)]
    pub size: i64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Backup UUID
    pub backup: String,

    /// SHA-1 checksum of the archive
    #[arg(long, required_unless_present = "failed")]
    pub checksum: Option<String>,

    /// Archive size in bytes
    #[arg(long, required_unless_present = "failed")]
    pub size: Option<i64>,

    /// Report the backup as failed
    #[arg(long)]
    pub failed: bool,
}

#[derive(Args, Debug)]
pub struct RestoreStatusArgs {
    /// Backup UUID
    pub backup: String,

    /// Report the restoration as failed
    #[arg(long)]
    pub failed: bool,
}

pub async fn handle(cmd: BackupsCommand, ctx: &CancellationToken) -> Result<()> {
    let client = config::connect()?;

    match cmd.command {
        BackupsSubcommand::UploadUrls(args) => {
            if args.size <= 0 {
                bail!("Backup size must be positive");
            }

            let urls = client
                .get_backup_remote_upload_urls(ctx, &args.backup, args.size)
                .await
                .context("Failed to fetch upload URLs")?;
            output::json(&urls, args.pretty)
        }
        BackupsSubcommand::Status(args) => {
            let request = match (args.failed, args.checksum, args.size) {
                (false, Some(checksum), Some(size)) => BackupRequest::successful(checksum, size),
                _ => BackupRequest::failed(),
            };

            client
                .set_backup_status(ctx, &args.backup, &request)
                .await
                .context("Failed to report backup status")?;
            output::success(&format!("Backup status reported for {}", args.backup));
            Ok(())
        }
        BackupsSubcommand::RestoreStatus(args) => {
            client
                .send_restoration_status(ctx, &args.backup, !args.failed)
                .await
                .context("Failed to report restoration status")?;
            output::success(&format!("Restoration status reported for {}", args.backup));
            Ok(())
        }
    }
}
