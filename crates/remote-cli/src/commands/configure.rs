//! Configure command implementation.

use anyhow::{Context, Result};
use clap::Args;

use remote_core::PanelUrl;

use crate::config::{NodeConfig, storage};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Panel base URL
    #[arg(long)]
    pub url: String,

    /// Node token id
    #[arg(long)]
    pub token_id: String,

    /// Node token secret
    #[arg(long)]
    pub token: String,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

pub fn run(args: ConfigureArgs) -> Result<()> {
    let url = PanelUrl::new(&args.url).context("Invalid Panel URL")?;

    let config = NodeConfig {
        url,
        token_id: args.token_id,
        token: args.token,
        timeout_secs: args.timeout_secs,
    };

    let path = storage::save_config(&config).context("Failed to save configuration")?;

    output::success("Configuration saved");
    output::field("Panel", config.url.as_str());
    output::field("Path", &path.display().to_string());

    Ok(())
}
