//! Persisted connection settings for the CLI.

pub mod storage;

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use remote_core::{PanelUrl, RemoteClient};
use remote_http::{DEFAULT_TIMEOUT, HttpTransport};

/// Where the Panel lives and how this node authenticates to it.
#[derive(Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    pub url: PanelUrl,
    pub token_id: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl NodeConfig {
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Build a client from these settings.
    pub fn client(&self) -> Result<RemoteClient<HttpTransport>> {
        let transport = HttpTransport::builder(self.url.clone())
            .token(&self.token_id, &self.token)
            .timeout(self.timeout())
            .user_agent(concat!("panel-remote/", env!("PANEL_REMOTE_VERSION")))
            .build()
            .context("Failed to create HTTP transport")?;
        Ok(RemoteClient::new(transport))
    }
}

impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConfig")
            .field("url", &self.url)
            .field("token_id", &self.token_id)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Load the saved configuration and build a client from it.
pub fn connect() -> Result<RemoteClient<HttpTransport>> {
    let config = storage::load_config()
        .context("Failed to load configuration")?
        .context("No configuration found. Run 'panel-remote configure' first.")?;

    tracing::debug!(?config, "Loaded configuration");
    config.client()
}
