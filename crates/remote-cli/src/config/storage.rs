//! Configuration storage.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::NodeConfig;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Get the configuration file path.
fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "panel-remote")
        .context("Could not determine config directory")?;

    let config_dir = dirs.config_dir();
    fs::create_dir_all(config_dir).context("Failed to create config directory")?;

    Ok(config_dir.join("config.json"))
}

/// Save the configuration to disk, readable only by the current user.
pub fn save_config(config: &NodeConfig) -> Result<PathBuf> {
    let path = config_path()?;
    let json = serde_json::to_string_pretty(config)?;

    fs::write(&path, &json).context("Failed to write config file")?;

    // The file holds the node token.
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

/// Load the configuration from disk, if one has been saved.
pub fn load_config() -> Result<Option<NodeConfig>> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read config file")?;
    let config: NodeConfig = serde_json::from_str(&json).context("Invalid config file")?;

    Ok(Some(config))
}
