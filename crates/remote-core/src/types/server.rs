//! Server definitions returned by the Panel.

use serde::{Deserialize, Serialize};

/// Stop a server by writing a command to its console.
pub const PROCESS_STOP_COMMAND: &str = "command";

/// Stop a server by sending a signal to its process.
pub const PROCESS_STOP_SIGNAL: &str = "signal";

/// Stop a server using the container runtime's native stop.
pub const PROCESS_STOP_NATIVE_STOP: &str = "stop";

/// Pagination metadata attached to every paged collection response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub from: u32,
    #[serde(default)]
    pub to: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
}

/// A single server as listed by the Panel.
///
/// Settings and process configuration are kept as raw JSON; interpretation
/// is left to the server subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawServerData {
    pub uuid: String,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub process_configuration: serde_json::Value,
}

/// Response from `GET /servers/{uuid}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfigurationResponse {
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub process_configuration: Option<ProcessConfiguration>,
}

/// How the daemon should start, stop and configure a server process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessConfiguration {
    #[serde(default)]
    pub startup: StartupConfiguration,
    #[serde(default)]
    pub stop: StopConfiguration,
    /// Configuration file rewrites, left uninterpreted.
    #[serde(default)]
    pub configs: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartupConfiguration {
    /// Console lines that mark the server as fully started.
    #[serde(default)]
    pub done: Vec<String>,
    #[serde(default)]
    pub user_interaction: Vec<String>,
    #[serde(default)]
    pub strip_ansi: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopConfiguration {
    #[serde(rename = "type", default)]
    pub kind: Option<StopKind>,
    /// Console command or signal name, depending on `kind`.
    #[serde(default)]
    pub value: String,
}

/// The stop-semantics vocabulary shared with the process supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopKind {
    #[serde(rename = "command")]
    Command,
    #[serde(rename = "signal")]
    Signal,
    #[serde(rename = "stop")]
    NativeStop,
}

impl StopKind {
    /// Returns the wire value for this stop kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            StopKind::Command => PROCESS_STOP_COMMAND,
            StopKind::Signal => PROCESS_STOP_SIGNAL,
            StopKind::NativeStop => PROCESS_STOP_NATIVE_STOP,
        }
    }
}

/// Response from `GET /servers/{uuid}/install`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationScript {
    pub container_image: String,
    pub entrypoint: String,
    pub script: String,
}
