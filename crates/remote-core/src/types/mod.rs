//! Panel remote API types.
//!
//! Request and response bodies exchanged with the Panel, plus the validated
//! [`PanelUrl`].

mod backup;
mod panel_url;
mod server;
mod sftp;

pub use backup::{BackupPart, BackupRemoteUploadResponse, BackupRequest};
pub use panel_url::PanelUrl;
pub use server::{
    InstallationScript, PROCESS_STOP_COMMAND, PROCESS_STOP_NATIVE_STOP, PROCESS_STOP_SIGNAL,
    Pagination, ProcessConfiguration, RawServerData, ServerConfigurationResponse,
    StartupConfiguration, StopConfiguration, StopKind,
};
pub use sftp::{SftpAuthRequest, SftpAuthResponse};
