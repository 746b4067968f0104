//! remote-core - Panel remote API types, transport seam and operations.
//!
//! All operations flow through a [`RemoteClient`], which is generic over the
//! [`Transport`] that actually talks HTTP to the Panel.
//!
//! # Example
//!
//! ```no_run
//! use remote_core::{CancellationToken, RemoteClient, Transport};
//!
//! # async fn example<T: Transport>(transport: T) -> remote_core::Result<()> {
//! let client = RemoteClient::new(transport);
//! let ctx = CancellationToken::new();
//!
//! for server in client.get_servers(&ctx, 50).await? {
//!     println!("{}", server.uuid);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::RemoteClient;
pub use error::Error;
pub use tokio_util::sync::CancellationToken;
pub use traits::{Response, Transport};
pub use types::{
    BackupRemoteUploadResponse, BackupRequest, InstallationScript, Pagination, PanelUrl,
    RawServerData, ServerConfigurationResponse, SftpAuthRequest, SftpAuthResponse, StopKind,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
