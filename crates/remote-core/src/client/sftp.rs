//! SFTP credential validation.

use tokio_util::sync::CancellationToken;
use tracing::{instrument, warn};

use crate::Result;
use crate::error::Error;
use crate::traits::Transport;
use crate::types::{SftpAuthRequest, SftpAuthResponse};

use super::{RemoteClient, decode, encode};

impl<T: Transport> RemoteClient<T> {
    /// Asks the Panel whether the username and password belong to a server
    /// on this node.
    ///
    /// A 4xx answer means the credentials are not valid for any server and
    /// yields [`Error::InvalidCredentials`] after logging an audit warning.
    /// A 429 is the Panel throttling this node and is returned as a regular
    /// [`Error::Remote`] so callers can treat it as transient. Any other
    /// error status is also returned as [`Error::Remote`].
    #[instrument(skip(self, ctx, request), fields(username = %request.username, ip = %request.ip))]
    pub async fn validate_sftp_credentials(
        &self,
        ctx: &CancellationToken,
        request: &SftpAuthRequest,
    ) -> Result<SftpAuthResponse> {
        let body = encode(request)?;
        let res = self.post(ctx, "/sftp/auth", Some(body)).await?;

        let outcome = match res.error() {
            Some(err) if err.is_client_error() && !err.is_rate_limited() => {
                warn!(
                    subsystem = "sftp",
                    username = %request.username,
                    ip = %request.ip,
                    "{}",
                    err
                );
                Err(Error::InvalidCredentials)
            }
            _ => decode(&res),
        };

        res.close();
        outcome
    }
}
