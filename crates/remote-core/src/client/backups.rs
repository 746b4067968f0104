//! Backup and restoration reporting.

use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::Result;
use crate::traits::Transport;
use crate::types::{BackupRemoteUploadResponse, BackupRequest};

use super::{RemoteClient, encode, successful};

impl<T: Transport> RemoteClient<T> {
    /// Requests presigned upload URLs for a backup of `size` bytes.
    #[instrument(skip(self, ctx))]
    pub async fn get_backup_remote_upload_urls(
        &self,
        ctx: &CancellationToken,
        backup: &str,
        size: i64,
    ) -> Result<BackupRemoteUploadResponse> {
        let query = [("size", size.to_string())];
        self.get_json(ctx, &format!("/backups/{}", backup), &query)
            .await
    }

    #[instrument(skip(self, ctx, data), fields(successful = data.successful))]
    pub async fn set_backup_status(
        &self,
        ctx: &CancellationToken,
        backup: &str,
        data: &BackupRequest,
    ) -> Result<()> {
        let body = encode(data)?;
        self.post_ack(ctx, &format!("/backups/{}", backup), Some(body))
            .await
    }

    /// Notifies the Panel that a restoration finished and the server can be
    /// marked active again.
    #[instrument(skip(self, ctx))]
    pub async fn send_restoration_status(
        &self,
        ctx: &CancellationToken,
        backup: &str,
        successful_restore: bool,
    ) -> Result<()> {
        self.post_ack(
            ctx,
            &format!("/backups/{}/restore", backup),
            successful(successful_restore),
        )
        .await
    }
}
