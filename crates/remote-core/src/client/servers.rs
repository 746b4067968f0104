//! Server listing, configuration and lifecycle status operations.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, instrument, warn};

use crate::Result;
use crate::error::{DecodeError, Error, InvalidInputError, TransportError};
use crate::traits::Transport;
use crate::types::{InstallationScript, Pagination, RawServerData, ServerConfigurationResponse};

use super::{RemoteClient, successful};

/// One page of `GET /servers`.
#[derive(Debug, Deserialize)]
struct ServersPage {
    #[serde(default)]
    data: Vec<RawServerData>,
    meta: Pagination,
}

impl<T: Transport> RemoteClient<T> {
    /// Returns every server assigned to this node.
    ///
    /// The first page is fetched on its own to learn the page count; any
    /// remaining pages are then fetched concurrently. The first page to fail
    /// cancels the rest and is the error returned; no partial list is ever
    /// returned. Servers are not returned in any particular order.
    #[instrument(skip(self, ctx))]
    pub async fn get_servers(
        &self,
        ctx: &CancellationToken,
        per_page: u32,
    ) -> Result<Vec<RawServerData>> {
        let (first, meta) = self.get_servers_paged(ctx, 0, per_page).await?;
        if meta.last_page <= 1 {
            return Ok(first);
        }
        if meta.current_page > meta.last_page {
            return Err(DecodeError::new(format!(
                "current_page {} is past last_page {}",
                meta.current_page, meta.last_page
            ))
            .into());
        }

        debug!(
            current_page = meta.current_page,
            last_page = meta.last_page,
            "Fetching remaining server pages"
        );

        let servers = Arc::new(Mutex::new(first));
        let group = ctx.child_token();
        let mut tasks = JoinSet::new();

        for page in (meta.current_page..meta.last_page).map(|p| p + 1) {
            let client = self.clone();
            let group = group.clone();
            let servers = servers.clone();
            tasks.spawn(
                async move {
                    let (page_servers, _) =
                        client.get_servers_paged(&group, page, per_page).await?;
                    servers.lock().await.extend(page_servers);
                    Ok::<_, Error>(())
                }
                .in_current_span(),
            );
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.unwrap_or_else(|e| {
                Err(TransportError::Http {
                    message: format!("server page task failed: {e}"),
                }
                .into())
            });

            if let Err(err) = outcome
                && first_error.is_none()
            {
                warn!(error = %err, "Server page fetch failed, cancelling remaining pages");
                group.cancel();
                first_error = Some(err);
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }

        let servers = std::mem::take(&mut *servers.lock().await);
        Ok(servers)
    }

    /// Returns one page of servers and the pagination metadata reported
    /// alongside it. `page` is zero-based as sent to the Panel.
    #[instrument(skip(self, ctx))]
    pub async fn get_servers_paged(
        &self,
        ctx: &CancellationToken,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<RawServerData>, Pagination)> {
        if per_page == 0 {
            return Err(InvalidInputError::PageSize.into());
        }

        let query = [("page", page.to_string()), ("per_page", per_page.to_string())];
        let page: ServersPage = self.get_json(ctx, "/servers", &query).await?;
        Ok((page.data, page.meta))
    }

    /// Marks every server left "installing" or "restoring" as installed.
    ///
    /// Called once the daemon has booted all of its servers, so that a
    /// daemon exit in the middle of either process does not leave the Panel
    /// in a bad state.
    #[instrument(skip(self, ctx))]
    pub async fn reset_servers_state(&self, ctx: &CancellationToken) -> Result<()> {
        self.post_ack(ctx, "/servers/reset", None)
            .await
            .map_err(|e| e.context("failed to reset server state on Panel"))
    }

    #[instrument(skip(self, ctx))]
    pub async fn get_server_configuration(
        &self,
        ctx: &CancellationToken,
        uuid: &str,
    ) -> Result<ServerConfigurationResponse> {
        self.get_json(ctx, &format!("/servers/{}", uuid), &[]).await
    }

    #[instrument(skip(self, ctx))]
    pub async fn get_installation_script(
        &self,
        ctx: &CancellationToken,
        uuid: &str,
    ) -> Result<InstallationScript> {
        self.get_json(ctx, &format!("/servers/{}/install", uuid), &[])
            .await
    }

    #[instrument(skip(self, ctx))]
    pub async fn set_installation_status(
        &self,
        ctx: &CancellationToken,
        uuid: &str,
        successful_install: bool,
    ) -> Result<()> {
        self.post_ack(
            ctx,
            &format!("/servers/{}/install", uuid),
            successful(successful_install),
        )
        .await
    }

    #[instrument(skip(self, ctx))]
    pub async fn set_archive_status(
        &self,
        ctx: &CancellationToken,
        uuid: &str,
        successful_archive: bool,
    ) -> Result<()> {
        self.post_ack(
            ctx,
            &format!("/servers/{}/archive", uuid),
            successful(successful_archive),
        )
        .await
    }

    #[instrument(skip(self, ctx))]
    pub async fn set_transfer_status(
        &self,
        ctx: &CancellationToken,
        uuid: &str,
        successful_transfer: bool,
    ) -> Result<()> {
        let state = if successful_transfer { "success" } else { "failure" };
        self.get_ack(ctx, &format!("/servers/{}/transfer/{}", uuid, state))
            .await
    }
}
