//! Typed operations against the Panel remote API.
//!
//! Every operation follows the same shape: dispatch through the
//! [`Transport`], check the status, then either decode the body or return
//! an acknowledgement. The response body is released on every path.

mod backups;
mod servers;
mod sftp;

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::Result;
use crate::error::{Error, InvalidInputError, TransportError};
use crate::traits::{Query, Response, Transport};

/// Client for the Panel remote API, generic over its transport.
///
/// Cloning is cheap; clones share the same transport.
pub struct RemoteClient<T> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    transport: T,
}

impl<T: Transport> RemoteClient<T> {
    /// Create a client that sends every request through `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            inner: Arc::new(ClientInner { transport }),
        }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    async fn get(
        &self,
        ctx: &CancellationToken,
        path: &str,
        query: Query<'_>,
    ) -> Result<Response> {
        debug!(path, "GET");
        trace!(?query, "query parameters");
        dispatch(ctx, self.inner.transport.get(path, query)).await
    }

    async fn post(
        &self,
        ctx: &CancellationToken,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        debug!(path, "POST");
        dispatch(ctx, self.inner.transport.post(path, body)).await
    }

    /// GET, check the status, decode the body.
    async fn get_json<R: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        query: Query<'_>,
    ) -> Result<R> {
        let res = self.get(ctx, path, query).await?;
        let decoded = decode(&res);
        res.close();
        decoded
    }

    /// GET and check the status; the body is not read.
    async fn get_ack(&self, ctx: &CancellationToken, path: &str) -> Result<()> {
        let res = self.get(ctx, path, &[]).await?;
        let outcome = acknowledge(&res);
        res.close();
        outcome
    }

    /// POST and check the status; the body is not read.
    async fn post_ack(
        &self,
        ctx: &CancellationToken,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        let res = self.post(ctx, path, body).await?;
        let outcome = acknowledge(&res);
        res.close();
        outcome
    }
}

impl<T> Clone for RemoteClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> std::fmt::Debug for RemoteClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient").finish_non_exhaustive()
    }
}

/// Race a transport call against cancellation of `ctx`.
///
/// On cancellation the transport future is dropped, aborting the request.
async fn dispatch<F>(ctx: &CancellationToken, call: F) -> Result<Response>
where
    F: Future<Output = Result<Response>>,
{
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(TransportError::Cancelled.into()),
        res = call => {
            let res = res?;
            trace!(status = res.status(), "response");
            Ok(res)
        }
    }
}

fn decode<R: DeserializeOwned>(res: &Response) -> Result<R> {
    if let Some(err) = res.error() {
        return Err(err.into());
    }
    res.bind_json()
}

fn acknowledge(res: &Response) -> Result<()> {
    match res.error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| {
        Error::InvalidInput(InvalidInputError::Other {
            message: e.to_string(),
        })
    })
}

fn successful(successful: bool) -> Option<serde_json::Value> {
    Some(serde_json::json!({ "successful": successful }))
}
