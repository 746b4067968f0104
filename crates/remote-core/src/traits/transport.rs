//! Transport trait and the response it hands back.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::error::RemoteError;

/// Query parameters for a GET request.
pub type Query<'a> = &'a [(&'a str, String)];

/// An authenticated HTTP transport to the Panel remote API.
///
/// Implementations resolve `path` (e.g. `/servers/reset`) against their base
/// URL and attach credentials. Cancellation is cooperative: callers drop the
/// returned future to abort an in-flight request.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Issue a GET request with the given query parameters.
    async fn get(&self, path: &str, query: Query<'_>) -> Result<Response>;

    /// Issue a POST request with an optional JSON body.
    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Result<Response>;
}

type ReleaseFn = Box<dyn FnOnce() + Send + Sync>;

/// A response from the Panel.
///
/// The body handle is released exactly once: either through [`close`] or,
/// on any early-return path, when the response is dropped.
///
/// [`close`]: Response::close
pub struct Response {
    status: u16,
    body: Vec<u8>,
    release: Option<ReleaseFn>,
}

impl Response {
    /// Create a response from a status code and a fully-read body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            release: None,
        }
    }

    /// Attach a hook that runs when the body is released.
    pub fn on_release(mut self, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns true if the status is outside the 2xx range.
    pub fn has_error(&self) -> bool {
        !(200..300).contains(&self.status)
    }

    /// Returns the Panel error carried by this response, if any.
    ///
    /// The first entry of the Panel's error envelope is reported. A missing
    /// or unparseable envelope still yields an error for non-2xx statuses.
    pub fn error(&self) -> Option<RemoteError> {
        if !self.has_error() {
            return None;
        }

        let first = serde_json::from_slice::<ErrorEnvelope>(&self.body)
            .ok()
            .and_then(|envelope| envelope.errors.into_iter().next());

        Some(match first {
            Some(entry) => RemoteError::new(self.status, entry.code, entry.detail),
            None => RemoteError::missing(self.status),
        })
    }

    /// Decode the body as JSON.
    pub fn bind_json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Release the body handle.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Response {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("body_len", &self.body.len())
            .field("released", &self.release.is_none())
            .finish()
    }
}

/// Panel error envelope: `{"errors": [{"code", "status", "detail"}]}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    code: String,
    #[serde(default)]
    detail: String,
}
