//! reqwest-backed transport for the Panel remote API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, trace};

use remote_core::error::{Error, InvalidInputError, TransportError};
use remote_core::traits::{Query, Response, Transport};
use remote_core::{PanelUrl, Result};

/// Media type the Panel expects from the daemon.
const PANEL_MEDIA_TYPE: &str = "application/vnd.pterodactyl.v1+json";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP transport that authenticates with the node's token pair.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    panel: PanelUrl,
    timeout: Duration,
}

impl HttpTransport {
    /// Start building a transport for the given Panel.
    pub fn builder(panel: PanelUrl) -> HttpTransportBuilder {
        HttpTransportBuilder {
            panel,
            token_id: String::new(),
            token: String::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("panel-remote/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Returns the Panel URL this transport is configured for.
    pub fn panel(&self) -> &PanelUrl {
        &self.panel
    }

    async fn read(&self, response: reqwest::Response) -> Result<Response> {
        let status = response.status();
        trace!(status = %status, "Panel response");

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        Ok(Response::new(status.as_u16(), body.to_vec()))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        err.into()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, query), fields(panel = %self.panel))]
    async fn get(&self, path: &str, query: Query<'_>) -> Result<Response> {
        let url = self.panel.remote_url(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.read(response).await
    }

    #[instrument(skip(self, body), fields(panel = %self.panel))]
    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Result<Response> {
        let url = self.panel.remote_url(path);
        debug!(%url, "POST");

        let mut request = self.client.post(&url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.read(response).await
    }
}

/// Builder for [`HttpTransport`].
pub struct HttpTransportBuilder {
    panel: PanelUrl,
    token_id: String,
    token: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpTransportBuilder {
    /// Node token id and secret, sent as `Bearer {id}.{token}`.
    pub fn token(mut self, token_id: impl Into<String>, token: impl Into<String>) -> Self {
        self.token_id = token_id.into();
        self.token = token.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the token contains characters not allowed in a
    /// header, or if the HTTP client cannot be initialised.
    pub fn build(self) -> Result<HttpTransport> {
        let client = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .default_headers(self.headers()?)
            .build()
            .map_err(|e| TransportError::Http {
                message: e.to_string(),
            })?;

        Ok(HttpTransport {
            client,
            panel: self.panel,
            timeout: self.timeout,
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}.{}", self.token_id, self.token))
            .map_err(|_| InvalidInputError::Other {
                message: "node token contains invalid characters".to_string(),
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(PANEL_MEDIA_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl std::fmt::Debug for HttpTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportBuilder")
            .field("panel", &self.panel)
            .field("token_id", &self.token_id)
            .field("token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}
