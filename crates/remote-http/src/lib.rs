//! remote-http - reqwest-backed transport for the Panel remote API.

mod transport;

pub use transport::{DEFAULT_TIMEOUT, HttpTransport, HttpTransportBuilder};

use remote_core::{PanelUrl, RemoteClient, Result};

/// Build a [`RemoteClient`] that talks to `panel` over HTTP.
pub fn connect(
    panel: PanelUrl,
    token_id: &str,
    token: &str,
) -> Result<RemoteClient<HttpTransport>> {
    let transport = HttpTransport::builder(panel).token(token_id, token).build()?;
    Ok(RemoteClient::new(transport))
}
