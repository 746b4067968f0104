//! SFTP credential check types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Request body for `POST /sftp/auth`.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
#[derive(Clone, Serialize)]
pub struct SftpAuthRequest {
    pub username: String,
    pub password: String,
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
}

impl SftpAuthRequest {
    /// Create a request for the given user, password and source address.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ip: ip.into(),
            session_id: None,
            client_version: None,
        }
    }

    pub fn with_session(
        mut self,
        session_id: impl Into<String>,
        client_version: impl Into<String>,
    ) -> Self {
        self.session_id = Some(session_id.into());
        self.client_version = Some(client_version.into());
        self
    }
}

impl fmt::Debug for SftpAuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SftpAuthRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("ip", &self.ip)
            .field("session_id", &self.session_id)
            .field("client_version", &self.client_version)
            .finish()
    }
}

/// Response from a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SftpAuthResponse {
    /// UUID of the server the credentials grant access to.
    pub server: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}
