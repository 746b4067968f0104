//! Panel URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Path prefix under which the Panel serves the daemon-facing API.
const REMOTE_API_PREFIX: &str = "/api/remote";

/// A validated Panel base URL.
///
/// Must use HTTPS, or HTTP when the host is a loopback address. A path prefix
/// is allowed for Panels served from a sub-directory.
///
/// # Example
///
/// ```
/// use remote_core::PanelUrl;
///
/// let panel = PanelUrl::new("https://panel.example.com").unwrap();
/// assert_eq!(panel.remote_url("/servers/reset"),
///            "https://panel.example.com/api/remote/servers/reset");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PanelUrl(Url);

impl PanelUrl {
    /// Create a new Panel URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::PanelUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the full URL of a remote API endpoint.
    ///
    /// `path` is expected to start with a slash, e.g. `/servers`.
    pub fn remote_url(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}{}", base, REMOTE_API_PREFIX, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::PanelUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::PanelUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::PanelUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for PanelUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PanelUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for PanelUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for PanelUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PanelUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
