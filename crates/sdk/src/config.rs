//! Configuration types for the Sumble SDK.

use std::time::Duration;
use url::Url;

/// Production API root. Endpoint paths are joined beneath it.
pub const DEFAULT_BASE_URL: &str = "https://api.sumble.com/v3/";

/// Upstream calls that take longer than this fail with [`crate::SumbleError::Timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Sumble client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the Sumble API. Always ends with `/`.
    pub base_url: Url,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and API key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `Url::join` replaces the last path segment unless the base ends with a slash.
pub(crate) fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
