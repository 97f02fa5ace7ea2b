//! HTTP transport layer for the Sumble SDK.

use crate::config::ClientConfig;
use crate::error::{SumbleError, SumbleResult};
use reqwest::{header, Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making authenticated API requests.
///
/// Holds no mutable state beyond the connection pool, so clones can be used
/// from any number of tasks at once.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> SumbleResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| SumbleError::Config("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .user_agent(concat!("sumble-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given endpoint path, relative to the base URL.
    fn build_url(&self, path: &str) -> SumbleResult<url::Url> {
        Ok(self.config.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Perform one request and return the parsed JSON body.
    ///
    /// Non-2xx responses become [`SumbleError::Api`] with the status and the
    /// response text. An empty success body is returned as `null`.
    pub async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> SumbleResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        debug!(method = %method, url = %url, "Sumble API request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_send_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_send_error)?;

        if !status.is_success() {
            warn!(status = status.as_u16(), path = path, "Sumble API returned an error");
            return Err(SumbleError::from_response(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> SumbleResult<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Execute a GET request.
    pub async fn get(&self, path: &str) -> SumbleResult<Value> {
        self.request::<()>(Method::GET, path, None).await
    }
}

fn map_send_error(err: reqwest::Error) -> SumbleError {
    if err.is_timeout() {
        SumbleError::Timeout
    } else {
        SumbleError::Http(err)
    }
}
