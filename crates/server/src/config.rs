use crate::session::SessionRegistry;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use sumble_mcp::{McpServer, ToolRegistry};
use sumble_sdk::{SumbleClient, DEFAULT_BASE_URL};
use tokio_util::sync::CancellationToken;

/// Values taken from the command line or environment. Each one, when set,
/// wins over the configuration file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Sumble API key
    #[arg(long, env = "SUMBLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Sumble API base URL
    #[arg(long, env = "SUMBLE_API_URL")]
    pub api_url: Option<String>,

    /// Host to bind to
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Seconds between SSE keep-alive comments
    #[arg(long, env = "SSE_KEEP_ALIVE_SECS")]
    pub keep_alive_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(skip)]
    pub api_key: ApiKey,

    #[serde(default)]
    pub server: ListenConfig,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Sumble credential. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    /// Path advertised in the `endpoint` event. `/message` and `/messages`
    /// are both routed either way.
    #[serde(default = "default_message_path")]
    pub message_path: String,

    /// Responses buffered per session before delivery waits on the client.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// How long a message submission waits for room on a full session
    /// channel before its response is dropped.
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_keep_alive_secs() -> u64 {
    15
}

fn default_message_path() -> String {
    "/message".to_string()
}

fn default_channel_capacity() -> usize {
    64
}

fn default_delivery_timeout_secs() -> u64 {
    5
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            keep_alive_secs: default_keep_alive_secs(),
            message_path: default_message_path(),
            channel_capacity: default_channel_capacity(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TransportConfig {
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }
}

impl ServerConfig {
    /// Defaults everywhere, with the given credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey(api_key.into()),
            server: Default::default(),
            transport: Default::default(),
            upstream: Default::default(),
        }
    }

    pub fn load(config_path: &Path, overrides: Overrides) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Self::new(String::new())
        };

        if let Some(api_key) = overrides.api_key {
            config.api_key = ApiKey(api_key);
        }
        if let Some(api_url) = overrides.api_url {
            config.upstream.base_url = api_url;
        }
        if let Some(host) = overrides.host {
            config.server.host = host;
        }
        if let Some(port) = overrides.port {
            config.server.port = port;
        }
        if let Some(secs) = overrides.keep_alive_secs {
            config.transport.keep_alive_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.expose().trim().is_empty() {
            bail!(
                "SUMBLE_API_KEY is not set. Export your Sumble API key \
                 (or pass --api-key) before starting the server"
            );
        }
        if self.transport.keep_alive_secs == 0 {
            bail!("transport.keep_alive_secs must be at least 1");
        }
        if self.transport.channel_capacity == 0 {
            bail!("transport.channel_capacity must be at least 1");
        }
        if self.transport.delivery_timeout_secs == 0 {
            bail!("transport.delivery_timeout_secs must be at least 1");
        }
        if self.upstream.timeout_secs == 0 {
            bail!("upstream.timeout_secs must be at least 1");
        }
        if !matches!(self.transport.message_path.as_str(), "/message" | "/messages") {
            bail!(
                "transport.message_path must be \"/message\" or \"/messages\", got {:?}",
                self.transport.message_path
            );
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
    pub sessions: Arc<SessionRegistry>,
    pub transport: TransportConfig,
    /// Host used in the advertised endpoint when the request names none.
    pub fallback_host: String,
    /// Cancelled on shutdown; every open event stream ends with it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = SumbleClient::builder()
            .api_key(config.api_key.expose())
            .base_url(&config.upstream.base_url)
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()
            .context("Failed to create Sumble API client")?;

        let mcp = Arc::new(McpServer::new(ToolRegistry::sumble(), client));
        let sessions = Arc::new(SessionRegistry::new(config.transport.channel_capacity));

        Ok(Self {
            mcp,
            sessions,
            transport: config.transport.clone(),
            fallback_host: format!("localhost:{}", config.server.port),
            shutdown: CancellationToken::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sumble-mcp-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn with_key() -> Overrides {
        Overrides {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_without_file() {
        let config = ServerConfig::load(Path::new("/nonexistent/sumble-mcp.toml"), with_key()).unwrap();

        assert_eq!(config.api_key.expose(), "sk-test");
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.transport.keep_alive(), Duration::from_secs(15));
        assert_eq!(config.transport.message_path, "/message");
        assert_eq!(config.transport.delivery_timeout(), Duration::from_secs(5));
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.upstream.timeout_secs, 30);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = ServerConfig::load(Path::new("/nonexistent/sumble-mcp.toml"), Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("SUMBLE_API_KEY"));

        let blank = Overrides {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(ServerConfig::load(Path::new("/nonexistent/sumble-mcp.toml"), blank).is_err());
    }

    #[test]
    fn test_file_values_and_overrides() {
        let path = temp_config(
            r#"
            [server]
            port = 10000

            [transport]
            keep_alive_secs = 30
            message_path = "/messages"

            [upstream]
            timeout_secs = 5
            "#,
        );

        let overrides = Overrides {
            api_key: Some("sk-test".to_string()),
            host: Some("127.0.0.1".to_string()),
            keep_alive_secs: Some(5),
            ..Default::default()
        };
        let config = ServerConfig::load(&path, overrides).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.bind_addr(), "127.0.0.1:10000");
        assert_eq!(config.transport.keep_alive_secs, 5);
        assert_eq!(config.transport.message_path, "/messages");
        assert_eq!(config.upstream.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_message_path_rejected() {
        let path = temp_config("[transport]\nmessage_path = \"/rpc\"\n");
        let result = ServerConfig::load(&path, with_key());
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        for content in [
            "[upstream]\ntimeout_secs = 0\n",
            "[transport]\ndelivery_timeout_secs = 0\n",
            "[transport]\nkeep_alive_secs = 0\n",
        ] {
            let path = temp_config(content);
            let result = ServerConfig::load(&path, with_key());
            std::fs::remove_file(&path).ok();

            assert!(result.is_err(), "accepted {:?}", content);
        }
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let config = ServerConfig::new("sk-very-secret");
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
