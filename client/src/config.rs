//! # Client Configuration
//!
//! Settings loaded from environment variables and validated before use.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `CHAT_API_BASE_URL` | `http://127.0.0.1:3001` | Backend root; resource roots hang below it |
//! | `CHAT_API_TIMEOUT_SECS` | `10` | Per-request timeout, `0` disables it |
//! | `CHAT_LOG_DIR` | unset | Write daily-rotated logs here instead of stderr |
//! | `RUST_LOG` | `chat_client=info,warn` | Log filter |
//!
//! ```rust,no_run
//! use chat_client::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?;
//! config.validate()?;
//! # Ok::<(), chat_client::core::ApiError>(())
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::core::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "chat_client=info,warn";

/// Runtime configuration of the API clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root URL, e.g. `https://api.example.com/v1`.
    pub base_url: String,

    /// Transport timeout. `None` waits for as long as the server takes.
    pub timeout: Option<Duration>,

    /// Log directory for the rolling file appender.
    pub log_dir: Option<PathBuf>,

    /// `tracing_subscriber::EnvFilter` directive.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            log_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CHAT_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("CHAT_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ApiError::Config(format!("CHAT_API_TIMEOUT_SECS must be a valid number: {}", e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let log_dir = lookup("CHAT_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            base_url,
            timeout,
            log_dir,
            log_level,
        })
    }

    /// Check the values before building clients from them.
    pub fn validate(&self) -> Result<()> {
        let url = self.parsed_base_url()?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::Config(format!(
                "CHAT_API_BASE_URL must use http or https, got {}",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::Config(
                "CHAT_API_BASE_URL must not carry a query or fragment".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("CHAT_API_BASE_URL is not a valid URL: {}", e)))
    }
}
