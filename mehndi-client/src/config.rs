/// Client configuration
///
/// # Environment Variables
///
/// - `MEHNDI_API_BASE_URL`: API root including the `/api` prefix
///   (default: http://localhost:5000/api)
/// - `MEHNDI_TOKEN_PATH`: File that persists the bearer token; when unset the
///   token is kept in memory only
/// - `MEHNDI_API_TIMEOUT_SECS`: Per-request timeout (default: 30)

use crate::error::ClientError;
use std::{env, path::PathBuf, time::Duration};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without a trailing slash
    pub base_url: String,

    /// Where the token is persisted, if anywhere
    pub token_path: Option<PathBuf>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// In-memory token, default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            token_path: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Persists the token at `path`
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from environment variables (and `.env`)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if `MEHNDI_API_TIMEOUT_SECS` is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("MEHNDI_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(base_url);

        if let Ok(path) = env::var("MEHNDI_TOKEN_PATH") {
            if !path.trim().is_empty() {
                config.token_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(value) = env::var("MEHNDI_API_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&value)?;
        }

        Ok(config)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_timeout(value: &str) -> Result<Duration, ClientError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| {
            ClientError::Config(format!("Invalid MEHNDI_API_TIMEOUT_SECS '{}'", value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert!(config.token_path.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = ClientConfig::new("https://api.mehndi.studio/api/");
        assert_eq!(config.base_url, "https://api.mehndi.studio/api");
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new("http://127.0.0.1:5000/api")
            .with_token_path("/tmp/mehndi-token")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.token_path, Some(PathBuf::from("/tmp/mehndi-token")));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("10").unwrap(), Duration::from_secs(10));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
