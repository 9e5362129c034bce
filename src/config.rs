use crate::error::{EiaError, Result};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.eia.gov/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const API_KEY_ENV: &str = "EIA_API_KEY";
pub const BASE_URL_ENV: &str = "EIA_BASE_URL";

/// EIA API key. Sent verbatim as the `api_key` query parameter.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Settings used to build a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the v2 API, without a trailing slash.
    pub base_url: String,
    pub api_key: ApiKey,
    /// Total per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: ApiKey::new(""),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Read `EIA_API_KEY` (required) and `EIA_BASE_URL` (optional) from the environment.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| EiaError::Config(format!("{} is not set", API_KEY_ENV)))?;
        let mut cfg = Self::new(key);
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                cfg = cfg.with_base_url(url);
            }
        }
        Ok(cfg)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_eia_v2() {
        let cfg = ClientConfig::new("k");
        assert_eq!(cfg.base_url, "https://api.eia.gov/v2");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.api_key.as_str(), "k");
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let cfg = ClientConfig::new("k").with_base_url("http://localhost:8080/v2/");
        assert_eq!(cfg.base_url, "http://localhost:8080/v2");
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert!(!format!("{:?}", key).contains("super-secret"));
    }
}
