use std::time::Duration;

/// Base URL used when neither the config file nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Collection path exposed by the backend.
pub const DEFAULT_API_PATH: &str = "/api/game";
/// Per-request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BASE_URL_ENV: &str = "PONG_API_BASE_URL";
const TIMEOUT_ENV: &str = "PONG_API_TIMEOUT_MS";

/// Runtime configuration describing how to reach the game API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend.
    pub base_url: String,
    /// Collection path below `base_url`.
    pub api_path: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Construct a configuration for the given base URL with default path and timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_path: DEFAULT_API_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the collection path (e.g. `/api/game`).
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply `PONG_API_BASE_URL` and `PONG_API_TIMEOUT_MS` on top of this configuration.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn with_overrides(mut self, base_url: Option<String>, timeout_ms: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|value| !value.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(timeout) = timeout_ms
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
        {
            self.timeout = timeout;
        }
        self
    }

    /// Absolute URL of the collection endpoint.
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_path.trim_start_matches('/').trim_end_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_url_joins_slashes_once() {
        let config = ApiConfig::new("http://pong.local:8000/").with_api_path("/api/game/");
        assert_eq!(config.collection_url(), "http://pong.local:8000/api/game");
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.collection_url(), "http://localhost:5000/api/game");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn overrides_replace_only_valid_values() {
        let config = ApiConfig::default().with_overrides(
            Some("http://elsewhere:9000".into()),
            Some("250".into()),
        );
        assert_eq!(config.base_url, "http://elsewhere:9000");
        assert_eq!(config.timeout, Duration::from_millis(250));

        let untouched = ApiConfig::default().with_overrides(Some("  ".into()), Some("soon".into()));
        assert_eq!(untouched, ApiConfig::default());
    }
}
