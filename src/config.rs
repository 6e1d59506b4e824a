//! Client configuration loading: JSON file first, environment on top.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::api::ApiConfig;

/// Default location on disk where the client looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/client.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PONG_FRONT_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Immutable runtime configuration for the client.
pub struct AppConfig {
    api: ApiConfig,
}

impl AppConfig {
    /// Load the configuration file and apply environment overrides.
    pub fn load() -> Self {
        let config = Self::load_from(&resolve_config_path());
        Self {
            api: config.api.with_env_overrides(),
        }
    }

    /// Load the configuration from `path`, falling back to built-in defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        base_url = %app_config.api.base_url,
                        "loaded client config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Settings for the game API client.
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    api_path: Option<String>,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let mut api = value
            .base_url
            .map(ApiConfig::new)
            .unwrap_or_default();
        if let Some(api_path) = value.api_path {
            api = api.with_api_path(api_path);
        }
        if let Some(timeout_ms) = value.timeout_ms {
            api = api.with_timeout(Duration::from_millis(timeout_ms));
        }
        Self { api }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("pong-front-{}-{name}.json", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/definitely/not/here/client.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn file_values_replace_defaults() {
        let path = scratch_file(
            "full",
            r#"{"base_url": "http://pong.lan:8000", "api_path": "/v2/game", "timeout_ms": 1500}"#,
        );
        let config = AppConfig::load_from(&path);
        fs::remove_file(&path).ok();

        assert_eq!(config.api().collection_url(), "http://pong.lan:8000/v2/game");
        assert_eq!(config.api().timeout, Duration::from_millis(1500));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let path = scratch_file("partial", r#"{"base_url": "http://pong.lan:8000"}"#);
        let config = AppConfig::load_from(&path);
        fs::remove_file(&path).ok();

        assert_eq!(config.api().collection_url(), "http://pong.lan:8000/api/game");
        assert_eq!(config.api().timeout, ApiConfig::default().timeout);
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let path = scratch_file("broken", "{ not json");
        let config = AppConfig::load_from(&path);
        fs::remove_file(&path).ok();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn base_url_can_be_overridden_last() {
        let config = AppConfig::default().with_base_url("http://override:1");
        assert_eq!(config.api().base_url, "http://override:1");
    }
}
