//! Configuration loading for Reelgate.
//!
//! This crate parses `reelgate.toml` and applies environment overrides,
//! providing one configuration surface for the gateway, the credential
//! manager and the CLI. Every section has working defaults, so a missing
//! file is not an error; a malformed file is.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use reel_core::error::{GatewayError, GatewayResult};

/// Environment variable carrying the upstream API key
pub const ENV_API_KEY: &str = "TMDB_API_KEY";
/// Environment variable overriding the upstream locale
pub const ENV_LANGUAGE: &str = "TMDB_LANGUAGE";
/// Environment variable overriding the list-operation cache TTL (seconds)
pub const ENV_CACHE_SECONDS: &str = "TMDB_CACHE_SECONDS";
/// Environment variable overriding the protected backend base URL
pub const ENV_BACKEND_URL: &str = "REELGATE_API_URL";
/// Environment variable overriding the backend username
pub const ENV_BACKEND_USERNAME: &str = "REELGATE_USERNAME";
/// Environment variable overriding the backend password
pub const ENV_BACKEND_PASSWORD: &str = "REELGATE_PASSWORD";

/// Complete reelgate.toml configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Upstream catalog service settings
    pub upstream: UpstreamConfig,
    /// Per-operation cache TTLs
    pub cache: CacheSettings,
    /// Transport retry tuning
    pub retry: RetrySettings,
    /// Protected backend settings for the authenticated CLI commands
    pub backend: BackendConfig,
}

/// Upstream catalog service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// API key attached to every upstream request; empty means unconfigured
    pub api_key: String,
    /// Upstream base URL
    pub base_url: String,
    /// Locale attached to every upstream request
    pub language: String,
}

/// Per-operation cache TTLs, in seconds.
///
/// List operations default to the short TTL the original service used for
/// its volatile endpoints; per-movie details are far longer-lived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub trending: u64,
    pub recommendations: u64,
    pub search: u64,
    pub details: u64,
}

/// Transport retry tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,
    /// Initial backoff delay in milliseconds
    pub initial_delay_ms: u64,
    /// Backoff delay ceiling in milliseconds
    pub max_delay_ms: u64,
    /// Exponential backoff multiplier
    pub multiplier: f64,
    /// Fixed per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Protected backend settings for the authenticated CLI commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend base URL
    pub base_url: String,
    /// Username for the login exchange
    pub username: String,
    /// Password for the login exchange
    pub password: String,
    /// Authenticated endpoint probed to confirm a cached token
    pub probe_path: String,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            cache: CacheSettings::default(),
            retry: RetrySettings::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            language: "en-US".to_string(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            trending: 60,
            recommendations: 60,
            search: 60,
            details: 86_400,
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 600,
            max_delay_ms: 10_000,
            multiplier: 2.0,
            request_timeout_secs: 10,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            username: String::new(),
            password: String::new(),
            probe_path: "/api/favorites/".to_string(),
        }
    }
}

impl ReelConfig {
    /// Load configuration, resolving in order: explicit path, the default
    /// config location, built-in defaults. Environment overrides apply last.
    pub fn load(path: Option<&Path>) -> GatewayResult<Self> {
        let mut config = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_env_from(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML file
    pub fn from_file(path: &Path) -> GatewayResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GatewayError::io(format!("failed to read {}", path.display()), e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> GatewayResult<Self> {
        toml::from_str(content)
            .map_err(|e| GatewayError::config("reelgate.toml", e.to_string()))
    }

    /// Default config file location (`<config dir>/reelgate/reelgate.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reelgate").join("reelgate.toml"))
    }

    /// Apply environment overrides through an explicit lookup, so tests can
    /// substitute a map for the process environment.
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(key) = get(ENV_API_KEY) {
            self.upstream.api_key = key;
        }
        if let Some(language) = get(ENV_LANGUAGE) {
            self.upstream.language = language;
        }
        if let Some(seconds) = get(ENV_CACHE_SECONDS).and_then(|s| s.parse().ok()) {
            self.cache.trending = seconds;
            self.cache.recommendations = seconds;
            self.cache.search = seconds;
        }
        if let Some(url) = get(ENV_BACKEND_URL) {
            self.backend.base_url = url;
        }
        if let Some(username) = get(ENV_BACKEND_USERNAME) {
            self.backend.username = username;
        }
        if let Some(password) = get(ENV_BACKEND_PASSWORD) {
            self.backend.password = password;
        }
    }

    /// Validate internal consistency. Violations here are programming or
    /// deployment mistakes and abort at startup.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.upstream.base_url.is_empty() {
            return Err(GatewayError::config(
                "upstream.base_url",
                "must not be empty",
            ));
        }
        if self.backend.base_url.is_empty() {
            return Err(GatewayError::config(
                "backend.base_url",
                "must not be empty",
            ));
        }
        if self.retry.multiplier < 1.0 {
            return Err(GatewayError::config(
                "retry.multiplier",
                "must be at least 1.0",
            ));
        }
        if self.retry.request_timeout_secs == 0 {
            return Err(GatewayError::config(
                "retry.request_timeout_secs",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ReelConfig::default();
        assert_eq!(config.upstream.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.upstream.language, "en-US");
        assert!(config.upstream.api_key.is_empty());
        assert_eq!(config.cache.trending, 60);
        assert_eq!(config.cache.details, 86_400);
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.backend.probe_path, "/api/favorites/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = ReelConfig::from_toml(
            r#"
            [upstream]
            api_key = "secret"
            language = "fr-FR"

            [cache]
            trending = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.api_key, "secret");
        assert_eq!(config.upstream.language, "fr-FR");
        assert_eq!(config.cache.trending, 30);
        // Unspecified sections keep their defaults
        assert_eq!(config.cache.details, 86_400);
        assert_eq!(config.retry.multiplier, 2.0);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = ReelConfig::from_toml("[upstream\napi_key = ");
        assert!(matches!(result, Err(GatewayError::Config { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut env = HashMap::new();
        env.insert(ENV_API_KEY.to_string(), "from-env".to_string());
        env.insert(ENV_CACHE_SECONDS.to_string(), "120".to_string());
        env.insert(ENV_BACKEND_USERNAME.to_string(), "king".to_string());

        let mut config = ReelConfig::default();
        config.apply_env_from(|name| env.get(name).cloned());

        assert_eq!(config.upstream.api_key, "from-env");
        assert_eq!(config.cache.trending, 120);
        assert_eq!(config.cache.search, 120);
        // Details TTL is not governed by the list-operation override
        assert_eq!(config.cache.details, 86_400);
        assert_eq!(config.backend.username, "king");
    }

    #[test]
    fn test_unparsable_cache_seconds_ignored() {
        let mut config = ReelConfig::default();
        config.apply_env_from(|name| {
            (name == ENV_CACHE_SECONDS).then(|| "not-a-number".to_string())
        });
        assert_eq!(config.cache.trending, 60);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[upstream]\napi_key = \"file-key\"").unwrap();

        let config = ReelConfig::from_file(file.path()).unwrap();
        assert_eq!(config.upstream.api_key, "file-key");
    }

    #[test]
    fn test_validation_rejects_bad_multiplier() {
        let mut config = ReelConfig::default();
        config.retry.multiplier = 0.5;
        assert!(matches!(
            config.validate(),
            Err(GatewayError::Config { .. })
        ));
    }
}
