//! Configuration management for suburbweb
//!
//! Configuration is read once at startup from an optional YAML file,
//! then overridden from `SUBURBWEB_*` environment variables, validated,
//! and handed to the server as an immutable value.

pub mod error;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub use error::ConfigError;
use error::ConfigResult;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Upstream data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; the resource segment is appended as `{base_url}/{resource}`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Static bearer token
    #[serde(default = "default_token")]
    pub token: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra form keys mapped to upstream resources, rendered as raw JSON
    #[serde(default)]
    pub raw_endpoints: BTreeMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: default_token(),
            timeout_secs: default_timeout_secs(),
            raw_endpoints: BTreeMap::new(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.microburbs.com.au/report_generator/api/suburb".to_string()
}

fn default_token() -> String {
    "test".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Form defaults used when a request leaves a field out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_suburb")]
    pub suburb: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            suburb: default_suburb(),
            endpoint: default_endpoint(),
        }
    }
}

fn default_suburb() -> String {
    "Belmont North".to_string()
}

fn default_endpoint() -> String {
    "properties".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Form defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

pub const ENV_HOST: &str = "SUBURBWEB_HOST";
pub const ENV_PORT: &str = "SUBURBWEB_PORT";
pub const ENV_API_BASE_URL: &str = "SUBURBWEB_API_BASE_URL";
pub const ENV_API_TOKEN: &str = "SUBURBWEB_API_TOKEN";
pub const ENV_API_TIMEOUT_SECS: &str = "SUBURBWEB_API_TIMEOUT_SECS";

const MAX_TIMEOUT_SECS: u64 = 120;

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError { message: e.to_string() })?;

        Self::from_yaml(&content)
    }

    /// Load from a YAML file if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })
    }

    /// Apply `SUBURBWEB_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_PORT.to_string(),
                reason: format!("'{}' is not a valid port", port),
            })?;
        }
        if let Some(base_url) = lookup(ENV_API_BASE_URL) {
            self.api.base_url = base_url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api.token = token;
        }
        if let Some(timeout) = lookup(ENV_API_TIMEOUT_SECS) {
            self.api.timeout_secs = timeout.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_API_TIMEOUT_SECS.to_string(),
                reason: format!("'{}' is not a whole number of seconds", timeout),
            })?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.api.token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.token".to_string(),
                reason: "Token must not be empty".to_string(),
            });
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: format!("Timeout must be between 1 and {} seconds", MAX_TIMEOUT_SECS),
            });
        }

        for (key, resource) in &self.api.raw_endpoints {
            if key.trim().is_empty() || resource.trim().is_empty() || resource.contains('/') {
                return Err(ConfigError::InvalidValue {
                    field: format!("api.raw_endpoints.{}", key),
                    reason: "Raw endpoints need a non-empty key and a single path segment".to_string(),
                });
            }
        }

        if self.defaults.suburb.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "defaults.suburb".to_string(),
                reason: "Default suburb must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Copy of the configuration that is safe to show to users
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.api.token = "********".to_string();
        config
    }
}
