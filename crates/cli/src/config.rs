//! Runtime configuration.
//!
//! Loaded in priority order (highest first):
//! 1. Environment variables (`TRELLO_API_KEY`, `PORT`, ...)
//! 2. `trello-callback.toml` in the working directory, if present
//! 3. Built-in defaults
//!
//! Credentials are optional at load time. A receiver without them still
//! starts and answers webhook deliveries with `500`.

use std::{net::SocketAddr, time::Duration};

use board::ConfigurationError;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use trello::{ClientConfig, Credentials, DEFAULT_BASE_URL};

const CONFIG_FILE: &str = "trello-callback.toml";

const ENV_KEYS: &[&str] = &[
    "trello_api_key",
    "trello_api_token",
    "trello_api_base_url",
    "trello_request_timeout_secs",
    "host",
    "port",
    "log_format",
    "otel_exporter_otlp_endpoint",
];

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Complete service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Environment variable: `TRELLO_API_KEY`
    #[serde(default)]
    pub trello_api_key: Option<String>,
    /// Environment variable: `TRELLO_API_TOKEN`
    #[serde(default)]
    pub trello_api_token: Option<String>,
    /// Environment variable: `TRELLO_API_BASE_URL`
    #[serde(default = "default_base_url")]
    pub trello_api_base_url: String,
    /// Outbound request timeout. Unset means no timeout.
    ///
    /// Environment variable: `TRELLO_REQUEST_TIMEOUT_SECS`
    #[serde(default)]
    pub trello_request_timeout_secs: Option<u64>,
    /// Environment variable: `HOST`
    #[serde(default = "default_host")]
    pub host: String,
    /// Environment variable: `PORT`
    #[serde(default = "default_port")]
    pub port: u16,
    /// Environment variable: `LOG_FORMAT`
    #[serde(default)]
    pub log_format: LogFormat,
    /// OTLP collector endpoint; span export is off when unset.
    ///
    /// Environment variable: `OTEL_EXPORTER_OTLP_ENDPOINT`
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads and validates configuration from all sources.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Invalid`] if a value cannot be parsed or fails
    /// validation.
    pub fn load() -> Result<Self, ConfigurationError> {
        let config: Self = Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(ENV_KEYS))
            .extract()
            .map_err(|e| ConfigurationError::Invalid { message: e.to_string() })?;

        config.validate()?;
        Ok(config)
    }

    /// The Trello credential pair.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingCredential`] naming the first absent or
    /// empty value.
    pub fn credentials(&self) -> Result<Credentials, ConfigurationError> {
        let key = non_empty(&self.trello_api_key)
            .ok_or(ConfigurationError::MissingCredential { name: "TRELLO_API_KEY" })?;
        let token = non_empty(&self.trello_api_token)
            .ok_or(ConfigurationError::MissingCredential { name: "TRELLO_API_TOKEN" })?;

        // Both values are non-empty here.
        Credentials::new(key, token)
            .ok_or(ConfigurationError::MissingCredential { name: "TRELLO_API_KEY" })
    }

    /// Transport settings for the Trello client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.trello_api_base_url.clone(),
            timeout: self.trello_request_timeout_secs.map(Duration::from_secs),
            ..ClientConfig::default()
        }
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Invalid`] if `host:port` is not a socket address.
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigurationError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            ConfigurationError::Invalid { message: format!("invalid server address: {e}") }
        })
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = |message: &str| ConfigurationError::Invalid { message: message.to_string() };

        if self.port == 0 {
            return Err(invalid("port must be greater than 0"));
        }
        if self.trello_api_base_url.trim().is_empty() {
            return Err(invalid("trello_api_base_url must not be empty"));
        }
        if self.trello_request_timeout_secs == Some(0) {
            return Err(invalid("trello_request_timeout_secs must be greater than 0"));
        }
        self.server_addr()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trello_api_key: None,
            trello_api_token: None,
            trello_api_base_url: default_base_url(),
            trello_request_timeout_secs: None,
            host: default_host(),
            port: default_port(),
            log_format: LogFormat::default(),
            otel_exporter_otlp_endpoint: None,
        }
    }
}

// Credentials are redacted; everything else is printed.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("Config")
            .field("trello_api_key", &redact(&self.trello_api_key))
            .field("trello_api_token", &redact(&self.trello_api_token))
            .field("trello_api_base_url", &self.trello_api_base_url)
            .field("trello_request_timeout_secs", &self.trello_request_timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_format", &self.log_format)
            .field("otel_exporter_otlp_endpoint", &self.otel_exporter_otlp_endpoint)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
