//! Configuration management for zammad-bridge
//!
//! Settings are layered: CLI flag, then environment variable (both handled by
//! clap), then the YAML config file, then built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 8000;

/// Default upstream request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = crate::client::zammad::DEFAULT_TIMEOUT.as_secs();

/// Default allowed CORS origins (local dashboard dev servers)
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Contents of the YAML config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Zammad base URL, e.g. `https://support.example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Zammad API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Allowed origins, either a list or a comma-separated string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_origins: Option<CorsOrigins>,

    /// Upstream request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// CORS origins as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorsOrigins {
    List(Vec<String>),
    Csv(String),
}

impl CorsOrigins {
    fn into_list(self) -> Vec<String> {
        match self {
            CorsOrigins::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            CorsOrigins::Csv(raw) => parse_origins(&raw),
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub cors_origins: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved, validated settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL without trailing slash
    pub api_url: String,
    pub api_token: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub cors_origins: Vec<String>,
    pub timeout: Duration,
    /// Config file the settings were read from, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Get the default config file path (`~/.zammad-bridge/config.yaml`)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".zammad-bridge").join("config.yaml"))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load the explicit config file, or the default one when it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file yields an empty configuration.
    pub fn discover(explicit: Option<&str>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let path = PathBuf::from(path);
            let config = Self::load_from(&path)?;
            return Ok((config, Some(path)));
        }

        match Self::default_path() {
            Ok(path) if path.exists() => {
                let config = Self::load_from(&path)?;
                Ok((config, Some(path)))
            }
            _ => Ok((Self::default(), None)),
        }
    }

    /// Merge with CLI/env overrides and validate.
    pub fn resolve(self, overrides: Overrides, config_path: Option<PathBuf>) -> Result<Settings> {
        let api_url = overrides
            .api_url
            .or(self.api_url)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingApiUrl)?;
        let api_url = normalize_api_url(&api_url)?;

        let api_token = overrides
            .api_token
            .or(self.api_token)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingApiToken)?;

        let host = overrides
            .host
            .or(self.host)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        if host.is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()).into());
        }

        let cors_origins = match overrides.cors_origins {
            Some(raw) => parse_origins(&raw),
            None => self
                .cors_origins
                .map(CorsOrigins::into_list)
                .unwrap_or_else(|| parse_origins(DEFAULT_CORS_ORIGINS)),
        };

        let timeout_secs = overrides
            .timeout_secs
            .or(self.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(
                ConfigError::Invalid("timeout must be a positive number of seconds".to_string())
                    .into(),
            );
        }

        Ok(Settings {
            api_url,
            api_token,
            host,
            port: overrides.port.or(self.port).unwrap_or(DEFAULT_PORT),
            debug: overrides.debug || self.debug.unwrap_or(false),
            cors_origins,
            timeout: Duration::from_secs(timeout_secs),
            config_path,
        })
    }
}

impl Settings {
    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Token with all but the first four characters hidden.
    pub fn masked_token(&self) -> String {
        mask_token(&self.api_token)
    }
}

/// Require an http(s) scheme and strip trailing slashes.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "API URL must start with http:// or https://, got '{}'",
            raw
        ))
        .into());
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Hide a secret for display.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    format!("{}****", prefix)
}
