//! Configuration management for the Confluence pages extractor.
//!
//! Parses the `config.json` file written into the data directory by the
//! orchestrating platform. Component settings live under `parameters`:
//!
//! ```json
//! {
//!   "parameters": {
//!     "url": "https://acme.atlassian.net/wiki",
//!     "username": "bot@acme.com",
//!     "#api_token": "...",
//!     "destination_options": { "beautify": true, "incremental": true }
//!   }
//! }
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `url`, `username` and `#api_token` support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename inside the data directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Parameter key of the API token. The `#` prefix marks it as encrypted.
pub const KEY_API_TOKEN: &str = "#api_token";

/// Component configuration as read from `config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Component parameters.
    pub parameters: Parameters,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw component parameters. Required fields are optional here so that all
/// missing ones can be reported together by [`Config::require_confluence`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Confluence base URL.
    pub url: Option<String>,
    /// Atlassian account name (usually an email address).
    pub username: Option<String>,
    /// Atlassian API token.
    #[serde(rename = "#api_token")]
    pub api_token: Option<ApiToken>,
    /// Output options.
    pub destination_options: DestinationOptions,
}

/// Output table options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DestinationOptions {
    /// Convert storage-format markup into plain text.
    pub beautify: bool,
    /// Fetch only pages modified since the last successful run and load the
    /// table incrementally.
    pub incremental: bool,
}

/// API token. Never shown in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value, for building the authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Validated connection settings, the only form the client accepts.
#[derive(Debug, Clone)]
pub struct ConfluenceSettings {
    /// Confluence base URL.
    pub url: String,
    /// Atlassian account name.
    pub username: String,
    /// Atlassian API token.
    pub api_token: ApiToken,
    /// Output options.
    pub destination: DestinationOptions,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Required parameters are missing or empty.
    #[error("Missing required configuration parameters: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Parameter name (e.g., "`#api_token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from `<data_dir>/config.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist, or a
    /// parse/expansion error.
    pub fn load_from_data_dir(data_dir: &Path) -> Result<Self, ConfigError> {
        Self::load(&data_dir.join(CONFIG_FILENAME))
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist, or a
    /// parse/expansion error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from a JSON string and expand environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns a parse or expansion error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.expand_env_vars()?;
        Ok(config)
    }

    /// Get validated Confluence settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFields`] listing every required parameter
    /// that is absent or empty.
    pub fn require_confluence(&self) -> Result<ConfluenceSettings, ConfigError> {
        let params = &self.parameters;
        let mut missing = Vec::new();

        let username = non_empty(params.username.as_deref());
        if username.is_none() {
            missing.push("username");
        }
        let url = non_empty(params.url.as_deref());
        if url.is_none() {
            missing.push("url");
        }
        let api_token = params.api_token.as_ref().filter(|t| !t.0.is_empty());
        if api_token.is_none() {
            missing.push(KEY_API_TOKEN);
        }

        match (url, username, api_token) {
            (Some(url), Some(username), Some(api_token)) => Ok(ConfluenceSettings {
                url: url.to_owned(),
                username: username.to_owned(),
                api_token: api_token.clone(),
                destination: params.destination_options,
            }),
            _ => Err(ConfigError::MissingFields(missing)),
        }
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let params = &mut self.parameters;
        if let Some(url) = &params.url {
            params.url = Some(expand::expand_env(url, "url")?);
        }
        if let Some(username) = &params.username {
            params.username = Some(expand::expand_env(username, "username")?);
        }
        if let Some(token) = &params.api_token {
            params.api_token = Some(ApiToken(expand::expand_env(&token.0, KEY_API_TOKEN)?));
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
