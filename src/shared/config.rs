use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::infra::api::RefreshTrigger;
use crate::shared::dirs;
use crate::shared::env_var::EnvVars;

/// Top-level configuration for nh.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Diagnostic logging.
    #[serde(default)]
    pub log: LogConfig,

    /// Comment thread rendering.
    #[serde(default)]
    pub comments: CommentsConfig,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Backend origin, e.g. "https://api.example.com" (default: "http://localhost:8080").
    #[serde(default = "default_base_url")]
    #[schemars(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    #[schemars(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Which statuses cause a token refresh (default: "unauthorized", 401 only).
    #[serde(default)]
    pub refresh_trigger: RefreshTrigger,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            refresh_trigger: RefreshTrigger::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directive such as "info" or "novelhub=debug" (default: "warn").
    /// NOVELHUB_LOG takes precedence.
    #[serde(default = "default_log_level")]
    #[schemars(default = "default_log_level")]
    pub level: String,

    /// Line format on stderr (default: "text").
    #[serde(default)]
    pub format: LogFormat,

    /// Also append logs to novelhub.log in the cache directory (default: false).
    #[serde(default)]
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommentsConfig {
    /// Spaces per reply level (default: 2).
    #[serde(default = "default_indent")]
    #[schemars(default = "default_indent")]
    pub indent: usize,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_indent() -> usize {
    2
}

impl Config {
    /// Apply NOVELHUB_* overrides on top of the file values.
    pub fn with_env(mut self, env: &EnvVars) -> Self {
        if let Some(url) = &env.api_url {
            self.api.base_url = url.clone();
        }
        if let Some(filter) = &env.log {
            self.log.level = filter.clone();
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a valid novelhub config: {message}")]
    ParseError { path: PathBuf, message: String },
}

const CONFIG_FILES: [&str; 2] = ["config.yaml", "config.yml"];

/// Directory holding config.ya?ml, i.e. ~/.config/novelhub.
pub fn config_home() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("novelhub"))
}

/// Load configuration from ~/.config/novelhub/config.ya?ml.
/// Returns Config::default() if no config file exists.
pub fn load_config() -> anyhow::Result<Config> {
    let Some(dir) = config_home() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir)
}

/// `config.yaml` wins over `config.yml` when both exist.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for path in CONFIG_FILES.iter().map(|name| dir.join(name)) {
        match std::fs::read_to_string(&path) {
            Ok(raw) => return Ok(parse_config(&raw, &path)?),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(ConfigError::ReadError { path, source }.into()),
        }
    }
    Ok(Config::default())
}

fn parse_config(raw: &str, path: &Path) -> Result<Config, ConfigError> {
    serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// JSON Schema for editor completion of config.yaml.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
