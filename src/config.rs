use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Remote chat completion endpoint settings.
///
/// The bearer token is never compiled in; it comes from `config.toml` or the
/// `ENGLAB_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.opentyphoon.ai/v1/chat/completions".into(),
            api_key: String::new(),
            model: "typhoon-v1.5x-70b-instruct".into(),
        }
    }
}

/// User-adjustable GUI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Prepend the LaTeX-formatting instruction to chat messages.
    pub latex_hint: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { latex_hint: true }
    }
}

/// Application configuration persisted to config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

/// Errors while loading or saving the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// File I/O error
    Io(std::io::Error),
    /// TOML deserialization error
    Parse(toml::de::Error),
    /// TOML serialization error
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config file I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parse(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// Loads config.toml, creating it with defaults when missing, then applies
/// environment overrides (`ENGLAB_API_KEY`, `ENGLAB_API_ENDPOINT`,
/// `ENGLAB_API_MODEL`).
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        cfg
    };
    if let Ok(key) = env::var("ENGLAB_API_KEY") {
        if !key.is_empty() {
            cfg.api.api_key = key;
        }
    }
    if let Ok(endpoint) = env::var("ENGLAB_API_ENDPOINT") {
        if !endpoint.is_empty() {
            cfg.api.endpoint = endpoint;
        }
    }
    if let Ok(model) = env::var("ENGLAB_API_MODEL") {
        if !model.is_empty() {
            cfg.api.model = model;
        }
    }
    Ok(cfg)
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// Writes the configuration back to config.toml.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }
}
