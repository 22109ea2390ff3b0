//! Client Configuration
//!
//! Resolves which provider and model the client should request. Values are
//! layered, highest priority first:
//!
//! 1. Environment variables (`CELL_PROVIDER`, `CELL_MODEL`)
//! 2. Optional TOML file at `~/.cell/config.toml`
//! 3. Built-in defaults
//!
//! A missing or malformed config file is never fatal; it is logged and
//! treated as absent. Whether the resolved pair actually exists is the
//! selection validator's job, not this module's.

use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable naming the requested provider.
pub const PROVIDER_ENV: &str = "CELL_PROVIDER";
/// Environment variable naming the requested model.
pub const MODEL_ENV: &str = "CELL_MODEL";

/// Provider requested when nothing else is configured.
pub const DEFAULT_PROVIDER: &str = "openrouter";
/// Model requested when nothing else is configured.
pub const DEFAULT_MODEL: &str = "openrouter/auto";

/// On-disk shape of `~/.cell/config.toml`. All keys optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Provider identifier override
    pub provider: Option<String>,
    /// Model identifier override
    pub model: Option<String>,
}

/// The resolved client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellConfig {
    /// Requested provider identifier
    pub provider: String,
    /// Requested model identifier
    pub model: String,
}

impl CellConfig {
    /// Resolve configuration from the process environment and the optional
    /// config file.
    pub fn load() -> Self {
        Self::resolve(
            std::env::var(PROVIDER_ENV).ok(),
            std::env::var(MODEL_ENV).ok(),
            load_config_file(),
        )
    }

    /// Layer the three sources. Empty env values count as unset so that
    /// `CELL_PROVIDER= cell` behaves like not exporting the variable at all.
    fn resolve(env_provider: Option<String>, env_model: Option<String>, file: ConfigFile) -> Self {
        let provider = env_provider
            .filter(|value| !value.is_empty())
            .or(file.provider)
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let model = env_model
            .filter(|value| !value.is_empty())
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self { provider, model }
    }
}

/// The per-user configuration directory, `~/.cell`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cell"))
}

fn load_config_file() -> ConfigFile {
    let Some(path) = config_dir().map(|dir| dir.join("config.toml")) else {
        return ConfigFile::default();
    };
    let Ok(contents) = std::fs::read_to_string(&path) else {
        tracing::debug!(path = %path.display(), "no config file");
        return ConfigFile::default();
    };
    match toml::from_str(&contents) {
        Ok(file) => file,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "ignoring malformed config file");
            ConfigFile::default()
        }
    }
}
