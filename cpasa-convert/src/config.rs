//! Translation settings.
//!
//! Settings come from a small TOML file. A copy of the defaults is embedded
//! in the binary (`defaults/translate.toml`); `--config` replaces it with a
//! user file. Missing keys in a user file fall back to the defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Interface names and masks used when emitting ASA statements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AsaSettings {
    pub inside_interface: String,
    pub outside_interface: String,
    pub host_netmask: String,
    pub pool_netmask: String,
}

impl Default for AsaSettings {
    fn default() -> Self {
        Self {
            inside_interface: "inside".to_string(),
            outside_interface: "outside".to_string(),
            host_netmask: "255.255.255.255".to_string(),
            pool_netmask: "255.255.255.0".to_string(),
        }
    }
}

/// Section labelling rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SectionSettings {
    /// Label used for rules whose section is unknown or auto-generated.
    pub default_label: String,
    /// Section names starting with this prefix are left out of the registry.
    pub auto_generated_prefix: String,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            default_label: "Default Section".to_string(),
            auto_generated_prefix: "Automatic Generated rules:".to_string(),
        }
    }
}

/// Complete translation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    pub asa: AsaSettings,
    pub sections: SectionSettings,
}

/// Errors returned when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TranslateConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&raw, path.display().to_string())
}

/// Built-in configuration.
pub fn default_config() -> TranslateConfig {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/defaults/translate.toml"
    ));
    parse_config(embedded, "embedded config".to_string()).unwrap_or_default()
}

fn parse_config(raw: &str, path: String) -> Result<TranslateConfig, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse { path, source })
}
