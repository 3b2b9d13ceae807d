use crate::error::SettingsError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub board: BoardSettings,
    /// Named start sets in coordinate-list form, e.g. `acorn = "[[1,0],[3,1]]"`.
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BoardSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub interval_ms: Option<u64>,
    pub alive_char: Option<char>,
}

impl Settings {
    /// Load from the default location. A missing file yields defaults; a
    /// broken one is reported and ignored.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "ignoring settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| SettingsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termlife")
            .join("config.toml")
    }

    pub fn log_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termlife")
            .join("termlife.log")
    }
}
