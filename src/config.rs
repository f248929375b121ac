//! Configuration management for reelscout
//!
//! Handles config file loading/saving, API key lookup and the theme
//! preference. Config is stored at ~/.config/reelscout/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable checked before the config file
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No OMDb API key: set OMDB_API_KEY or add omdb_api_key to {0}")]
    MissingApiKey(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// OMDb API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omdb_api_key: Option<String>,
    /// "light" or "dark"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/reelscout/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reelscout").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from an explicit path; missing or malformed files yield
    /// the default config
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            debug!("No config at {}", path.display());
            return Self::default();
        };

        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// API key with fallback chain:
    /// 1. Environment variable OMDB_API_KEY
    /// 2. Key from the config file
    pub fn api_key(&self) -> Result<String, ConfigError> {
        self.api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Same chain as [`Config::api_key`] with the environment value supplied
    pub fn api_key_with(&self, env_value: Option<String>) -> Result<String, ConfigError> {
        env_value
            .into_iter()
            .chain(self.omdb_api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or_else(|| {
                let location = Self::path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.toml".to_string());
                ConfigError::MissingApiKey(location)
            })
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme
            .as_deref()
            .map(ThemeMode::from_str_loose)
            .unwrap_or_default()
    }
}

// =============================================================================
// Theme preference
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Parse a stored value; anything unrecognized is Light
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light/dark choice, read once at startup and written only on toggle
#[derive(Debug, Clone)]
pub struct ThemePreference {
    path: Option<PathBuf>,
    mode: ThemeMode,
}

impl ThemePreference {
    /// Read the stored mode from `path` (or the default config path)
    pub fn load(path: Option<PathBuf>) -> Self {
        let path = path.or_else(Config::path);
        let mode = path
            .as_deref()
            .map(Config::load_from)
            .unwrap_or_default()
            .theme_mode();
        Self { path, mode }
    }

    /// An unpersisted preference
    pub fn in_memory(mode: ThemeMode) -> Self {
        Self { path: None, mode }
    }

    pub fn current(&self) -> ThemeMode {
        self.mode
    }

    /// Flip the mode and persist it, keeping the rest of the config file.
    /// The mode stays flipped for this session when the write fails.
    pub fn toggle(&mut self) -> Result<ThemeMode> {
        self.mode = self.mode.toggled();

        if let Some(path) = &self.path {
            let mut config = Config::load_from(path);
            config.theme = Some(self.mode.as_str().to_string());
            if let Err(e) = config.save_to(path) {
                warn!("Could not persist theme to {}: {}", path.display(), e);
                return Err(e);
            }
        }
        Ok(self.mode)
    }
}
