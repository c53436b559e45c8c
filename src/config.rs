//! Optional `config.toml` with the user's preferred defaults.
//!
//! Looked up at an explicit `--config` path, else at
//! `<config dir>/cflash/config.toml`. Every key is optional; command-line
//! flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cflash_palette::Scheme;
use serde::{Deserialize, Serialize};

/// Seconds between palettes when showing more than one round.
pub const DEFAULT_REFRESH_SECS: u64 = 5;

/// User defaults for the flash cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Cards per palette.
    pub count: usize,
    /// Harmony scheme name.
    pub scheme: Scheme,
    /// Gamut mask index (wraps modulo the catalog).
    pub mask: i64,
    /// Seconds between palettes when showing more than one round.
    pub refresh: u64,
    /// Print bare hex codes instead of colored cards.
    pub plain: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            count: 3,
            scheme: Scheme::Complementary,
            mask: 0,
            refresh: DEFAULT_REFRESH_SECS,
            plain: false,
        }
    }
}

impl AppConfig {
    /// Returns the config directory path (`<config dir>/cflash`).
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cflash"))
    }

    /// Returns the path to the default config file.
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and silently skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}
