//! Settings Manager
//!
//! Resolves the platform config directory and loads or saves the config
//! file kept there.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ConfigError, SettingsError, SettingsResult};

const APP_DIR: &str = "designkit";
const CONFIG_FILE: &str = "config.toml";

/// Owns the current [`Config`] and the file it came from.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: Config,
    path: PathBuf,
}

impl SettingsManager {
    /// Platform config directory, e.g. `~/.config/designkit` on Linux.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Creates the config directory if needed and returns it.
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir).map_err(|source| SettingsError::ConfigDirectory {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Loads the config in the platform directory, or defaults when there
    /// is no file yet.
    pub fn load_default() -> SettingsResult<Self> {
        Self::load_or_default(&Self::default_path()?)
    }

    /// Loads `path`, falling back to defaults when it does not exist. A file
    /// that exists but fails to parse or validate is an error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        let config = if path.exists() {
            Config::load_from_file(path)?
        } else {
            tracing::warn!("No config at {}, using defaults", path.display());
            let mut config = Config::default();
            config.apply_env();
            config
        };
        Ok(Self {
            config,
            path: path.to_path_buf(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the config back to the file it was loaded from.
    pub fn save(&self) -> SettingsResult<()> {
        self.config.save_to_file(&self.path)?;
        tracing::info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}
