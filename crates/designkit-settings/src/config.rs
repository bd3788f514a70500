//! Configuration for DesignKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the format is chosen by extension.
//!
//! Configuration is organized into sections:
//! - Editor settings (workspace size, fit ratio, resize debounce, import
//!   limit, history limit)
//! - Remote services (API base URL, font catalog URL and key, timeout)
//! - Export defaults (file name prefix, output directory)

use std::path::{Path, PathBuf};
use std::time::Duration;

use designkit_core::constants::{
    DEFAULT_WORKSPACE_HEIGHT, DEFAULT_WORKSPACE_WIDTH, FIT_RATIO, IMPORT_MAX_DIMENSION,
    RESIZE_DEBOUNCE_MS,
};
use designkit_editor::export::DEFAULT_EXPORT_PREFIX;
use designkit_editor::{EditorConfig, SurfaceSettings};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Environment variable that overrides `remote.fonts_api_key`.
pub const FONTS_API_KEY_ENV: &str = "DESIGNKIT_FONTS_API_KEY";

/// Editor session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Workspace width in pixels
    pub workspace_width: f64,
    /// Workspace height in pixels
    pub workspace_height: f64,
    /// Share of the container the workspace fills after a fit
    pub fit_ratio: f64,
    /// Quiet period before a container resize is applied
    pub resize_debounce_ms: u64,
    /// Longest side of imported SVGs and widest raster import
    pub import_max_dimension: f64,
    /// Maximum snapshots kept; unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            workspace_width: DEFAULT_WORKSPACE_WIDTH,
            workspace_height: DEFAULT_WORKSPACE_HEIGHT,
            fit_ratio: FIT_RATIO,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            import_max_dimension: IMPORT_MAX_DIMENSION,
            history_limit: None,
        }
    }
}

/// Remote service endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Base URL of the asset API (background removal, image catalog)
    pub api_base_url: String,
    /// Font catalog endpoint
    pub fonts_url: String,
    /// Font catalog key; the fallback font list is used without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts_api_key: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            fonts_url: "https://www.googleapis.com/webfonts/v1/webfonts".to_string(),
            fonts_api_key: None,
            timeout_ms: 30_000,
        }
    }
}

impl RemoteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Prefix of generated file names
    pub file_prefix: String,
    /// Directory downloads are written to
    pub output_directory: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            output_directory: dirs::download_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub remote: RemoteSettings,
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML) and apply environment overrides
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content =
            std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.apply_env();
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Take the font API key from the environment when it is set
    pub fn apply_env(&mut self) {
        self.apply_fonts_api_key(std::env::var(FONTS_API_KEY_ENV).ok());
    }

    fn apply_fonts_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.remote.fonts_api_key = Some(key);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let editor = &self.editor;
        positive("editor.workspace_width", editor.workspace_width)?;
        positive("editor.workspace_height", editor.workspace_height)?;
        positive("editor.import_max_dimension", editor.import_max_dimension)?;

        if !(editor.fit_ratio > 0.0 && editor.fit_ratio <= 1.0) {
            return Err(out_of_range("editor.fit_ratio", editor.fit_ratio));
        }
        if editor.history_limit == Some(0) {
            return Err(out_of_range("editor.history_limit", 0));
        }

        http_url("remote.api_base_url", &self.remote.api_base_url)?;
        http_url("remote.fonts_url", &self.remote.fonts_url)?;
        if self.remote.timeout_ms == 0 {
            return Err(out_of_range("remote.timeout_ms", 0));
        }

        if self.export.file_prefix.trim().is_empty() {
            return Err(out_of_range("export.file_prefix", "\"\""));
        }

        Ok(())
    }

    /// Session settings for a new editor
    pub fn to_editor_config(&self) -> EditorConfig {
        EditorConfig {
            surface: SurfaceSettings {
                workspace_width: self.editor.workspace_width,
                workspace_height: self.editor.workspace_height,
                fit_ratio: self.editor.fit_ratio,
            },
            resize_debounce: Duration::from_millis(self.editor.resize_debounce_ms),
            history_limit: self.editor.history_limit,
            import_max_dimension: self.editor.import_max_dimension,
        }
    }
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(out_of_range(key, value))
    }
}

fn http_url(key: &str, value: &str) -> ConfigResult<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
