//! DesignKit Settings Crate
//!
//! Handles editor configuration: the on-disk config file, its validation and
//! the conversion into the session settings the editor consumes.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{Config, EditorSettings, ExportSettings, RemoteSettings, FONTS_API_KEY_ENV};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use manager::SettingsManager;
