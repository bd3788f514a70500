//! Error types for the settings crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while locating, reading or writing a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write settings to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The per-user config directory could not be created.
    #[error("cannot create config directory {}: {source}", path.display())]
    ConfigDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("cannot encode settings as TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A settings value that parsed but cannot be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Only `.json` and `.toml` files are understood.
    #[error("unsupported settings format '{0}'")]
    UnsupportedFormat(String),

    #[error("{key} is out of range: {value}")]
    ValueOutOfRange { key: String, value: String },

    /// Empty, or not an `http(s)` URL.
    #[error("{key} is not an http(s) URL: '{value}'")]
    InvalidUrl { key: String, value: String },

    /// No per-user config directory on this platform.
    #[error("no config directory on {0}")]
    UnsupportedPlatform(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
