//! Error handling for DesignKit
//!
//! Provides the error types for every layer of the editor core:
//! - Surface errors (drawing handle, object lookup, snapshot restore)
//! - Import errors (SVG markup and raster decoding)
//! - Export errors (document and vector serialization)
//! - Style errors (colour and gradient validation)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Guard-condition skips (styling with an empty selection, text-only edits on
//! shapes) are not errors and never surface here.

use thiserror::Error;

/// Surface error type
///
/// Represents errors raised by the scene surface itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The drawing handle could not be used to build a surface
    #[error("Invalid drawing handle: {reason}")]
    InvalidHandle {
        /// Why the handle was rejected.
        reason: String,
    },

    /// The surface has already been disposed
    #[error("Surface has been disposed")]
    Disposed,

    /// No object with the given id lives on the surface
    #[error("Object {id} not found on surface")]
    ObjectNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A history snapshot could not be taken or restored
    #[error("Snapshot failed: {reason}")]
    Snapshot {
        /// The underlying serde failure.
        reason: String,
    },
}

/// Import error type
///
/// Raised when external assets (SVG markup, raster images, documents) cannot
/// be turned into scene objects. These are user-actionable and must be shown.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// The source decoded successfully but contained nothing drawable
    #[error("No valid SVG elements found")]
    NoDrawableElements,

    /// The markup is not an SVG document
    #[error("Invalid SVG: {reason}")]
    InvalidSvg {
        /// What was wrong with the markup.
        reason: String,
    },

    /// Raster image bytes could not be decoded
    #[error("Failed to decode image: {reason}")]
    ImageDecode {
        /// The decoder message.
        reason: String,
    },

    /// A previously exported document could not be parsed
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// The parser message.
        reason: String,
    },
}

/// Export error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The workspace object is missing from the surface
    #[error("Workspace not found")]
    WorkspaceNotFound,

    /// Serialization of the surface failed
    #[error("Failed to serialize canvas: {reason}")]
    Serialization {
        /// The serializer message.
        reason: String,
    },

    /// Writing the exported file failed
    #[error("Failed to download export: {reason}")]
    Download {
        /// The I/O message.
        reason: String,
    },
}

/// Style error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// A colour string could not be parsed
    #[error("Invalid color '{value}'")]
    InvalidColor {
        /// The rejected colour string.
        value: String,
    },

    /// A gradient definition is unusable
    #[error("Invalid gradient: {reason}")]
    InvalidGradient {
        /// What was wrong with the stops or coordinates.
        reason: String,
    },
}

/// Main error type for DesignKit
///
/// A unified error type that can represent any error from the editor core.
#[derive(Error, Debug)]
pub enum Error {
    /// Surface error
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Style error
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error was caused by bad user input (file or colour)
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            Error::Import(_) | Error::Style(_) | Error::Export(ExportError::WorkspaceNotFound)
        )
    }

    /// Check if this is an import error
    pub fn is_import_error(&self) -> bool {
        matches!(self, Error::Import(_))
    }

    /// Check if this is an export error
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
