//! Remote error type.

use designkit_core::ImportError;
use thiserror::Error;

/// Errors produced by the remote clients and the asset bridge.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success HTTP status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The service reported a failure in its response envelope.
    #[error("service error: {0}")]
    Service(String),

    /// A background removal is already running for this editor.
    #[error("an image is already being processed")]
    Busy,

    /// A fetched or loaded asset could not be imported.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RemoteError {
    /// Short message suitable for a dismissible notification.
    pub fn user_message(&self) -> String {
        match self {
            RemoteError::Busy => "Please wait for the current image to finish processing.".to_string(),
            RemoteError::Service(message) => message.clone(),
            RemoteError::Import(e) => e.to_string(),
            RemoteError::Io(_) => "The file could not be read.".to_string(),
            RemoteError::HttpClientBuild(_)
            | RemoteError::Request(_)
            | RemoteError::Status { .. }
            | RemoteError::Parse(_) => {
                "The asset service is unavailable. Please try again.".to_string()
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, RemoteError::Busy)
    }
}
