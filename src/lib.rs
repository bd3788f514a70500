//! # DesignKit
//!
//! State and command core for a canvas-based graphic design editor:
//! - A scene surface with a fixed workspace rectangle, viewport fit and clip
//! - Shape, text and image factories, SVG and raster import
//! - Paint, typography and gradient styling
//! - Snapshot history with undo/redo
//! - JSON and workspace-scoped SVG export
//! - Background removal, stock images and fonts over HTTP
//!
//! ## Architecture
//!
//! DesignKit is organized as a workspace with multiple crates:
//!
//! 1. **designkit-core** - Shared types, errors, constants and the event bus
//! 2. **designkit-editor** - Surface, selection, factory, styles, history, export
//! 3. **designkit-settings** - Configuration files and the settings manager
//! 4. **designkit-remote** - HTTP clients and the remote-asset bridge
//! 5. **designkit** - This crate; wires the others into an [`App`]

mod app;

pub use app::App;

pub use designkit_core::{
    AppEvent, Error, EventBus, EventCategory, EventFilter, ExportError, ImportError,
    NotificationEvent, NotificationLevel, ObjectId, Result, StyleError, SurfaceError,
};

pub use designkit_editor::{
    DesignDocument, DrawingHandle, Editor, EditorConfig, EditorMount, ExportFormat,
    GradientRequest, HeadlessCanvas, ShapeOverrides, ShapePreset, Size, TextOverrides,
    TextPreset,
};

pub use designkit_remote::{AssetBridge, FontService, RemoteError, SearchParams};

pub use designkit_settings::{Config, SettingsError, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output with `RUST_LOG` support; `info` unless overridden.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("DesignKit {} (built {})", VERSION, BUILD_DATE);
    Ok(())
}
