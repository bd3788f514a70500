//! # DesignKit Editor
//!
//! The state and command core of the canvas editor: the scene surface,
//! selection, object factory, style engine, snapshot history and export.
//!
//! ## Core Components
//!
//! - **Surface**: ordered objects, the workspace rectangle, the viewport and
//!   the clip region, driven through a [`DrawingHandle`]
//! - **Selection**: mirrors the surface's active objects and publishes
//!   selection events
//! - **Factory**: shape and text presets merged with overrides, SVG and
//!   raster import
//! - **Styles**: paint, typography and gradient edits routed per object kind
//! - **History**: linear snapshots with undo/redo
//! - **Export**: JSON documents, workspace-scoped SVG and file download
//!
//! ## Architecture
//!
//! ```text
//! Editor (session)
//!   ├── Surface ── DrawingHandle (host canvas)
//!   │     └── Viewport
//!   ├── SelectionTracker ── EventBus
//!   ├── History
//!   ├── StyleDefaults
//!   └── ResizeScheduler
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use designkit_editor::{Editor, EditorConfig, HeadlessCanvas, ShapeOverrides, Size};
//! use designkit_core::EventBus;
//!
//! let mut editor = Editor::new(
//!     Box::new(HeadlessCanvas::new()),
//!     Size::new(1280.0, 800.0),
//!     EditorConfig::default(),
//!     EventBus::new(),
//! )?;
//! editor.add_rectangle(&ShapeOverrides::default());
//! editor.set_fill_color("#ff0000")?;
//! let svg = editor.export_vector()?;
//! ```

pub mod color;
pub mod editor;
pub mod export;
pub mod factory;
pub mod gradient;
pub mod handle;
pub mod history;
pub mod import;
pub mod model;
pub mod scheduler;
pub mod selection;
pub mod style;
pub mod surface;
pub mod svg_export;
pub mod viewport;

pub use color::{is_valid_color, Color};
pub use editor::{Editor, EditorConfig, EditorMount};
pub use export::{download, DesignDocument, DocumentMetadata, ExportFormat};
pub use factory::{ShapeOverrides, ShapePreset, TextOverrides, TextPreset};
pub use gradient::{ColorStop, Gradient, GradientDirection, GradientKind, GradientPositions};
pub use handle::{DrawingHandle, HeadlessCanvas, HeadlessState};
pub use history::History;
pub use import::{import_raster, SvgImporter};
pub use model::{
    Bounds, FontStyle, LineCap, LineJoin, ObjectFlags, ObjectKind, Paint, Point, SceneObject,
    Size, Stroke, TextAlign, TextBox, TextFlavour, Transform,
};
pub use scheduler::{ResizeScheduler, ResizeState};
pub use selection::SelectionTracker;
pub use style::{GradientGeometry, GradientRequest, StyleDefaults, TextStyle};
pub use surface::{Alignment, ReorderDirection, SelectionSignal, Surface, SurfaceSettings};
pub use svg_export::export_svg;
pub use viewport::Viewport;
