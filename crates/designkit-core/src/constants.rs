//! Editor-wide constants.
//!
//! Defaults for the workspace, the shape presets and the style context.
//! Values that a user may reasonably change live in the settings crate and
//! fall back to these.

/// Name carried by the workspace rectangle.
pub const WORKSPACE_NAME: &str = "clip";

/// Default workspace width in pixels.
pub const DEFAULT_WORKSPACE_WIDTH: f64 = 900.0;

/// Default workspace height in pixels.
pub const DEFAULT_WORKSPACE_HEIGHT: f64 = 1200.0;

/// Workspace fill.
pub const WORKSPACE_FILL: &str = "white";

/// Workspace drop shadow colour.
pub const WORKSPACE_SHADOW_COLOR: &str = "rgba(0,0,0,0.8)";

/// Workspace drop shadow blur radius.
pub const WORKSPACE_SHADOW_BLUR: f64 = 5.0;

/// Fraction of the container the workspace occupies after a fit.
pub const FIT_RATIO: f64 = 0.85;

/// Quiet period before a burst of container resizes is applied.
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Longest side of an imported SVG after scaling.
pub const IMPORT_MAX_DIMENSION: f64 = 500.0;

/// Default fill colour for new objects.
pub const DEFAULT_FILL_COLOR: &str = "rgba(0, 0, 0, 1)";

/// Default stroke colour for new objects.
pub const DEFAULT_STROKE_COLOR: &str = "rgba(0, 0, 0, 1)";

/// Default stroke width for new shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Default font family.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Default font size.
pub const DEFAULT_FONT_SIZE: f64 = 32.0;

/// Regular font weight.
pub const FONT_WEIGHT_NORMAL: u16 = 400;

/// Bold font weight.
pub const FONT_WEIGHT_BOLD: u16 = 700;

/// Circle preset radius.
pub const CIRCLE_RADIUS: f64 = 150.0;

/// Rectangle preset side.
pub const RECTANGLE_SIZE: f64 = 400.0;

/// Corner radius of the soft rectangle preset.
pub const SOFT_RECTANGLE_RADIUS: f64 = 50.0;

/// Triangle preset side.
pub const TRIANGLE_SIZE: f64 = 400.0;

/// Diamond preset side.
pub const DIAMOND_SIZE: f64 = 600.0;

/// Zoom bounds for manual zooming.
pub const MIN_ZOOM: f64 = 0.01;
/// Upper zoom bound for manual zooming.
pub const MAX_ZOOM: f64 = 20.0;

/// Version stamped into exported documents.
pub const DOCUMENT_VERSION: &str = "5.3.0";
