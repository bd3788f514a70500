//! Style mutation helpers.
//!
//! Per-object edits with per-kind routing. The editor session applies these
//! to every selected object and owns the [`StyleDefaults`] that getters fall
//! back on when nothing is selected.

use designkit_core::constants::{
    DEFAULT_FILL_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_STROKE_COLOR,
    DEFAULT_STROKE_WIDTH, FONT_WEIGHT_BOLD, FONT_WEIGHT_NORMAL,
};
use designkit_core::StyleError;

use crate::color::Color;
use crate::gradient::{ColorStop, Gradient, GradientDirection, GradientPositions};
use crate::model::{FontStyle, LineCap, LineJoin, ObjectKind, Paint, SceneObject, TextAlign};

/// Values the session uses for new edits and for getters when the selection
/// is empty. Setters update the matching default as well.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_dash_array: Vec<f64>,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub opacity: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_dash_array: Vec::new(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FONT_WEIGHT_NORMAL,
            opacity: 1.0,
        }
    }
}

/// Typography edits. Applying one to a non-text object does nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum TextStyle {
    FontFamily(String),
    FontSize(f64),
    FontWeight(u16),
    FontStyle(FontStyle),
    Underline(bool),
    Linethrough(bool),
    Align(TextAlign),
}

/// How a gradient's geometry is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
    Direction(GradientDirection),
    Positions(GradientPositions),
    Angle(f64),
    /// Centre in percent of the box, radius as a fraction of its longest side.
    Radial {
        center_x: f64,
        center_y: f64,
        radius: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientRequest {
    pub geometry: GradientGeometry,
    pub stops: Vec<ColorStop>,
}

impl GradientRequest {
    pub fn new(geometry: GradientGeometry, stops: Vec<ColorStop>) -> Self {
        Self { geometry, stops }
    }

    /// Start/mid/end stops interpolated from two colours.
    pub fn two_color(
        geometry: GradientGeometry,
        start: &str,
        end: &str,
    ) -> Result<Self, StyleError> {
        Ok(Self::new(geometry, Gradient::two_color_stops(start, end)?))
    }

    /// Builds the gradient in `object`'s local pixels, using its scaled size.
    pub fn build_for(&self, object: &SceneObject) -> Result<Gradient, StyleError> {
        let size = object.scaled_size();
        let stops = self.stops.clone();
        match self.geometry {
            GradientGeometry::Direction(direction) => {
                Gradient::linear_preset(direction, size, stops)
            }
            GradientGeometry::Positions(positions) => Gradient::linear(positions, size, stops),
            GradientGeometry::Angle(degrees) => Gradient::linear_angle(degrees, size, stops),
            GradientGeometry::Radial {
                center_x,
                center_y,
                radius,
            } => Gradient::radial(center_x, center_y, radius, size, stops),
        }
    }

    fn angle(&self) -> Option<f64> {
        match self.geometry {
            GradientGeometry::Direction(direction) => Some(direction.positions().angle()),
            GradientGeometry::Positions(positions) => Some(positions.angle()),
            GradientGeometry::Angle(degrees) => Some(degrees),
            GradientGeometry::Radial { .. } => None,
        }
    }
}

pub fn validate_color(value: &str) -> Result<(), StyleError> {
    Color::parse(value).map(|_| ())
}

pub fn apply_fill(object: &mut SceneObject, paint: &Paint) {
    object.fill = Some(paint.clone());
    if paint.as_solid().is_some() {
        object.gradient_angle = None;
    }
}

/// Stroke colour; on text it recolours the glyphs instead.
pub fn apply_stroke_color(object: &mut SceneObject, color: &str) {
    if object.is_text() {
        object.fill = Some(Paint::solid(color));
        object.gradient_angle = None;
    } else {
        object.stroke.color = Some(color.to_string());
    }
}

pub fn apply_stroke_width(object: &mut SceneObject, width: f64) {
    object.stroke.width = width.max(0.0);
}

/// An empty pattern means a solid line.
pub fn apply_stroke_dash_array(object: &mut SceneObject, dash: &[f64]) {
    object.stroke.dash_array = if dash.is_empty() {
        None
    } else {
        Some(dash.to_vec())
    };
}

pub fn apply_line_join(object: &mut SceneObject, join: LineJoin) {
    object.stroke.line_join = join;
}

pub fn apply_line_cap(object: &mut SceneObject, cap: LineCap) {
    object.stroke.line_cap = cap;
}

pub fn apply_opacity(object: &mut SceneObject, opacity: f64) {
    object.opacity = if opacity.is_nan() {
        1.0
    } else {
        opacity.clamp(0.0, 1.0)
    };
}

/// Returns whether the object was text and took the edit.
pub fn apply_text_style(object: &mut SceneObject, style: &TextStyle) -> bool {
    let Some(text) = object.text_mut() else {
        return false;
    };
    match style {
        TextStyle::FontFamily(family) => text.font_family = family.clone(),
        TextStyle::FontSize(size) => text.font_size = size.max(1.0),
        TextStyle::FontWeight(weight) => text.font_weight = *weight,
        TextStyle::FontStyle(style) => text.font_style = *style,
        TextStyle::Underline(on) => text.underline = *on,
        TextStyle::Linethrough(on) => text.linethrough = *on,
        TextStyle::Align(align) => text.text_align = *align,
    }
    true
}

/// Bold toggle: anything above normal flips back to normal.
pub fn toggled_weight(current: u16) -> u16 {
    if current > FONT_WEIGHT_NORMAL {
        FONT_WEIGHT_NORMAL
    } else {
        FONT_WEIGHT_BOLD
    }
}

/// Fills `object` with a gradient sized to it and records its angle.
pub fn apply_gradient(object: &mut SceneObject, request: &GradientRequest) -> Result<(), StyleError> {
    let gradient = request.build_for(object)?;
    object.fill = Some(Paint::Gradient(gradient));
    object.gradient_angle = request.angle();
    Ok(())
}

/// Whether the kind has an outline that stroke edits show on.
pub fn has_visible_stroke(object: &SceneObject) -> bool {
    !matches!(
        object.kind,
        ObjectKind::Text(_) | ObjectKind::Image { .. } | ObjectKind::Group { .. }
    )
}
