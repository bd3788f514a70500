//! Gradient fills.
//!
//! Coordinates are in object-local pixels measured from the object's centre,
//! derived from its scaled width and height when the gradient is built.
//! Position inputs are percentages of the box (0 = left/top, 100 = right/bottom).

use serde::{Deserialize, Serialize};

use designkit_core::StyleError;

use crate::color::Color;
use crate::model::Size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: String,
}

impl ColorStop {
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GradientKind {
    Linear {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Radial {
        x1: f64,
        y1: f64,
        r1: f64,
        x2: f64,
        y2: f64,
        r2: f64,
    },
}

/// Preset directions offered by the gradient picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    Horizontal,
    Vertical,
    Diagonal,
}

impl GradientDirection {
    pub fn positions(&self) -> GradientPositions {
        match self {
            GradientDirection::Horizontal => GradientPositions::new(0.0, 50.0, 100.0, 50.0),
            GradientDirection::Vertical => GradientPositions::new(50.0, 0.0, 50.0, 100.0),
            GradientDirection::Diagonal => GradientPositions::new(0.0, 0.0, 100.0, 100.0),
        }
    }
}

/// Start and end of a linear gradient as percentages of the object box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientPositions {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl GradientPositions {
    pub fn new(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Positions for a line through the box centre at `degrees` (0 = left to right).
    pub fn from_angle(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(
            50.0 - cos * 50.0,
            50.0 - sin * 50.0,
            50.0 + cos * 50.0,
            50.0 + sin * 50.0,
        )
    }

    pub fn angle(&self) -> f64 {
        (self.end_y - self.start_y)
            .atan2(self.end_x - self.start_x)
            .to_degrees()
    }
}

impl Default for GradientPositions {
    fn default() -> Self {
        GradientDirection::Horizontal.positions()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    #[serde(flatten)]
    pub kind: GradientKind,
    pub color_stops: Vec<ColorStop>,
}

fn percent_to_local(percent: f64, extent: f64) -> f64 {
    (percent / 100.0 - 0.5) * extent
}

impl Gradient {
    /// Linear gradient between two percentage positions on a box of `size`.
    pub fn linear(
        positions: GradientPositions,
        size: Size,
        stops: Vec<ColorStop>,
    ) -> Result<Self, StyleError> {
        let color_stops = normalize_stops(stops)?;
        Ok(Self {
            kind: GradientKind::Linear {
                x1: percent_to_local(positions.start_x, size.width),
                y1: percent_to_local(positions.start_y, size.height),
                x2: percent_to_local(positions.end_x, size.width),
                y2: percent_to_local(positions.end_y, size.height),
            },
            color_stops,
        })
    }

    pub fn linear_preset(
        direction: GradientDirection,
        size: Size,
        stops: Vec<ColorStop>,
    ) -> Result<Self, StyleError> {
        Self::linear(direction.positions(), size, stops)
    }

    pub fn linear_angle(
        degrees: f64,
        size: Size,
        stops: Vec<ColorStop>,
    ) -> Result<Self, StyleError> {
        Self::linear(GradientPositions::from_angle(degrees), size, stops)
    }

    /// Radial gradient centred at a percentage position; `radius` is a
    /// fraction of the box's longest side.
    pub fn radial(
        center_x: f64,
        center_y: f64,
        radius: f64,
        size: Size,
        stops: Vec<ColorStop>,
    ) -> Result<Self, StyleError> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(StyleError::InvalidGradient {
                reason: format!("radius must be positive, got {}", radius),
            });
        }
        let color_stops = normalize_stops(stops)?;
        let cx = percent_to_local(center_x, size.width);
        let cy = percent_to_local(center_y, size.height);
        Ok(Self {
            kind: GradientKind::Radial {
                x1: cx,
                y1: cy,
                r1: 0.0,
                x2: cx,
                y2: cy,
                r2: radius * size.longest_side(),
            },
            color_stops,
        })
    }

    /// Start, interpolated midpoint and end stops for a two-colour picker.
    pub fn two_color_stops(start: &str, end: &str) -> Result<Vec<ColorStop>, StyleError> {
        let a = Color::parse(start)?;
        let b = Color::parse(end)?;
        Ok(vec![
            ColorStop::new(0.0, start),
            ColorStop::new(0.5, a.interpolate(&b, 0.5).to_string()),
            ColorStop::new(1.0, end),
        ])
    }

    pub fn is_linear(&self) -> bool {
        matches!(self.kind, GradientKind::Linear { .. })
    }

    /// Colour at `offset`, interpolated between the neighbouring stops.
    pub fn color_at(&self, offset: f64) -> Option<Color> {
        let first = self.color_stops.first()?;
        let last = self.color_stops.last()?;
        if offset <= first.offset {
            return Color::parse(&first.color).ok();
        }
        if offset >= last.offset {
            return Color::parse(&last.color).ok();
        }
        for pair in self.color_stops.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if offset >= a.offset && offset <= b.offset {
                let span = b.offset - a.offset;
                let t = if span > 0.0 {
                    (offset - a.offset) / span
                } else {
                    0.0
                };
                let ca = Color::parse(&a.color).ok()?;
                let cb = Color::parse(&b.color).ok()?;
                return Some(ca.interpolate(&cb, t));
            }
        }
        None
    }
}

/// Validates and sorts stops: at least two, offsets within `[0, 1]`,
/// colours parseable.
pub fn normalize_stops(mut stops: Vec<ColorStop>) -> Result<Vec<ColorStop>, StyleError> {
    if stops.len() < 2 {
        return Err(StyleError::InvalidGradient {
            reason: format!("at least two color stops required, got {}", stops.len()),
        });
    }
    for stop in &stops {
        if !(0.0..=1.0).contains(&stop.offset) {
            return Err(StyleError::InvalidGradient {
                reason: format!("stop offset {} outside [0, 1]", stop.offset),
            });
        }
        Color::parse(&stop.color)?;
    }
    stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    Ok(stops)
}
