use serde::{Deserialize, Serialize};

use crate::gradient::Gradient;

/// Fill paint: a CSS colour string or a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    Gradient(Gradient),
}

impl Paint {
    pub fn solid(color: impl Into<String>) -> Self {
        Paint::Solid(color.into())
    }

    pub fn as_solid(&self) -> Option<&str> {
        match self {
            Paint::Solid(c) => Some(c),
            Paint::Gradient(_) => None,
        }
    }

    pub fn as_gradient(&self) -> Option<&Gradient> {
        match self {
            Paint::Solid(_) => None,
            Paint::Gradient(g) => Some(g),
        }
    }

    /// A single colour standing in for this paint; gradients report their first stop.
    pub fn representative_color(&self) -> Option<&str> {
        match self {
            Paint::Solid(c) => Some(c),
            Paint::Gradient(g) => g.color_stops.first().map(|s| s.color.as_str()),
        }
    }
}

impl From<&str> for Paint {
    fn from(color: &str) -> Self {
        Paint::Solid(color.to_string())
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Paint::Gradient(gradient)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Outline paint. Serialized flat into the owning object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    #[serde(rename = "stroke", default)]
    pub color: Option<String>,
    #[serde(rename = "strokeWidth", default = "default_stroke_width")]
    pub width: f64,
    #[serde(
        rename = "strokeDashArray",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dash_array: Option<Vec<f64>>,
    #[serde(rename = "strokeLineJoin", default)]
    pub line_join: LineJoin,
    #[serde(rename = "strokeLineCap", default)]
    pub line_cap: LineCap,
}

fn default_stroke_width() -> f64 {
    1.0
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: None,
            width: default_stroke_width(),
            dash_array: None,
            line_join: LineJoin::default(),
            line_cap: LineCap::default(),
        }
    }
}

impl Stroke {
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: Some(color.into()),
            width,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub color: String,
    pub blur: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

impl Shadow {
    pub fn new(color: impl Into<String>, blur: f64) -> Self {
        Self {
            color: color.into(),
            blur,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}
