//! Object factory.
//!
//! Builds scene objects from presets merged with caller overrides. The
//! results are placed by the surface, so positions set here are only
//! provisional.

use designkit_core::constants::{
    CIRCLE_RADIUS, DEFAULT_FILL_COLOR, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, DIAMOND_SIZE,
    FONT_WEIGHT_BOLD, FONT_WEIGHT_NORMAL, RECTANGLE_SIZE, SOFT_RECTANGLE_RADIUS, TRIANGLE_SIZE,
};

use crate::model::{
    FontStyle, ObjectKind, Paint, Point, SceneObject, Stroke, TextAlign, TextBox, TextFlavour,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePreset {
    Circle,
    Rectangle,
    SoftRectangle,
    Triangle,
    InverseTriangle,
    Diamond,
}

/// Per-call overrides merged over a shape preset. `None` keeps the preset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeOverrides {
    pub fill: Option<Paint>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_dash_array: Option<Vec<f64>>,
    pub opacity: Option<f64>,
    pub angle: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
    pub corner_radius: Option<f64>,
    pub name: Option<String>,
}

impl ShapeOverrides {
    fn apply_paint(&self, object: &mut SceneObject) {
        if let Some(fill) = &self.fill {
            object.fill = Some(fill.clone());
        }
        if let Some(stroke) = &self.stroke {
            object.stroke.color = Some(stroke.clone());
        }
        if let Some(width) = self.stroke_width {
            object.stroke.width = width;
        }
        if let Some(dash) = &self.stroke_dash_array {
            object.stroke.dash_array = Some(dash.clone());
        }
        if let Some(opacity) = self.opacity {
            object.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(angle) = self.angle {
            object.transform.angle = angle;
        }
        if let Some(name) = &self.name {
            object.name = Some(name.clone());
        }
    }
}

fn default_paint(kind: ObjectKind) -> SceneObject {
    SceneObject::new(kind)
        .with_fill(DEFAULT_FILL_COLOR)
        .with_stroke(Stroke::solid(DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH))
        .with_position(100.0, 100.0)
}

pub fn inverse_triangle_points(width: f64, height: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width / 2.0, height),
    ]
}

pub fn diamond_points(width: f64, height: f64) -> Vec<Point> {
    vec![
        Point::new(width / 2.0, 0.0),
        Point::new(width, height / 2.0),
        Point::new(width / 2.0, height),
        Point::new(0.0, height / 2.0),
    ]
}

/// Builds a shape from `preset` with `overrides` applied.
pub fn build_shape(preset: ShapePreset, overrides: &ShapeOverrides) -> SceneObject {
    let size = |default: f64| {
        (
            overrides.width.unwrap_or(default),
            overrides.height.unwrap_or(default),
        )
    };
    let kind = match preset {
        ShapePreset::Circle => ObjectKind::Circle {
            radius: overrides.radius.unwrap_or(CIRCLE_RADIUS),
        },
        ShapePreset::Rectangle | ShapePreset::SoftRectangle => {
            let (width, height) = size(RECTANGLE_SIZE);
            let default_radius = if preset == ShapePreset::SoftRectangle {
                SOFT_RECTANGLE_RADIUS
            } else {
                0.0
            };
            let r = overrides.corner_radius.unwrap_or(default_radius);
            ObjectKind::Rect {
                width,
                height,
                rx: r,
                ry: r,
            }
        }
        ShapePreset::Triangle => {
            let (width, height) = size(TRIANGLE_SIZE);
            ObjectKind::Triangle { width, height }
        }
        ShapePreset::InverseTriangle => {
            let (width, height) = size(RECTANGLE_SIZE);
            ObjectKind::Polygon {
                points: inverse_triangle_points(width, height),
            }
        }
        ShapePreset::Diamond => {
            let (width, height) = size(DIAMOND_SIZE);
            ObjectKind::Polygon {
                points: diamond_points(width, height),
            }
        }
    };
    let mut object = default_paint(kind);
    overrides.apply_paint(&mut object);
    object
}

/// Text presets from the text panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPreset {
    Textbox,
    Heading,
    Subheading,
    Paragraph,
}

impl TextPreset {
    pub fn content(&self) -> &'static str {
        match self {
            TextPreset::Textbox => "Textbox",
            TextPreset::Heading => "Heading",
            TextPreset::Subheading => "Subheading",
            TextPreset::Paragraph => "Paragraph",
        }
    }

    pub fn overrides(&self) -> TextOverrides {
        match self {
            TextPreset::Textbox => TextOverrides::default(),
            TextPreset::Heading => TextOverrides {
                font_size: Some(80.0),
                font_weight: Some(FONT_WEIGHT_BOLD),
                ..Default::default()
            },
            TextPreset::Subheading => TextOverrides {
                font_size: Some(44.0),
                font_weight: Some(600),
                ..Default::default()
            },
            TextPreset::Paragraph => TextOverrides {
                font_size: Some(32.0),
                font_weight: Some(FONT_WEIGHT_NORMAL),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOverrides {
    pub fill: Option<Paint>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<u16>,
    pub font_style: Option<FontStyle>,
    pub underline: Option<bool>,
    pub linethrough: Option<bool>,
    pub text_align: Option<TextAlign>,
    pub flavour: Option<TextFlavour>,
    pub width: Option<f64>,
}

/// Builds a textbox: Arial 32, black fill, unless overridden.
pub fn build_text(content: &str, overrides: &TextOverrides) -> SceneObject {
    let mut text = TextBox::new(content);
    if let Some(family) = &overrides.font_family {
        text.font_family = family.clone();
    }
    if let Some(size) = overrides.font_size {
        text.font_size = size;
    }
    if let Some(weight) = overrides.font_weight {
        text.font_weight = weight;
    }
    if let Some(style) = overrides.font_style {
        text.font_style = style;
    }
    if let Some(underline) = overrides.underline {
        text.underline = underline;
    }
    if let Some(linethrough) = overrides.linethrough {
        text.linethrough = linethrough;
    }
    if let Some(align) = overrides.text_align {
        text.text_align = align;
    }
    if let Some(flavour) = overrides.flavour {
        text.flavour = flavour;
    }
    if let Some(width) = overrides.width {
        text.width = width;
    }
    let fill = overrides
        .fill
        .clone()
        .unwrap_or_else(|| Paint::solid(DEFAULT_FILL_COLOR));
    SceneObject::new(ObjectKind::Text(text))
        .with_fill(fill)
        .with_position(100.0, 100.0)
}

/// Wraps a decoded raster as an image object at its natural size.
pub fn build_image(src: String, width: f64, height: f64) -> SceneObject {
    let mut image = SceneObject::new(ObjectKind::Image { src, width, height });
    image.stroke.width = 0.0;
    image
}
