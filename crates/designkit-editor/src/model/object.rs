use serde::{Deserialize, Serialize};

use designkit_core::constants::WORKSPACE_NAME;
use designkit_core::ObjectId;

use super::{Bounds, Paint, Point, Shadow, Size, Stroke, TextBox};

/// Closed set of scene object variants.
///
/// Serialized with a `type` tag next to the object's other fields so a
/// snapshot reads like a flat property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Circle {
        radius: f64,
    },
    Ellipse {
        rx: f64,
        ry: f64,
    },
    Rect {
        width: f64,
        height: f64,
        #[serde(default)]
        rx: f64,
        #[serde(default)]
        ry: f64,
    },
    Triangle {
        width: f64,
        height: f64,
    },
    /// Points are in the polygon's own space; the layout box is their bounds.
    Polygon {
        points: Vec<Point>,
    },
    /// Raw SVG path data; `path_offset` is the top-left of its bounds.
    Path {
        path: String,
        width: f64,
        height: f64,
        #[serde(rename = "pathOffset")]
        path_offset: Point,
    },
    Text(TextBox),
    Image {
        src: String,
        width: f64,
        height: f64,
    },
    /// Children are positioned relative to the group's centre.
    Group {
        objects: Vec<SceneObject>,
    },
}

impl ObjectKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Circle { .. } => "circle",
            ObjectKind::Ellipse { .. } => "ellipse",
            ObjectKind::Rect { .. } => "rect",
            ObjectKind::Triangle { .. } => "triangle",
            ObjectKind::Polygon { .. } => "polygon",
            ObjectKind::Path { .. } => "path",
            ObjectKind::Text(_) => "text",
            ObjectKind::Image { .. } => "image",
            ObjectKind::Group { .. } => "group",
        }
    }

    /// Unscaled, unrotated layout size.
    pub fn local_size(&self) -> Size {
        match self {
            ObjectKind::Circle { radius } => Size::new(radius * 2.0, radius * 2.0),
            ObjectKind::Ellipse { rx, ry } => Size::new(rx * 2.0, ry * 2.0),
            ObjectKind::Rect { width, height, .. }
            | ObjectKind::Triangle { width, height }
            | ObjectKind::Path { width, height, .. }
            | ObjectKind::Image { width, height, .. } => Size::new(*width, *height),
            ObjectKind::Polygon { points } => Bounds::from_points(points)
                .map(|b| b.size())
                .unwrap_or_default(),
            ObjectKind::Text(text) => text.measure(),
            ObjectKind::Group { objects } => objects
                .iter()
                .map(SceneObject::bounding_rect)
                .reduce(|a, b| a.union(&b))
                .map(|b| b.size())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginX {
    #[default]
    Left,
    Center,
    Right,
}

impl OriginX {
    fn factor(&self) -> f64 {
        match self {
            OriginX::Left => 0.0,
            OriginX::Center => 0.5,
            OriginX::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginY {
    #[default]
    Top,
    Center,
    Bottom,
}

impl OriginY {
    fn factor(&self) -> f64 {
        match self {
            OriginY::Top => 0.0,
            OriginY::Center => 0.5,
            OriginY::Bottom => 1.0,
        }
    }
}

/// Placement of an object. `left`/`top` locate the origin point of the
/// unrotated box; rotation is about the box centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub left: f64,
    pub top: f64,
    #[serde(default = "unit")]
    pub scale_x: f64,
    #[serde(default = "unit")]
    pub scale_y: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub origin_x: OriginX,
    #[serde(default)]
    pub origin_y: OriginY,
}

fn unit() -> f64 {
    1.0
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            origin_x: OriginX::Left,
            origin_y: OriginY::Top,
        }
    }
}

/// Interaction flags carried through export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectFlags {
    pub selectable: bool,
    pub has_controls: bool,
    pub lock_movement_x: bool,
    pub lock_movement_y: bool,
    pub lock_scaling_x: bool,
    pub lock_scaling_y: bool,
    pub lock_rotation: bool,
    pub editable: bool,
    pub object_caching: bool,
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self {
            selectable: true,
            has_controls: true,
            lock_movement_x: false,
            lock_movement_y: false,
            lock_scaling_x: false,
            lock_scaling_y: false,
            lock_rotation: false,
            editable: true,
            object_caching: true,
        }
    }
}

impl ObjectFlags {
    /// Flags for an object the user cannot pick or move.
    pub fn locked() -> Self {
        Self {
            selectable: false,
            has_controls: false,
            lock_movement_x: true,
            lock_movement_y: true,
            lock_scaling_x: true,
            lock_scaling_y: true,
            lock_rotation: true,
            editable: false,
            object_caching: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub kind: ObjectKind,
    #[serde(flatten)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(flatten)]
    pub stroke: Stroke,
    #[serde(default = "unit")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(flatten)]
    pub flags: ObjectFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_angle: Option<f64>,
}

impl SceneObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            id: ObjectId::new(),
            kind,
            transform: Transform::default(),
            fill: None,
            stroke: Stroke::default(),
            opacity: 1.0,
            shadow: None,
            flags: ObjectFlags::default(),
            name: None,
            gradient_angle: None,
        }
    }

    pub fn with_fill(mut self, fill: impl Into<Paint>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_position(mut self, left: f64, top: f64) -> Self {
        self.transform.left = left;
        self.transform.top = top;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn is_workspace(&self) -> bool {
        self.name.as_deref() == Some(WORKSPACE_NAME)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ObjectKind::Text(_))
    }

    pub fn text(&self) -> Option<&TextBox> {
        match &self.kind {
            ObjectKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextBox> {
        match &mut self.kind {
            ObjectKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn local_size(&self) -> Size {
        self.kind.local_size()
    }

    /// Layout size after scaling.
    pub fn scaled_size(&self) -> Size {
        let size = self.local_size();
        Size::new(
            size.width * self.transform.scale_x.abs(),
            size.height * self.transform.scale_y.abs(),
        )
    }

    pub fn center(&self) -> Point {
        let size = self.scaled_size();
        let t = &self.transform;
        Point::new(
            t.left + size.width * (0.5 - t.origin_x.factor()),
            t.top + size.height * (0.5 - t.origin_y.factor()),
        )
    }

    /// Moves the object so its centre lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        let size = self.scaled_size();
        let t = &mut self.transform;
        t.left = center.x - size.width * (0.5 - t.origin_x.factor());
        t.top = center.y - size.height * (0.5 - t.origin_y.factor());
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.left += dx;
        self.transform.top += dy;
    }

    /// Multiplies both scale factors, keeping the centre in place.
    pub fn scale_uniform(&mut self, factor: f64) {
        let center = self.center();
        self.transform.scale_x *= factor;
        self.transform.scale_y *= factor;
        self.set_center(center);
    }

    /// Corners of the scaled box after rotation, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        let size = self.scaled_size();
        let c = self.center();
        let (hw, hh) = (size.width / 2.0, size.height / 2.0);
        [
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ]
        .map(|p| {
            let r = p.rotated(self.transform.angle);
            Point::new(c.x + r.x, c.y + r.y)
        })
    }

    /// Axis-aligned bounds of the rotated box. Stroke width is not included.
    pub fn bounding_rect(&self) -> Bounds {
        let corners = self.corners();
        Bounds::from_points(&corners).unwrap_or_default()
    }
}
