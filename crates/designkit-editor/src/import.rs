//! # Import
//!
//! Turns external assets into scene objects ready for
//! [`Surface::add_object`](crate::surface::Surface::add_object).
//!
//! Supports:
//! - SVG markup: `rect`, `circle`, `ellipse`, `line`, `polyline`, `polygon`,
//!   `path` and `text` elements, with `fill`, `stroke`, `stroke-width` and
//!   `opacity` taken from attributes or an inline `style`
//! - Raster images in any format the `image` crate decodes, embedded as a
//!   base64 data URL
//!
//! `transform` attributes on elements and enclosing `<g>` groups, and the
//! root `viewBox`, are folded into each object's placement.
//!
//! Multi-element SVGs become one group. Everything is scaled down uniformly
//! so the longest side fits the import limit.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lyon::geom::euclid::{self, default::Transform2D};
use lyon::math::{point, vector, Angle};
use lyon::path::builder::SvgPathBuilder;
use lyon::path::iterator::PathIterator;
use lyon::path::{ArcFlags, Path, PathEvent};

use designkit_core::constants::IMPORT_MAX_DIMENSION;
use designkit_core::ImportError;

use crate::factory::build_image;
use crate::model::{Bounds, ObjectKind, Paint, Point, SceneObject, Stroke, TextBox};
use crate::surface::group_objects;

const PATH_TOLERANCE: f32 = 0.1;

type Matrix = Transform2D<f64>;

/// SVG importer. `max_dimension` caps the longest side of the result.
#[derive(Debug, Clone, Copy)]
pub struct SvgImporter {
    pub max_dimension: f64,
}

impl Default for SvgImporter {
    fn default() -> Self {
        Self {
            max_dimension: IMPORT_MAX_DIMENSION,
        }
    }
}

impl SvgImporter {
    pub fn new(max_dimension: f64) -> Self {
        Self { max_dimension }
    }

    /// Parses `markup` into one object: the lone element, or a group of all
    /// of them in document order.
    pub fn import_str(&self, markup: &str) -> Result<SceneObject, ImportError> {
        if !markup.contains("<svg") {
            return Err(ImportError::InvalidSvg {
                reason: "missing <svg> root element".to_string(),
            });
        }

        let mut objects = parse_elements(markup);
        tracing::debug!("SVG import found {} drawable element(s)", objects.len());

        let mut object = match objects.len() {
            0 => return Err(ImportError::NoDrawableElements),
            1 => objects.remove(0),
            _ => group_objects(objects).ok_or(ImportError::NoDrawableElements)?,
        };

        fit_longest_side(&mut object, self.max_dimension);
        Ok(object)
    }

    pub fn import_bytes(&self, bytes: &[u8]) -> Result<SceneObject, ImportError> {
        let markup = std::str::from_utf8(bytes).map_err(|e| ImportError::InvalidSvg {
            reason: format!("not UTF-8: {}", e),
        })?;
        self.import_str(markup)
    }
}

/// Decodes a raster image and wraps it as an image object, scaled down so
/// its longest side is at most `max_dimension`.
pub fn import_raster(bytes: &[u8], max_dimension: f64) -> Result<SceneObject, ImportError> {
    let format = image::guess_format(bytes).map_err(|e| ImportError::ImageDecode {
        reason: e.to_string(),
    })?;
    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        ImportError::ImageDecode {
            reason: e.to_string(),
        }
    })?;
    let (width, height) = (decoded.width() as f64, decoded.height() as f64);
    let src = format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    );
    tracing::debug!("Decoded {:?} image {}x{}", format, width, height);

    let mut object = build_image(src, width, height);
    fit_longest_side(&mut object, max_dimension);
    Ok(object)
}

/// Image object for a remote URL whose natural size is already known.
pub fn image_from_url(url: &str, width: f64, height: f64, max_dimension: f64) -> SceneObject {
    let mut object = build_image(url.to_string(), width, height);
    fit_longest_side(&mut object, max_dimension);
    object
}

/// Scales `object` down uniformly so the longest side of its bounding box
/// is at most `max_dimension`. Never scales up.
fn fit_longest_side(object: &mut SceneObject, max_dimension: f64) {
    let longest = object.bounding_rect().size().longest_side();
    if longest > max_dimension && max_dimension > 0.0 {
        object.scale_uniform(max_dimension / longest);
    }
}

fn parse_elements(markup: &str) -> Vec<SceneObject> {
    let mut objects = Vec::new();
    // Current transform matrix for each open `<svg>`/`<g>`.
    let mut stack = vec![Matrix::identity()];
    let mut pos = 0;

    while let Some(offset) = markup[pos..].find('<') {
        let start = pos + offset;
        let rest = &markup[start..];

        if rest.starts_with("<!--") {
            pos = skip_past(markup, start, "-->");
            continue;
        }
        let Some(tag_len) = rest.find('>') else {
            break;
        };
        let tag = &rest[..tag_len];
        pos = start + tag_len + 1;
        if let Some(closed) = tag.strip_prefix("</") {
            if matches!(tag_name(closed), "svg" | "g") && stack.len() > 1 {
                stack.pop();
            }
            continue;
        }
        let name = tag_name(tag);
        let self_closing = tag.ends_with('/');
        let parent = stack.last().copied().unwrap_or_else(Matrix::identity);

        let object = match name {
            "defs" | "clipPath" | "mask" | "pattern" | "symbol" | "style" if !self_closing => {
                pos = skip_past(markup, pos, &format!("</{}", name));
                None
            }
            "svg" if !self_closing => {
                stack.push(viewbox_matrix(tag).then(&parent));
                None
            }
            "g" if !self_closing => {
                stack.push(element_matrix(tag).then(&parent));
                None
            }
            "rect" => parse_rect(tag),
            "circle" => parse_circle(tag),
            "ellipse" => parse_ellipse(tag),
            "line" => parse_line(tag),
            "polyline" => parse_points(tag).and_then(|pts| polyline_object(tag, &pts)),
            "polygon" => parse_points(tag).and_then(|pts| polygon_object(tag, pts)),
            "path" => attr_str(tag, "d").and_then(|d| path_object(tag, d)),
            "text" if !self_closing => {
                let end = markup[pos..].find("</text").map(|e| pos + e);
                let inner = end.map(|e| &markup[pos..e]);
                if let Some(e) = end {
                    pos = skip_past(markup, e, ">");
                }
                inner.and_then(|inner| parse_text(tag, inner))
            }
            _ => None,
        };
        if let Some(mut object) = object {
            apply_matrix(&mut object, &element_matrix(tag).then(&parent));
            objects.push(object);
        }
    }
    objects
}

/// Value of a `transform` attribute, identity when absent.
fn element_matrix(tag: &str) -> Matrix {
    attr_str(tag, "transform")
        .map(parse_transform)
        .unwrap_or_else(Matrix::identity)
}

/// Parses an SVG transform list such as `translate(10 20) rotate(45)`.
/// Unknown or malformed entries are skipped.
fn parse_transform(value: &str) -> Matrix {
    let mut matrix = Matrix::identity();
    let mut rest = value;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')').map(|i| open + i) else {
            break;
        };
        let name = rest[..open].trim_matches(|c: char| c.is_whitespace() || c == ',');
        let args = parse_numbers(&rest[open + 1..close]);
        match transform_step(name, &args) {
            // The rightmost entry applies first.
            Some(step) => matrix = step.then(&matrix),
            None => tracing::debug!("Ignoring SVG transform {}({})", name, args.len()),
        }
        rest = &rest[close + 1..];
    }
    matrix
}

fn transform_step(name: &str, args: &[f64]) -> Option<Matrix> {
    let step = match (name, args) {
        ("matrix", [a, b, c, d, e, f]) => Matrix::new(*a, *b, *c, *d, *e, *f),
        ("translate", [tx]) => Matrix::translation(*tx, 0.0),
        ("translate", [tx, ty]) => Matrix::translation(*tx, *ty),
        ("scale", [s]) => Matrix::scale(*s, *s),
        ("scale", [sx, sy]) => Matrix::scale(*sx, *sy),
        ("rotate", [angle]) => Matrix::rotation(euclid::Angle::degrees(*angle)),
        ("rotate", [angle, cx, cy]) => Matrix::translation(-cx, -cy)
            .then(&Matrix::rotation(euclid::Angle::degrees(*angle)))
            .then(&Matrix::translation(*cx, *cy)),
        ("skewX", [angle]) => Matrix::new(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0),
        ("skewY", [angle]) => Matrix::new(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0),
        _ => return None,
    };
    Some(step)
}

/// Maps the root `viewBox` onto the `width`/`height` viewport. Each axis is
/// scaled independently; `preserveAspectRatio` is not applied.
fn viewbox_matrix(tag: &str) -> Matrix {
    let own = element_matrix(tag);
    let Some(view_box) = attr_str(tag, "viewBox") else {
        return own;
    };
    let numbers = parse_numbers(view_box);
    let [x, y, width, height] = numbers[..] else {
        return own;
    };
    if width <= 0.0 || height <= 0.0 {
        return own;
    }
    let sx = attr_f64(tag, "width").map_or(1.0, |w| w / width);
    let sy = attr_f64(tag, "height").map_or(1.0, |h| h / height);
    Matrix::translation(-x, -y)
        .then(&Matrix::scale(sx, sy))
        .then(&own)
}

/// Folds an affine matrix into the object's placement: the centre is
/// mapped through it and its rotation and scale are decomposed onto the
/// transform. Skew is dropped.
fn apply_matrix(object: &mut SceneObject, matrix: &Matrix) {
    if *matrix == Matrix::identity() {
        return;
    }
    let scale_x = matrix.m11.hypot(matrix.m12);
    if scale_x == 0.0 {
        return;
    }
    let scale_y = matrix.determinant() / scale_x;
    let angle = matrix.m12.atan2(matrix.m11).to_degrees();

    let center = object.center();
    let moved = matrix.transform_point(euclid::point2(center.x, center.y));
    let t = &mut object.transform;
    t.scale_x *= scale_x;
    t.scale_y *= scale_y;
    t.angle = (t.angle + angle) % 360.0;
    object.set_center(Point::new(moved.x, moved.y));
}

fn skip_past(markup: &str, from: usize, needle: &str) -> usize {
    markup[from..]
        .find(needle)
        .map(|i| from + i + needle.len())
        .unwrap_or(markup.len())
}

/// Element name, stopping at whitespace, `/` or the end of the tag.
fn tag_name(tag: &str) -> &str {
    let body = tag.trim_start_matches('<');
    let end = body
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(body.len());
    &body[..end]
}

fn strip_tags(content: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

fn attr_str<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    for quote in ['"', '\''] {
        let pattern = format!("{}={}", attr, quote);
        let mut search = 0;
        while let Some(found) = tag[search..].find(&pattern) {
            let start = search + found;
            let boundary = tag[..start]
                .chars()
                .next_back()
                .is_none_or(|c| c.is_whitespace());
            let value_start = start + pattern.len();
            if boundary {
                return tag[value_start..]
                    .find(quote)
                    .map(|end| &tag[value_start..value_start + end]);
            }
            search = value_start;
        }
    }
    None
}

/// Reads `attr` from the inline style first, then from the attribute.
fn presentation_attr(tag: &str, attr: &str) -> Option<String> {
    let from_style = attr_str(tag, "style").and_then(|style| {
        style.split(';').find_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            (key.trim() == attr).then(|| value.trim().to_string())
        })
    });
    from_style.or_else(|| attr_str(tag, attr).map(|v| v.trim().to_string()))
}

fn attr_f64(tag: &str, attr: &str) -> Option<f64> {
    attr_str(tag, attr).and_then(parse_length)
}

/// Numbers separated by whitespace or commas; anything unparsable is skipped.
fn parse_numbers(value: &str) -> Vec<f64> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// Parses a number, dropping a trailing `px`.
fn parse_length(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").parse().ok()
}

fn apply_presentation(tag: &str, object: &mut SceneObject, default_fill: bool) {
    object.fill = match presentation_attr(tag, "fill").as_deref() {
        Some("none") | Some("transparent") => None,
        Some(color) => Some(Paint::solid(color)),
        None if default_fill => Some(Paint::solid("#000000")),
        None => None,
    };
    let stroke = presentation_attr(tag, "stroke").filter(|s| s != "none");
    let width = presentation_attr(tag, "stroke-width")
        .and_then(|w| parse_length(&w))
        .unwrap_or(1.0);
    object.stroke = match stroke {
        Some(color) => Stroke::solid(color, width),
        None => Stroke {
            width: 0.0,
            ..Stroke::default()
        },
    };
    if let Some(opacity) = presentation_attr(tag, "opacity").and_then(|o| parse_length(&o)) {
        object.opacity = opacity.clamp(0.0, 1.0);
    }
}

fn placed(tag: &str, kind: ObjectKind, left: f64, top: f64, default_fill: bool) -> SceneObject {
    let mut object = SceneObject::new(kind).with_position(left, top);
    apply_presentation(tag, &mut object, default_fill);
    object
}

fn parse_rect(tag: &str) -> Option<SceneObject> {
    let width = attr_f64(tag, "width")?;
    let height = attr_f64(tag, "height")?;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let rx = attr_f64(tag, "rx");
    let ry = attr_f64(tag, "ry");
    let kind = ObjectKind::Rect {
        width,
        height,
        rx: rx.or(ry).unwrap_or(0.0),
        ry: ry.or(rx).unwrap_or(0.0),
    };
    let x = attr_f64(tag, "x").unwrap_or(0.0);
    let y = attr_f64(tag, "y").unwrap_or(0.0);
    Some(placed(tag, kind, x, y, true))
}

fn parse_circle(tag: &str) -> Option<SceneObject> {
    let radius = attr_f64(tag, "r").filter(|r| *r > 0.0)?;
    let cx = attr_f64(tag, "cx").unwrap_or(0.0);
    let cy = attr_f64(tag, "cy").unwrap_or(0.0);
    Some(placed(
        tag,
        ObjectKind::Circle { radius },
        cx - radius,
        cy - radius,
        true,
    ))
}

fn parse_ellipse(tag: &str) -> Option<SceneObject> {
    let rx = attr_f64(tag, "rx").filter(|r| *r > 0.0)?;
    let ry = attr_f64(tag, "ry").filter(|r| *r > 0.0)?;
    let cx = attr_f64(tag, "cx").unwrap_or(0.0);
    let cy = attr_f64(tag, "cy").unwrap_or(0.0);
    Some(placed(
        tag,
        ObjectKind::Ellipse { rx, ry },
        cx - rx,
        cy - ry,
        true,
    ))
}

fn parse_line(tag: &str) -> Option<SceneObject> {
    let x1 = attr_f64(tag, "x1").unwrap_or(0.0);
    let y1 = attr_f64(tag, "y1").unwrap_or(0.0);
    let x2 = attr_f64(tag, "x2").unwrap_or(0.0);
    let y2 = attr_f64(tag, "y2").unwrap_or(0.0);
    if x1 == x2 && y1 == y2 {
        return None;
    }
    polyline_object(tag, &[Point::new(x1, y1), Point::new(x2, y2)])
}

fn parse_points(tag: &str) -> Option<Vec<Point>> {
    let numbers = parse_numbers(attr_str(tag, "points")?);
    let points: Vec<Point> = numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect();
    (points.len() >= 2).then_some(points)
}

fn polyline_object(tag: &str, points: &[Point]) -> Option<SceneObject> {
    let (first, rest) = points.split_first()?;
    let mut d = format!("M {} {}", first.x, first.y);
    for p in rest {
        d.push_str(&format!(" L {} {}", p.x, p.y));
    }
    let mut object = path_object(tag, &d)?;
    if presentation_attr(tag, "fill").is_none() {
        object.fill = None;
    }
    Some(object)
}

fn polygon_object(tag: &str, points: Vec<Point>) -> Option<SceneObject> {
    let bounds = Bounds::from_points(&points)?;
    Some(placed(
        tag,
        ObjectKind::Polygon { points },
        bounds.left,
        bounds.top,
        true,
    ))
}

fn path_object(tag: &str, d: &str) -> Option<SceneObject> {
    let path = parse_path_data(d)?;
    let bounds = path_bounds(&path)?;
    let kind = ObjectKind::Path {
        path: d.trim().to_string(),
        width: bounds.width,
        height: bounds.height,
        path_offset: Point::new(bounds.left, bounds.top),
    };
    Some(placed(tag, kind, bounds.left, bounds.top, true))
}

/// `inner` is the markup between `<text>` and `</text>`. Each `<tspan>`
/// becomes a line; position falls back to the first span's `x`/`y`.
fn parse_text(tag: &str, inner: &str) -> Option<SceneObject> {
    let lines: Vec<String> = inner
        .split("</tspan>")
        .map(strip_tags)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }
    let span = inner
        .find("<tspan")
        .and_then(|i| inner[i..].find('>').map(|end| &inner[i..i + end]));
    let coordinate = |attr: &str| {
        attr_f64(tag, attr)
            .or_else(|| span.and_then(|span| attr_f64(span, attr)))
            .unwrap_or(0.0)
    };

    let mut text = TextBox::new(lines.join("\n"));
    if let Some(size) = presentation_attr(tag, "font-size").and_then(|s| parse_length(&s)) {
        text.font_size = size;
    }
    if let Some(family) = presentation_attr(tag, "font-family") {
        text.font_family = family.trim_matches(|c| c == '\'' || c == '"').to_string();
    }
    if let Some(weight) = presentation_attr(tag, "font-weight") {
        text.font_weight = match weight.as_str() {
            "bold" => 700,
            "normal" => 400,
            other => other.parse().unwrap_or(400),
        };
    }
    let top = coordinate("y") - text.font_size;
    Some(placed(tag, ObjectKind::Text(text), coordinate("x"), top, true))
}

/// Bounds of the flattened path; `None` for an empty path.
pub fn path_bounds(path: &Path) -> Option<Bounds> {
    let mut points = Vec::new();
    for event in path.iter().flattened(PATH_TOLERANCE) {
        match event {
            PathEvent::Begin { at } => points.push(at),
            PathEvent::Line { to, .. } => points.push(to),
            _ => {}
        }
    }
    let points: Vec<Point> = points
        .into_iter()
        .map(|p| Point::new(p.x as f64, p.y as f64))
        .collect();
    Bounds::from_points(&points)
}

fn tokenize_path(data: &str) -> Vec<PathToken> {
    let mut tokens = Vec::new();
    let mut number = String::new();
    let flush = |number: &mut String, tokens: &mut Vec<PathToken>| {
        if let Ok(value) = number.parse::<f32>() {
            tokens.push(PathToken::Number(value));
        }
        number.clear();
    };
    for c in data.chars() {
        match c {
            c if c.is_ascii_alphabetic() && c != 'e' && c != 'E' => {
                flush(&mut number, &mut tokens);
                tokens.push(PathToken::Command(c));
            }
            '-' | '+' if !number.is_empty() && !number.ends_with(['e', 'E']) => {
                flush(&mut number, &mut tokens);
                number.push(c);
            }
            '.' if number.contains('.') && !number.contains(['e', 'E']) => {
                flush(&mut number, &mut tokens);
                number.push(c);
            }
            c if c.is_whitespace() || c == ',' => flush(&mut number, &mut tokens),
            c => number.push(c),
        }
    }
    flush(&mut number, &mut tokens);
    tokens
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathToken {
    Command(char),
    Number(f32),
}

/// Parses SVG path data into a lyon path. Returns `None` when the data
/// holds no drawable segment.
pub fn parse_path_data(data: &str) -> Option<Path> {
    let tokens = tokenize_path(data);
    let mut builder = Path::builder().with_svg();
    let mut command = None;
    let mut drew = false;
    let mut i = 0;

    let args = |i: usize, n: usize| -> Option<Vec<f32>> {
        let slice = tokens.get(i..i + n)?;
        slice
            .iter()
            .map(|t| match t {
                PathToken::Number(v) => Some(*v),
                PathToken::Command(_) => None,
            })
            .collect()
    };

    while i < tokens.len() {
        if let PathToken::Command(c) = tokens[i] {
            command = Some(c);
            i += 1;
            if c == 'Z' || c == 'z' {
                builder.close();
                command = None;
                continue;
            }
        }
        let Some(cmd) = command else {
            i += 1;
            continue;
        };
        let arity = match cmd.to_ascii_uppercase() {
            'M' | 'L' | 'T' => 2,
            'H' | 'V' => 1,
            'C' => 6,
            'S' | 'Q' => 4,
            'A' => 7,
            _ => return None,
        };
        let Some(a) = args(i, arity) else {
            break;
        };
        i += arity;

        match cmd {
            'M' => {
                builder.move_to(point(a[0], a[1]));
                command = Some('L');
            }
            'm' => {
                builder.relative_move_to(vector(a[0], a[1]));
                command = Some('l');
            }
            'L' => {
                builder.line_to(point(a[0], a[1]));
            }
            'l' => {
                builder.relative_line_to(vector(a[0], a[1]));
            }
            'H' => {
                builder.horizontal_line_to(a[0]);
            }
            'h' => {
                builder.relative_horizontal_line_to(a[0]);
            }
            'V' => {
                builder.vertical_line_to(a[0]);
            }
            'v' => {
                builder.relative_vertical_line_to(a[0]);
            }
            'C' => {
                builder.cubic_bezier_to(point(a[0], a[1]), point(a[2], a[3]), point(a[4], a[5]));
            }
            'c' => {
                builder.relative_cubic_bezier_to(
                    vector(a[0], a[1]),
                    vector(a[2], a[3]),
                    vector(a[4], a[5]),
                );
            }
            'S' => {
                builder.smooth_cubic_bezier_to(point(a[0], a[1]), point(a[2], a[3]));
            }
            's' => {
                builder.smooth_relative_cubic_bezier_to(vector(a[0], a[1]), vector(a[2], a[3]));
            }
            'Q' => {
                builder.quadratic_bezier_to(point(a[0], a[1]), point(a[2], a[3]));
            }
            'q' => {
                builder.relative_quadratic_bezier_to(vector(a[0], a[1]), vector(a[2], a[3]));
            }
            'T' => {
                builder.smooth_quadratic_bezier_to(point(a[0], a[1]));
            }
            't' => {
                builder.smooth_relative_quadratic_bezier_to(vector(a[0], a[1]));
            }
            'A' | 'a' => {
                let radii = vector(a[0], a[1]);
                let rotation = Angle::degrees(a[2]);
                let flags = ArcFlags {
                    large_arc: a[3] != 0.0,
                    sweep: a[4] != 0.0,
                };
                if cmd == 'A' {
                    builder.arc_to(radii, rotation, flags, point(a[5], a[6]));
                } else {
                    builder.relative_arc_to(radii, rotation, flags, vector(a[5], a[6]));
                }
            }
            _ => return None,
        }
        if !matches!(cmd, 'M' | 'm') {
            drew = true;
        }
    }

    drew.then(|| builder.build())
}
