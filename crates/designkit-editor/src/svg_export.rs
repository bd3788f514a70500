//! Vector export.
//!
//! Emits an SVG document scoped to the workspace: the root `width`,
//! `height` and `viewBox` equal the workspace bounding rectangle, content is
//! clipped to it, and objects lying entirely outside it are left out.

use designkit_core::ExportError;

use crate::gradient::{Gradient, GradientKind};
use crate::model::{Bounds, ObjectKind, Paint, SceneObject, TextAlign, TextBox};

const CLIP_ID: &str = "workspace-clip";
const LINE_HEIGHT: f64 = 1.16;

/// Renders `objects` (workspace included) to an SVG string.
pub fn export_svg(objects: &[SceneObject]) -> Result<String, ExportError> {
    let workspace = objects
        .iter()
        .find(|o| o.is_workspace())
        .ok_or(ExportError::WorkspaceNotFound)?;
    let bounds = workspace.bounding_rect();

    let mut writer = SvgWriter::default();
    let mut skipped = 0;
    for object in objects {
        if !object.bounding_rect().intersects(&bounds) {
            skipped += 1;
            continue;
        }
        writer.object(object, 1);
    }
    if skipped > 0 {
        tracing::debug!("SVG export skipped {} object(s) outside the workspace", skipped);
    }

    Ok(writer.finish(&bounds))
}

#[derive(Default)]
struct SvgWriter {
    defs: String,
    body: String,
    gradients: usize,
}

impl SvgWriter {
    fn finish(self, bounds: &Bounds) -> String {
        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\" ?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\" xml:space=\"preserve\">\n",
            num(bounds.width),
            num(bounds.height),
            num(bounds.left),
            num(bounds.top),
            num(bounds.width),
            num(bounds.height)
        ));
        svg.push_str("<desc>Created with DesignKit</desc>\n<defs>\n");
        svg.push_str(&format!(
            "<clipPath id=\"{}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath>\n",
            CLIP_ID,
            num(bounds.left),
            num(bounds.top),
            num(bounds.width),
            num(bounds.height)
        ));
        svg.push_str(&self.defs);
        svg.push_str("</defs>\n");
        svg.push_str(&format!("<g clip-path=\"url(#{})\">\n", CLIP_ID));
        svg.push_str(&self.body);
        svg.push_str("</g>\n</svg>\n");
        svg
    }

    fn object(&mut self, object: &SceneObject, depth: usize) {
        let indent = "  ".repeat(depth);
        let center = object.center();
        let t = &object.transform;
        let mut transform = format!("translate({} {})", num(center.x), num(center.y));
        if t.angle != 0.0 {
            transform.push_str(&format!(" rotate({})", num(t.angle)));
        }
        if t.scale_x != 1.0 || t.scale_y != 1.0 {
            transform.push_str(&format!(" scale({} {})", num(t.scale_x), num(t.scale_y)));
        }
        let mut open = format!("{}<g transform=\"{}\"", indent, transform);
        if object.opacity < 1.0 {
            open.push_str(&format!(" opacity=\"{}\"", num(object.opacity)));
        }
        if let Some(name) = &object.name {
            open.push_str(&format!(" data-name=\"{}\"", escape(name)));
        }
        open.push_str(">\n");
        self.body.push_str(&open);

        let paint = self.paint_attrs(object);
        let inner = "  ".repeat(depth + 1);
        let size = object.local_size();
        let (hw, hh) = (size.width / 2.0, size.height / 2.0);

        match &object.kind {
            ObjectKind::Rect { width, height, rx, ry } => {
                let mut el = format!(
                    "{}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                    inner,
                    num(-width / 2.0),
                    num(-height / 2.0),
                    num(*width),
                    num(*height)
                );
                if *rx > 0.0 || *ry > 0.0 {
                    el.push_str(&format!(" rx=\"{}\" ry=\"{}\"", num(*rx), num(*ry)));
                }
                self.body.push_str(&format!("{}{}/>\n", el, paint));
            }
            ObjectKind::Circle { radius } => {
                self.body.push_str(&format!(
                    "{}<circle cx=\"0\" cy=\"0\" r=\"{}\"{}/>\n",
                    inner,
                    num(*radius),
                    paint
                ));
            }
            ObjectKind::Ellipse { rx, ry } => {
                self.body.push_str(&format!(
                    "{}<ellipse cx=\"0\" cy=\"0\" rx=\"{}\" ry=\"{}\"{}/>\n",
                    inner,
                    num(*rx),
                    num(*ry),
                    paint
                ));
            }
            ObjectKind::Triangle { .. } => {
                self.body.push_str(&format!(
                    "{}<polygon points=\"{},{} 0,{} {},{}\"{}/>\n",
                    inner,
                    num(-hw),
                    num(hh),
                    num(-hh),
                    num(hw),
                    num(hh),
                    paint
                ));
            }
            ObjectKind::Polygon { points } => {
                let origin = Bounds::from_points(points).unwrap_or_default();
                let list: Vec<String> = points
                    .iter()
                    .map(|p| {
                        format!(
                            "{},{}",
                            num(p.x - origin.left - hw),
                            num(p.y - origin.top - hh)
                        )
                    })
                    .collect();
                self.body.push_str(&format!(
                    "{}<polygon points=\"{}\"{}/>\n",
                    inner,
                    list.join(" "),
                    paint
                ));
            }
            ObjectKind::Path {
                path, path_offset, ..
            } => {
                self.body.push_str(&format!(
                    "{}<path d=\"{}\" transform=\"translate({} {})\"{}/>\n",
                    inner,
                    escape(path),
                    num(-path_offset.x - hw),
                    num(-path_offset.y - hh),
                    paint
                ));
            }
            ObjectKind::Text(text) => self.text(text, &inner, hw, hh, &paint),
            ObjectKind::Image { src, width, height } => {
                self.body.push_str(&format!(
                    "{}<image xlink:href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\"/>\n",
                    inner,
                    escape(src),
                    num(-width / 2.0),
                    num(-height / 2.0),
                    num(*width),
                    num(*height)
                ));
            }
            ObjectKind::Group { objects } => {
                for child in objects {
                    self.object(child, depth + 1);
                }
            }
        }

        self.body.push_str(&format!("{}</g>\n", indent));
    }

    fn text(&mut self, text: &TextBox, inner: &str, hw: f64, hh: f64, paint: &str) {
        let (anchor, x) = match text.text_align {
            TextAlign::Left | TextAlign::Justify => ("start", -hw),
            TextAlign::Center => ("middle", 0.0),
            TextAlign::Right => ("end", hw),
        };
        let mut decoration = Vec::new();
        if text.underline {
            decoration.push("underline");
        }
        if text.linethrough {
            decoration.push("line-through");
        }
        let mut el = format!(
            "{}<text font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" font-style=\"{}\" text-anchor=\"{}\"",
            inner,
            escape(&text.font_family),
            num(text.font_size),
            text.font_weight,
            text.font_style.as_str(),
            anchor
        );
        if !decoration.is_empty() {
            el.push_str(&format!(" text-decoration=\"{}\"", decoration.join(" ")));
        }
        el.push_str(paint);
        el.push('>');
        for (i, line) in text.lines().enumerate() {
            let baseline = -hh + text.font_size * (i as f64 * LINE_HEIGHT + 1.0);
            el.push_str(&format!(
                "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
                num(x),
                num(baseline),
                escape(line)
            ));
        }
        el.push_str("</text>\n");
        self.body.push_str(&el);
    }

    fn paint_attrs(&mut self, object: &SceneObject) -> String {
        let fill = match &object.fill {
            None => "none".to_string(),
            Some(Paint::Solid(color)) => escape(color),
            Some(Paint::Gradient(gradient)) => format!("url(#{})", self.gradient(gradient)),
        };
        let mut attrs = format!(" fill=\"{}\"", fill);
        match &object.stroke.color {
            Some(color) if object.stroke.width > 0.0 => {
                let stroke = &object.stroke;
                attrs.push_str(&format!(
                    " stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"{}\" stroke-linecap=\"{}\"",
                    escape(color),
                    num(stroke.width),
                    stroke.line_join.as_str(),
                    stroke.line_cap.as_str()
                ));
                if let Some(dash) = stroke.dash_array.as_ref().filter(|d| !d.is_empty()) {
                    let dash: Vec<String> = dash.iter().map(|d| num(*d)).collect();
                    attrs.push_str(&format!(" stroke-dasharray=\"{}\"", dash.join(" ")));
                }
            }
            _ => attrs.push_str(" stroke=\"none\""),
        }
        attrs
    }

    fn gradient(&mut self, gradient: &Gradient) -> String {
        self.gradients += 1;
        let id = format!("gradient-{}", self.gradients);
        let open = match gradient.kind {
            GradientKind::Linear { x1, y1, x2, y2 } => format!(
                "<linearGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
                id,
                num(x1),
                num(y1),
                num(x2),
                num(y2)
            ),
            GradientKind::Radial { x1, y1, r1, x2, y2, r2 } => format!(
                "<radialGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" fx=\"{}\" fy=\"{}\" fr=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\">",
                id,
                num(x1),
                num(y1),
                num(r1),
                num(x2),
                num(y2),
                num(r2)
            ),
        };
        self.defs.push_str(&open);
        for stop in &gradient.color_stops {
            self.defs.push_str(&format!(
                "<stop offset=\"{}%\" stop-color=\"{}\"/>",
                num(stop.offset * 100.0),
                escape(&stop.color)
            ));
        }
        self.defs.push_str(if gradient.is_linear() {
            "</linearGradient>\n"
        } else {
            "</radialGradient>\n"
        });
        id
    }
}

/// Number with at most three decimals and no trailing zeros.
fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
