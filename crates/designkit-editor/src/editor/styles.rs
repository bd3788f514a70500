//! Style getters and setters for the editor session.
//!
//! Getters read the first selected object and fall back to the session's
//! [`StyleDefaults`](crate::style::StyleDefaults). Setters apply to every
//! selected object, update the default, render and checkpoint, even when
//! nothing is selected.

use designkit_core::StyleError;

use super::Editor;
use crate::gradient::Gradient;
use crate::model::{FontStyle, LineCap, LineJoin, Paint, SceneObject, TextAlign, TextBox};
use crate::style::{self, GradientRequest, TextStyle};

impl Editor {
    fn first_selected(&self) -> Option<&SceneObject> {
        self.selection.first(&self.surface)
    }

    fn first_text(&self) -> Option<&TextBox> {
        self.first_selected().and_then(SceneObject::text)
    }

    /// Runs `apply` on every selected object, then renders and checkpoints.
    /// Returns how many objects were visited.
    fn apply_to_selection(&mut self, mut apply: impl FnMut(&mut SceneObject)) -> usize {
        if self.is_disposed() {
            return 0;
        }
        let ids = self.selection.selected_ids().to_vec();
        let mut count = 0;
        for id in ids {
            if let Some(object) = self.surface.object_mut(id) {
                apply(object);
                count += 1;
            }
        }
        self.surface.render();
        self.checkpoint();
        count
    }

    pub fn fill_color(&self) -> String {
        self.first_selected()
            .and_then(|o| o.fill.as_ref())
            .and_then(Paint::representative_color)
            .map(str::to_string)
            .unwrap_or_else(|| self.defaults.fill_color.clone())
    }

    /// Gradient fill of the first selected object, if any.
    pub fn fill_gradient(&self) -> Option<&Gradient> {
        self.first_selected()
            .and_then(|o| o.fill.as_ref())
            .and_then(Paint::as_gradient)
    }

    pub fn gradient_angle(&self) -> Option<f64> {
        self.first_selected().and_then(|o| o.gradient_angle)
    }

    pub fn stroke_color(&self) -> String {
        self.first_selected()
            .and_then(|o| o.stroke.color.clone())
            .unwrap_or_else(|| self.defaults.stroke_color.clone())
    }

    pub fn stroke_width(&self) -> f64 {
        self.first_selected()
            .map(|o| o.stroke.width)
            .unwrap_or(self.defaults.stroke_width)
    }

    pub fn stroke_dash_array(&self) -> Vec<f64> {
        self.first_selected()
            .and_then(|o| o.stroke.dash_array.clone())
            .unwrap_or_else(|| self.defaults.stroke_dash_array.clone())
    }

    pub fn line_join(&self) -> LineJoin {
        self.first_selected()
            .map(|o| o.stroke.line_join)
            .unwrap_or_default()
    }

    pub fn line_cap(&self) -> LineCap {
        self.first_selected()
            .map(|o| o.stroke.line_cap)
            .unwrap_or_default()
    }

    pub fn opacity(&self) -> f64 {
        self.first_selected()
            .map(|o| o.opacity)
            .unwrap_or(self.defaults.opacity)
    }

    pub fn font_family(&self) -> String {
        self.first_text()
            .map(|t| t.font_family.clone())
            .unwrap_or_else(|| self.defaults.font_family.clone())
    }

    pub fn font_size(&self) -> f64 {
        self.first_text()
            .map(|t| t.font_size)
            .unwrap_or(self.defaults.font_size)
    }

    pub fn font_weight(&self) -> u16 {
        self.first_text()
            .map(|t| t.font_weight)
            .unwrap_or(self.defaults.font_weight)
    }

    pub fn font_style(&self) -> FontStyle {
        self.first_text().map(|t| t.font_style).unwrap_or_default()
    }

    pub fn font_underline(&self) -> bool {
        self.first_text().is_some_and(|t| t.underline)
    }

    pub fn font_linethrough(&self) -> bool {
        self.first_text().is_some_and(|t| t.linethrough)
    }

    pub fn text_align(&self) -> TextAlign {
        self.first_text().map(|t| t.text_align).unwrap_or_default()
    }

    pub fn set_fill_color(&mut self, color: &str) -> Result<usize, StyleError> {
        style::validate_color(color)?;
        self.defaults.fill_color = color.to_string();
        let paint = Paint::solid(color);
        Ok(self.apply_to_selection(|o| style::apply_fill(o, &paint)))
    }

    /// Stroke colour; text objects take it as their fill.
    pub fn set_stroke_color(&mut self, color: &str) -> Result<usize, StyleError> {
        style::validate_color(color)?;
        self.defaults.stroke_color = color.to_string();
        Ok(self.apply_to_selection(|o| style::apply_stroke_color(o, color)))
    }

    pub fn set_stroke_width(&mut self, width: f64) -> usize {
        self.defaults.stroke_width = width.max(0.0);
        self.apply_to_selection(|o| style::apply_stroke_width(o, width))
    }

    pub fn set_stroke_dash_array(&mut self, dash: &[f64]) -> usize {
        self.defaults.stroke_dash_array = dash.to_vec();
        self.apply_to_selection(|o| style::apply_stroke_dash_array(o, dash))
    }

    pub fn set_line_join(&mut self, join: LineJoin) -> usize {
        self.apply_to_selection(|o| style::apply_line_join(o, join))
    }

    pub fn set_line_cap(&mut self, cap: LineCap) -> usize {
        self.apply_to_selection(|o| style::apply_line_cap(o, cap))
    }

    pub fn set_opacity(&mut self, opacity: f64) -> usize {
        self.apply_to_selection(|o| style::apply_opacity(o, opacity))
    }

    fn set_text_style(&mut self, text_style: TextStyle) -> usize {
        let mut applied = 0;
        self.apply_to_selection(|o| {
            if style::apply_text_style(o, &text_style) {
                applied += 1;
            }
        });
        applied
    }

    pub fn set_font_family(&mut self, family: &str) -> usize {
        self.defaults.font_family = family.to_string();
        self.set_text_style(TextStyle::FontFamily(family.to_string()))
    }

    pub fn set_font_size(&mut self, size: f64) -> usize {
        self.defaults.font_size = size.max(1.0);
        self.set_text_style(TextStyle::FontSize(size))
    }

    pub fn set_font_weight(&mut self, weight: u16) -> usize {
        self.defaults.font_weight = weight;
        self.set_text_style(TextStyle::FontWeight(weight))
    }

    /// Flips between normal and bold based on the first selected text.
    pub fn toggle_bold(&mut self) -> usize {
        self.set_font_weight(style::toggled_weight(self.font_weight()))
    }

    pub fn set_font_style(&mut self, font_style: FontStyle) -> usize {
        self.set_text_style(TextStyle::FontStyle(font_style))
    }

    pub fn toggle_italic(&mut self) -> usize {
        self.set_font_style(self.font_style().toggled())
    }

    pub fn set_font_underline(&mut self, on: bool) -> usize {
        self.set_text_style(TextStyle::Underline(on))
    }

    pub fn set_font_linethrough(&mut self, on: bool) -> usize {
        self.set_text_style(TextStyle::Linethrough(on))
    }

    pub fn set_text_align(&mut self, align: TextAlign) -> usize {
        self.set_text_style(TextStyle::Align(align))
    }

    /// Fills every selected object with a gradient sized to that object.
    /// Nothing changes when the gradient is invalid for any of them.
    pub fn apply_gradient(&mut self, request: &GradientRequest) -> Result<usize, StyleError> {
        for object in self.selection.selected_objects(&self.surface) {
            request.build_for(object)?;
        }
        let mut result = Ok(());
        let count = self.apply_to_selection(|o| {
            if let Err(e) = style::apply_gradient(o, request) {
                result = Err(e);
            }
        });
        result.map(|_| count)
    }
}
