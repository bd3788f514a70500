//! Viewport and coordinate transformation for the drawing surface.
//!
//! Maps world coordinates (design space, where objects live) to screen
//! coordinates (container pixels). Both spaces have +Y pointing down.
//!
//! ```text
//! screen = world * zoom + pan
//! world  = (screen - pan) / zoom
//! ```

use std::fmt;

use designkit_core::constants::{MAX_ZOOM, MIN_ZOOM};

use crate::model::{Bounds, Point};

const ZOOM_STEP: f64 = 1.2;

/// Zoom and pan of the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level; values outside the zoom bounds are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> Point {
        Point::new(
            (screen_x - self.pan_x) / self.zoom,
            (screen_y - self.pan_y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        (
            world_x * self.zoom + self.pan_x,
            world_y * self.zoom + self.pan_y,
        )
    }

    /// World point under the container centre.
    pub fn center_world(&self) -> Point {
        self.screen_to_world(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Pans so `world` sits under the container centre at the current zoom.
    pub fn center_on(&mut self, world: Point) {
        self.pan_x = self.canvas_width / 2.0 - world.x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - world.y * self.zoom;
    }

    /// Zooms so `bounds` fills `ratio` of the container along its tighter
    /// axis, then centres on it. Returns the new zoom, or `None` when either
    /// the container or the bounds are degenerate.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, ratio: f64) -> Option<f64> {
        if bounds.width <= 0.0
            || bounds.height <= 0.0
            || self.canvas_width <= 0.0
            || self.canvas_height <= 0.0
        {
            return None;
        }
        let scale = (self.canvas_width / bounds.width).min(self.canvas_height / bounds.height);
        self.zoom = (ratio * scale).clamp(MIN_ZOOM, MAX_ZOOM);
        self.center_on(bounds.center());
        Some(self.zoom)
    }

    /// Zooms to `new_zoom` keeping `world_point` fixed on screen.
    pub fn zoom_to_point(&mut self, world_point: Point, new_zoom: f64) {
        if new_zoom <= MIN_ZOOM || new_zoom >= MAX_ZOOM {
            return;
        }
        let (sx, sy) = self.world_to_screen(world_point.x, world_point.y);
        self.zoom = new_zoom;
        self.pan_x = sx - world_point.x * new_zoom;
        self.pan_y = sy - world_point.y * new_zoom;
    }

    /// Zooms in around the container centre.
    pub fn zoom_in(&mut self) {
        let center = self.center_world();
        self.zoom_to_point(center, self.zoom * ZOOM_STEP);
    }

    /// Zooms out around the container centre.
    pub fn zoom_out(&mut self) {
        let center = self.center_world();
        self.zoom_to_point(center, self.zoom / ZOOM_STEP);
    }

    /// Affine matrix `[a, b, c, d, e, f]` handed to the drawing backend.
    pub fn transform(&self) -> [f64; 6] {
        [self.zoom, 0.0, 0.0, self.zoom, self.pan_x, self.pan_y]
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
