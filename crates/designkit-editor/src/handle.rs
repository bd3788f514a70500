//! Drawing backend seam.
//!
//! The surface never rasterizes anything itself. It drives a
//! [`DrawingHandle`], which a host implements on top of its real 2D canvas.
//! [`HeadlessCanvas`] records what it was asked to do and is used when no
//! display is attached (tests, batch export).

use std::sync::Arc;

use parking_lot::Mutex;

/// Backend operations the surface needs from a real canvas.
pub trait DrawingHandle: Send {
    /// Whether the underlying canvas element still exists.
    fn is_valid(&self) -> bool;
    fn set_dimensions(&mut self, width: f64, height: f64);
    fn set_viewport_transform(&mut self, transform: [f64; 6]);
    fn request_render(&mut self);
    /// Frees backend resources. Called at most once by the surface.
    fn release(&mut self);
}

/// Observable state of a [`HeadlessCanvas`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessState {
    pub width: f64,
    pub height: f64,
    pub transform: [f64; 6],
    pub render_count: usize,
    pub released: bool,
}

#[derive(Debug, Clone)]
pub struct HeadlessCanvas {
    valid: bool,
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessCanvas {
    pub fn new() -> Self {
        Self {
            valid: true,
            state: Arc::new(Mutex::new(HeadlessState {
                transform: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
                ..Default::default()
            })),
        }
    }

    /// A handle whose canvas element is gone; initialization must reject it.
    pub fn detached() -> Self {
        Self {
            valid: false,
            ..Self::new()
        }
    }

    /// Snapshot of what the backend has been told so far. Clones of a
    /// handle share state, so a clone kept by the caller sees later calls.
    pub fn state(&self) -> HeadlessState {
        self.state.lock().clone()
    }
}

impl Default for HeadlessCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingHandle for HeadlessCanvas {
    fn is_valid(&self) -> bool {
        self.valid && !self.state.lock().released
    }

    fn set_dimensions(&mut self, width: f64, height: f64) {
        let mut state = self.state.lock();
        state.width = width;
        state.height = height;
    }

    fn set_viewport_transform(&mut self, transform: [f64; 6]) {
        self.state.lock().transform = transform;
    }

    fn request_render(&mut self) {
        self.state.lock().render_count += 1;
    }

    fn release(&mut self) {
        self.state.lock().released = true;
    }
}
