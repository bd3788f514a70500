//! Single-flight debounce for container resizes.
//!
//! Resize requests arrive in bursts while the container is being dragged.
//! The scheduler keeps the last request until the burst has been quiet for
//! the debounce window, then hands out exactly one resize. While a resize is
//! running, new requests are parked and replayed after it finishes, so an
//! in-flight resize is never interrupted.

use std::time::{Duration, Instant};

use designkit_core::constants::RESIZE_DEBOUNCE_MS;

use crate::model::Size;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeState {
    Idle,
    Pending { size: Size, deadline: Instant },
    Running { queued: Option<Size> },
}

#[derive(Debug, Clone)]
pub struct ResizeScheduler {
    state: ResizeState,
    debounce: Duration,
    last_applied: Option<Size>,
}

impl ResizeScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: ResizeState::Idle,
            debounce,
            last_applied: None,
        }
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn last_applied(&self) -> Option<Size> {
        self.last_applied
    }

    /// Records a resize request; restarts the debounce window.
    pub fn request(&mut self, size: Size, now: Instant) {
        self.state = match self.state {
            ResizeState::Running { .. } => ResizeState::Running {
                queued: Some(size),
            },
            ResizeState::Idle | ResizeState::Pending { .. } => ResizeState::Pending {
                size,
                deadline: now + self.debounce,
            },
        };
    }

    /// Returns the size to apply once the debounce window has elapsed.
    ///
    /// A size equal to the last applied one is dropped. On `Some`, the caller
    /// must apply the resize and then call [`ResizeScheduler::finish`].
    pub fn poll(&mut self, now: Instant) -> Option<Size> {
        match self.state {
            ResizeState::Pending { size, deadline } if now >= deadline => {
                if self.last_applied == Some(size) {
                    self.state = ResizeState::Idle;
                    return None;
                }
                self.state = ResizeState::Running { queued: None };
                Some(size)
            }
            _ => None,
        }
    }

    /// Claims the slot for an immediate resize. Returns false when one is
    /// already running or the size was just applied.
    pub fn begin(&mut self, size: Size) -> bool {
        if matches!(self.state, ResizeState::Running { .. }) || self.last_applied == Some(size) {
            return false;
        }
        self.state = ResizeState::Running { queued: None };
        true
    }

    /// Marks the running resize as done. A request parked while it ran
    /// becomes pending again from `now`.
    pub fn finish(&mut self, applied: Size, now: Instant) {
        self.last_applied = Some(applied);
        self.state = match self.state {
            ResizeState::Running {
                queued: Some(size),
            } => ResizeState::Pending {
                size,
                deadline: now + self.debounce,
            },
            _ => ResizeState::Idle,
        };
    }

    /// Forgets the last applied size so the next identical request applies.
    pub fn invalidate(&mut self) {
        self.last_applied = None;
    }
}

impl Default for ResizeScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(RESIZE_DEBOUNCE_MS))
    }
}
