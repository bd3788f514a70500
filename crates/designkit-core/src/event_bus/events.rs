//! Event type definitions for the event bus.
//!
//! Events are grouped by the editor component that raises them. They are
//! cloneable and serializable so a UI shell can log or replay them.

use serde::{Deserialize, Serialize};

use crate::types::ObjectId;

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Selection tracker events
    Selection(SelectionEvent),
    /// History manager events
    History(HistoryEvent),
    /// Scene surface lifecycle and mutation events
    Surface(SurfaceEvent),
    /// User-facing notifications (toasts)
    Notification(NotificationEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Selection(_) => EventCategory::Selection,
            AppEvent::History(_) => EventCategory::History,
            AppEvent::Surface(_) => EventCategory::Surface,
            AppEvent::Notification(_) => EventCategory::Notification,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Selection(e) => e.description(),
            AppEvent::History(e) => e.description(),
            AppEvent::Surface(e) => e.description(),
            AppEvent::Notification(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Selection changes.
    Selection,
    /// History checkpoints and restores.
    History,
    /// Surface lifecycle and object mutations.
    Surface,
    /// User-facing notifications.
    Notification,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Surface => write!(f, "Surface"),
            EventCategory::Notification => write!(f, "Notification"),
        }
    }
}

/// Selection tracker events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// The selection was created or updated.
    Changed {
        /// Ids of the currently selected objects, in surface order.
        selected: Vec<ObjectId>,
    },
    /// The selection was cleared.
    Cleared,
}

impl SelectionEvent {
    fn description(&self) -> String {
        match self {
            SelectionEvent::Changed { selected } => {
                format!("Selection changed: {} object(s)", selected.len())
            }
            SelectionEvent::Cleared => "Selection cleared".to_string(),
        }
    }
}

/// History manager events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// A snapshot was appended.
    Checkpoint {
        /// Number of snapshots after the append.
        len: usize,
        /// Cursor position after the append.
        cursor: usize,
    },
    /// The surface was restored to an earlier snapshot.
    Undo {
        /// Cursor position after the move.
        cursor: usize,
    },
    /// The surface was restored to a later snapshot.
    Redo {
        /// Cursor position after the move.
        cursor: usize,
    },
}

impl HistoryEvent {
    fn description(&self) -> String {
        match self {
            HistoryEvent::Checkpoint { len, cursor } => {
                format!("Checkpoint {} of {}", cursor + 1, len)
            }
            HistoryEvent::Undo { cursor } => format!("Undo to snapshot {}", cursor),
            HistoryEvent::Redo { cursor } => format!("Redo to snapshot {}", cursor),
        }
    }
}

/// Scene surface events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// The surface and workspace were created.
    Initialized {
        /// Container width in pixels.
        width: f64,
        /// Container height in pixels.
        height: f64,
    },
    /// The viewport was refit to a new container size.
    Resized {
        /// Container width in pixels.
        width: f64,
        /// Container height in pixels.
        height: f64,
        /// Resulting fit zoom.
        zoom: f64,
    },
    /// An object was inserted.
    ObjectAdded {
        /// Id of the inserted object.
        id: ObjectId,
    },
    /// An object was removed.
    ObjectRemoved {
        /// Id of the removed object.
        id: ObjectId,
    },
    /// An object moved one step in z-order.
    Reordered {
        /// Id of the moved object.
        id: ObjectId,
        /// New index in the z-order.
        index: usize,
    },
    /// The drawing handle was released.
    Disposed,
}

impl SurfaceEvent {
    fn description(&self) -> String {
        match self {
            SurfaceEvent::Initialized { width, height } => {
                format!("Surface initialized at {}x{}", width, height)
            }
            SurfaceEvent::Resized {
                width,
                height,
                zoom,
            } => format!("Surface resized to {}x{} (zoom {:.3})", width, height, zoom),
            SurfaceEvent::ObjectAdded { id } => format!("Object added: {}", id),
            SurfaceEvent::ObjectRemoved { id } => format!("Object removed: {}", id),
            SurfaceEvent::Reordered { id, index } => {
                format!("Object {} moved to index {}", id, index)
            }
            SurfaceEvent::Disposed => "Surface disposed".to_string(),
        }
    }
}

/// Notification levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Operation completed.
    Success,
    /// Informational message.
    Info,
    /// Operation failed; the user should be told.
    Error,
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Severity of the notification.
    pub level: NotificationLevel,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl NotificationEvent {
    /// Build a success notification
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Build an error notification
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    fn description(&self) -> String {
        format!("{:?} [{}]: {}", self.level, self.title, self.message)
    }
}
