//! # DesignKit Core
//!
//! Core types, errors and utilities shared by the DesignKit crates.
//! Provides the error taxonomy, the per-session event bus, editor-wide
//! constants and the shared-ownership type aliases.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{Error, ExportError, ImportError, Result, StyleError, SurfaceError};

pub use event_bus::{
    AppEvent, EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter,
    HistoryEvent, NotificationEvent, NotificationLevel, SelectionEvent, SubscriptionId,
    SurfaceEvent,
};

pub use types::{thread_safe, Callback, DataCallback, ObjectId, ThreadSafe};
