//! # Event Bus Module
//!
//! Publish/subscribe channel between the editor core and its UI shell.
//!
//! Each editor session owns one bus; there is no process-wide instance.
//! Publishers emit typed events without knowing subscribers, and subscribers
//! filter by category.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use designkit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let AppEvent::Selection(sel) = event {
//!             println!("Selection event: {:?}", sel);
//!         }
//!     },
//! );
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
