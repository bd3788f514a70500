//! Selection tracking.
//!
//! Mirrors the surface's active objects into a list the UI reads, and
//! publishes a [`SelectionEvent`] for every selection signal. On a clear it
//! also runs the optional `on_cleared` callback, which the UI uses to drop
//! back to its select tool.

use designkit_core::{AppEvent, Callback, EventBus, ObjectId, SelectionEvent};

use crate::model::SceneObject;
use crate::surface::{SelectionSignal, Surface};

pub struct SelectionTracker {
    selected: Vec<ObjectId>,
    on_cleared: Option<Callback>,
    bus: EventBus,
}

impl std::fmt::Debug for SelectionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("selected", &self.selected)
            .field("has_on_cleared", &self.on_cleared.is_some())
            .finish()
    }
}

impl SelectionTracker {
    pub fn new(bus: EventBus) -> Self {
        Self {
            selected: Vec::new(),
            on_cleared: None,
            bus,
        }
    }

    pub fn set_on_cleared(&mut self, callback: Option<Callback>) {
        self.on_cleared = callback;
    }

    /// Recomputes the list from the surface's live active objects.
    pub fn handle(&mut self, signal: SelectionSignal, surface: &Surface) {
        match signal {
            SelectionSignal::Created | SelectionSignal::Updated => {
                self.selected = surface.active_objects().iter().map(|o| o.id).collect();
                tracing::debug!("Selection {:?}: {} object(s)", signal, self.selected.len());
                self.bus
                    .publish(AppEvent::Selection(SelectionEvent::Changed {
                        selected: self.selected.clone(),
                    }))
                    .ok();
            }
            SelectionSignal::Cleared => {
                self.selected.clear();
                tracing::debug!("Selection cleared");
                self.bus
                    .publish(AppEvent::Selection(SelectionEvent::Cleared))
                    .ok();
                if let Some(callback) = &self.on_cleared {
                    callback();
                }
            }
        }
    }

    /// Drains and handles every signal the surface recorded.
    pub fn sync(&mut self, surface: &mut Surface) {
        for signal in surface.take_signals() {
            self.handle(signal, surface);
        }
    }

    pub fn selected_ids(&self) -> &[ObjectId] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected objects as they currently exist on `surface`.
    pub fn selected_objects<'a>(&self, surface: &'a Surface) -> Vec<&'a SceneObject> {
        self.selected
            .iter()
            .filter_map(|id| surface.object(*id))
            .collect()
    }

    /// First selected object, the one getters read from.
    pub fn first<'a>(&self, surface: &'a Surface) -> Option<&'a SceneObject> {
        self.selected.iter().find_map(|id| surface.object(*id))
    }

    /// Forgets the selection without publishing, used on dispose.
    pub fn reset(&mut self) {
        self.selected.clear();
    }
}
