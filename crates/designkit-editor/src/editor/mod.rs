//! Editor session.
//!
//! [`Editor`] owns one surface together with its selection tracker, history,
//! style defaults, resize scheduler and event bus. Every mutator follows the
//! same path: mutate the surface, sync the selection, render, checkpoint,
//! publish.
//!
//! The session is split into submodules:
//! - `objects`: factory inserts, delete, z-order, grouping, alignment
//! - `styles`: paint, typography and gradient getters and setters
//! - `file_io`: document and vector export, document load, download

mod file_io;
mod objects;
mod styles;

use std::time::{Duration, Instant};

use designkit_core::constants::{IMPORT_MAX_DIMENSION, RESIZE_DEBOUNCE_MS};
use designkit_core::{
    thread_safe, AppEvent, Callback, EventBus, HistoryEvent, ObjectId, SurfaceError,
    SurfaceEvent, ThreadSafe,
};

use crate::handle::DrawingHandle;
use crate::history::History;
use crate::model::{SceneObject, Size};
use crate::scheduler::ResizeScheduler;
use crate::selection::SelectionTracker;
use crate::style::StyleDefaults;
use crate::surface::{Surface, SurfaceSettings};

/// Session-level settings, usually filled from the settings file.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub surface: SurfaceSettings,
    pub resize_debounce: Duration,
    pub history_limit: Option<usize>,
    pub import_max_dimension: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceSettings::default(),
            resize_debounce: Duration::from_millis(RESIZE_DEBOUNCE_MS),
            history_limit: None,
            import_max_dimension: IMPORT_MAX_DIMENSION,
        }
    }
}

pub struct Editor {
    surface: Surface,
    selection: SelectionTracker,
    history: History,
    defaults: StyleDefaults,
    bus: EventBus,
    resize: ResizeScheduler,
    config: EditorConfig,
    project_id: Option<String>,
    processing_image: bool,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("surface", &self.surface)
            .field("selection", &self.selection)
            .field("history_len", &self.history.len())
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl Editor {
    /// Mounts a surface on `handle`, fits the viewport to `container` and
    /// seeds the history with the initial snapshot.
    pub fn new(
        handle: Box<dyn DrawingHandle>,
        container: Size,
        config: EditorConfig,
        bus: EventBus,
    ) -> Result<Self, SurfaceError> {
        let surface = Surface::initialize(handle, container, config.surface)?;
        let mut editor = Self {
            surface,
            selection: SelectionTracker::new(bus.clone()),
            history: History::with_limit(config.history_limit),
            defaults: StyleDefaults::default(),
            bus,
            resize: ResizeScheduler::new(config.resize_debounce),
            config,
            project_id: None,
            processing_image: false,
        };

        if editor.resize.begin(container) {
            editor.surface.resize(container);
            editor.resize.finish(container, Instant::now());
        }
        editor.history.initialize(editor.surface.snapshot()?);

        editor.publish(AppEvent::Surface(SurfaceEvent::Initialized {
            width: container.width,
            height: container.height,
        }));
        Ok(editor)
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn set_project_id(&mut self, project_id: Option<String>) {
        self.project_id = project_id;
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn defaults(&self) -> &StyleDefaults {
        &self.defaults
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_disposed(&self) -> bool {
        self.surface.is_disposed()
    }

    /// Callback run whenever the selection is cleared.
    pub fn on_selection_cleared(&mut self, callback: Option<Callback>) {
        self.selection.set_on_cleared(callback);
    }

    fn publish(&self, event: AppEvent) {
        self.bus.publish(event).ok();
    }

    fn sync_selection(&mut self) {
        self.selection.sync(&mut self.surface);
    }

    /// Captures the surface and appends it to the history.
    pub fn checkpoint(&mut self) {
        if self.surface.is_disposed() {
            return;
        }
        match self.surface.snapshot() {
            Ok(snapshot) => {
                let len = self.history.checkpoint(snapshot);
                let cursor = self.history.cursor().unwrap_or(0);
                tracing::debug!("Checkpoint {} of {}", cursor + 1, len);
                self.publish(AppEvent::History(HistoryEvent::Checkpoint { len, cursor }));
            }
            Err(e) => tracing::error!("Failed to capture snapshot: {}", e),
        }
    }

    /// Syncs the selection, renders and checkpoints.
    fn commit(&mut self) {
        self.sync_selection();
        self.surface.render();
        self.checkpoint();
    }

    pub fn can_undo(&self) -> bool {
        !self.is_disposed() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_disposed() && self.history.can_redo()
    }

    /// Restores the previous snapshot. Restoring never checkpoints.
    pub fn undo(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        let Some(snapshot) = self.history.undo().map(str::to_string) else {
            return false;
        };
        self.restore(&snapshot, |cursor| HistoryEvent::Undo { cursor })
    }

    pub fn redo(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        let Some(snapshot) = self.history.redo().map(str::to_string) else {
            return false;
        };
        self.restore(&snapshot, |cursor| HistoryEvent::Redo { cursor })
    }

    fn restore(&mut self, snapshot: &str, event: impl FnOnce(usize) -> HistoryEvent) -> bool {
        if let Err(e) = self.surface.restore(snapshot) {
            tracing::error!("Failed to restore snapshot: {}", e);
            return false;
        }
        self.sync_selection();
        let cursor = self.history.cursor().unwrap_or(0);
        self.publish(AppEvent::History(event(cursor)));
        true
    }

    /// Queues a container resize; bursts collapse into one.
    pub fn request_resize(&mut self, size: Size, now: Instant) {
        if self.is_disposed() {
            return;
        }
        self.resize.request(size, now);
    }

    /// Applies a queued resize once its debounce window has passed.
    pub fn poll_resize(&mut self, now: Instant) -> Option<f64> {
        let size = self.resize.poll(now)?;
        let zoom = self.apply_resize(size);
        self.resize.finish(size, now);
        zoom
    }

    /// Resizes immediately unless a resize is already running or `size` is
    /// the size last applied.
    pub fn resize(&mut self, size: Size) -> Option<f64> {
        if self.is_disposed() || !self.resize.begin(size) {
            return None;
        }
        let zoom = self.apply_resize(size);
        self.resize.finish(size, Instant::now());
        zoom
    }

    fn apply_resize(&mut self, size: Size) -> Option<f64> {
        let zoom = self.surface.resize(size)?;
        self.publish(AppEvent::Surface(SurfaceEvent::Resized {
            width: size.width,
            height: size.height,
            zoom,
        }));
        Some(zoom)
    }

    pub fn zoom_in(&mut self) {
        self.surface.zoom_in();
        self.resize.invalidate();
    }

    pub fn zoom_out(&mut self) {
        self.surface.zoom_out();
        self.resize.invalidate();
    }

    /// Releases the drawing handle. Later calls are no-ops.
    pub fn dispose(&mut self) {
        if self.surface.dispose() {
            self.selection.reset();
            self.processing_image = false;
            self.publish(AppEvent::Surface(SurfaceEvent::Disposed));
        }
    }

    pub fn is_processing_image(&self) -> bool {
        self.processing_image
    }

    /// Claims the single image-processing slot. Returns false when it is
    /// taken or the editor is disposed.
    pub fn try_begin_image_processing(&mut self) -> bool {
        if self.processing_image || self.is_disposed() {
            return false;
        }
        self.processing_image = true;
        true
    }

    pub fn finish_image_processing(&mut self) {
        self.processing_image = false;
    }

    pub fn select(&mut self, id: ObjectId) {
        self.select_many(&[id]);
    }

    pub fn select_many(&mut self, ids: &[ObjectId]) {
        if self.is_disposed() {
            return;
        }
        self.surface.set_active_objects(ids);
        self.sync_selection();
        self.surface.render();
    }

    /// Selects every selectable object.
    pub fn select_all(&mut self) {
        let ids: Vec<ObjectId> = self
            .surface
            .content()
            .filter(|o| o.flags.selectable)
            .map(|o| o.id)
            .collect();
        self.select_many(&ids);
    }

    pub fn clear_selection(&mut self) {
        self.select_many(&[]);
    }

    pub fn is_object_selected(&self, id: ObjectId) -> bool {
        self.selection.contains(id)
    }

    pub fn active_objects(&self) -> Vec<&SceneObject> {
        self.selection.selected_objects(&self.surface)
    }
}

/// UI mount point. Holds an [`Editor`] only after a successful mount, so
/// callers handed one never deal with a half-built session.
#[derive(Debug, Default, Clone)]
pub struct EditorMount {
    editor: Option<ThreadSafe<Editor>>,
}

impl EditorMount {
    /// Tries to build an editor. A failure is logged and leaves the mount
    /// empty; every later call through it is then a no-op.
    pub fn mount(
        handle: Box<dyn DrawingHandle>,
        container: Size,
        config: EditorConfig,
        bus: EventBus,
    ) -> Self {
        match Editor::new(handle, container, config, bus) {
            Ok(editor) => Self {
                editor: Some(thread_safe(editor)),
            },
            Err(e) => {
                tracing::error!("Editor initialization failed: {}", e);
                Self { editor: None }
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.editor.is_some()
    }

    pub fn editor(&self) -> Option<ThreadSafe<Editor>> {
        self.editor.clone()
    }

    /// Disposes the editor and empties the mount.
    pub fn unmount(&mut self) {
        if let Some(editor) = self.editor.take() {
            editor.lock().dispose();
        }
    }
}
