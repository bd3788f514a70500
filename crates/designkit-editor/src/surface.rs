//! Scene surface: the ordered object list, the workspace rectangle, the
//! viewport and the clip region, bound to a [`DrawingHandle`].
//!
//! Every creation path funnels through [`Surface::add_object`]. The surface
//! performs raw mutations and records selection signals; checkpointing and
//! event publication are the editor session's job.
//!
//! Once disposed, every mutator is a no-op and every query that needs the
//! backend returns `None`.

use designkit_core::constants::{
    DEFAULT_WORKSPACE_HEIGHT, DEFAULT_WORKSPACE_WIDTH, FIT_RATIO, WORKSPACE_FILL,
    WORKSPACE_NAME, WORKSPACE_SHADOW_BLUR, WORKSPACE_SHADOW_COLOR,
};
use designkit_core::{ObjectId, SurfaceError};

use crate::handle::DrawingHandle;
use crate::model::{Bounds, ObjectFlags, ObjectKind, Point, SceneObject, Shadow, Size};
use crate::viewport::Viewport;

/// Workspace geometry and fit behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSettings {
    pub workspace_width: f64,
    pub workspace_height: f64,
    pub fit_ratio: f64,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            workspace_width: DEFAULT_WORKSPACE_WIDTH,
            workspace_height: DEFAULT_WORKSPACE_HEIGHT,
            fit_ratio: FIT_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    Forward,
    Backward,
}

/// What happened to the active selection, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSignal {
    Created,
    Updated,
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

pub struct Surface {
    handle: Option<Box<dyn DrawingHandle>>,
    objects: Vec<SceneObject>,
    viewport: Viewport,
    clip: Option<Bounds>,
    active: Vec<ObjectId>,
    signals: Vec<SelectionSignal>,
    settings: SurfaceSettings,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("objects", &self.objects.len())
            .field("viewport", &self.viewport)
            .field("active", &self.active)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

fn workspace_object(settings: &SurfaceSettings) -> SceneObject {
    let mut workspace = SceneObject::new(ObjectKind::Rect {
        width: settings.workspace_width,
        height: settings.workspace_height,
        rx: 0.0,
        ry: 0.0,
    })
    .with_fill(WORKSPACE_FILL);
    workspace.stroke.width = 0.0;
    workspace.shadow = Some(Shadow::new(WORKSPACE_SHADOW_COLOR, WORKSPACE_SHADOW_BLUR));
    workspace.flags = ObjectFlags::locked();
    workspace.name = Some(WORKSPACE_NAME.to_string());
    workspace
}

impl Surface {
    /// Builds the surface on `handle`, sized to `container`, and inserts the
    /// workspace centred in the container.
    pub fn initialize(
        mut handle: Box<dyn DrawingHandle>,
        container: Size,
        settings: SurfaceSettings,
    ) -> Result<Self, SurfaceError> {
        if !handle.is_valid() {
            return Err(SurfaceError::InvalidHandle {
                reason: "canvas element is not attached".to_string(),
            });
        }
        if container.width <= 0.0 || container.height <= 0.0 {
            return Err(SurfaceError::InvalidHandle {
                reason: format!(
                    "container has no area ({}x{})",
                    container.width, container.height
                ),
            });
        }
        if settings.workspace_width <= 0.0 || settings.workspace_height <= 0.0 {
            return Err(SurfaceError::InvalidHandle {
                reason: "workspace must have a positive size".to_string(),
            });
        }

        handle.set_dimensions(container.width, container.height);

        let viewport = Viewport::new(container.width, container.height);
        handle.set_viewport_transform(viewport.transform());

        let mut workspace = workspace_object(&settings);
        workspace.set_center(Point::new(container.width / 2.0, container.height / 2.0));

        let mut surface = Self {
            handle: Some(handle),
            objects: vec![workspace],
            viewport,
            clip: None,
            active: Vec::new(),
            signals: Vec::new(),
            settings,
        };
        surface.refresh_clip();
        surface.render();
        tracing::info!(
            "Surface initialized at {}x{} with {}x{} workspace",
            container.width,
            container.height,
            settings.workspace_width,
            settings.workspace_height
        );
        Ok(surface)
    }

    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| !h.is_valid())
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Objects other than the workspace, bottom to top.
    pub fn content(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| !o.is_workspace())
    }

    pub fn workspace(&self) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.is_workspace())
    }

    pub fn workspace_bounds(&self) -> Option<Bounds> {
        self.workspace().map(SceneObject::bounding_rect)
    }

    pub fn workspace_center(&self) -> Option<Point> {
        self.workspace().map(SceneObject::center)
    }

    pub fn z_index(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// World point at the centre of the visible container.
    pub fn viewport_center_world(&self) -> Point {
        self.viewport.center_world()
    }

    /// Current clip region; tracks the workspace geometry.
    pub fn clip_path(&self) -> Option<Bounds> {
        self.clip
    }

    pub fn screen_to_world(&self, x: f64, y: f64) -> Point {
        self.viewport.screen_to_world(x, y)
    }

    pub fn world_to_screen(&self, p: Point) -> (f64, f64) {
        self.viewport.world_to_screen(p.x, p.y)
    }

    /// Asks the backend to repaint. No-op once disposed.
    pub fn render(&mut self) {
        if let Some(handle) = self.handle.as_mut().filter(|h| h.is_valid()) {
            handle.request_render();
        }
    }

    fn sync_viewport(&mut self) {
        let transform = self.viewport.transform();
        if let Some(handle) = self.handle.as_mut().filter(|h| h.is_valid()) {
            handle.set_viewport_transform(transform);
        }
    }

    pub fn refresh_clip(&mut self) {
        self.clip = self.workspace_bounds();
    }

    /// Centres `object` on the workspace, appends it on top and makes it the
    /// sole active object.
    pub fn add_object(&mut self, mut object: SceneObject) -> Option<ObjectId> {
        if self.is_disposed() {
            tracing::debug!("add_object ignored: surface disposed");
            return None;
        }
        let center = self
            .workspace_center()
            .unwrap_or_else(|| self.viewport_center_world());
        object.set_center(center);
        Some(self.append(object))
    }

    /// Appends `object` on top as-is and makes it the sole active object.
    pub fn append(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        tracing::debug!("Adding {} {}", object.type_name(), id);
        self.objects.push(object);
        self.set_active_objects(&[id]);
        self.render();
        id
    }

    /// Removes a non-workspace object and drops it from the selection.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        if self.is_disposed() {
            return None;
        }
        let index = self
            .objects
            .iter()
            .position(|o| o.id == id && !o.is_workspace())?;
        let removed = self.objects.remove(index);
        if self.active.contains(&id) {
            let remaining: Vec<ObjectId> =
                self.active.iter().copied().filter(|a| *a != id).collect();
            self.set_active_objects(&remaining);
        }
        self.render();
        tracing::debug!("Removed {} {}", removed.type_name(), id);
        Some(removed)
    }

    pub fn remove_active_selection(&mut self) -> Vec<SceneObject> {
        let ids = self.active.clone();
        ids.into_iter()
            .filter_map(|id| self.remove_object(id))
            .collect()
    }

    /// Moves `id` one step among its siblings; the workspace is then pinned
    /// back to index 0. Returns the new index when the object moved.
    pub fn reorder(&mut self, id: ObjectId, direction: ReorderDirection) -> Option<usize> {
        if self.is_disposed() {
            return None;
        }
        let index = self.z_index(id)?;
        if self.objects[index].is_workspace() {
            return None;
        }
        let target = match direction {
            ReorderDirection::Forward if index + 1 < self.objects.len() => index + 1,
            ReorderDirection::Backward if index > 0 => index - 1,
            _ => return None,
        };
        self.objects.swap(index, target);
        self.pin_workspace();
        self.render();
        self.z_index(id).filter(|new| *new != index)
    }

    fn pin_workspace(&mut self) {
        if let Some(pos) = self.objects.iter().position(|o| o.is_workspace()) {
            if pos != 0 {
                let workspace = self.objects.remove(pos);
                self.objects.insert(0, workspace);
            }
        }
    }

    /// Refits the viewport to a container of `size`. Returns the fit zoom.
    pub fn resize(&mut self, size: Size) -> Option<f64> {
        if self.is_disposed() {
            return None;
        }
        if let Some(handle) = self.handle.as_mut() {
            handle.set_dimensions(size.width, size.height);
        }
        self.viewport.set_canvas_size(size.width, size.height);
        let bounds = self.workspace_bounds()?;
        let zoom = self.viewport.fit_to_bounds(&bounds, self.settings.fit_ratio)?;
        self.sync_viewport();
        self.refresh_clip();
        self.render();
        tracing::debug!(
            "Resized to {}x{}, zoom {:.4}",
            size.width,
            size.height,
            zoom
        );
        Some(zoom)
    }

    pub fn zoom_in(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.viewport.zoom_in();
        self.sync_viewport();
        self.render();
    }

    pub fn zoom_out(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.viewport.zoom_out();
        self.sync_viewport();
        self.render();
    }

    pub fn zoom_to_point(&mut self, world: Point, zoom: f64) {
        if self.is_disposed() {
            return;
        }
        self.viewport.zoom_to_point(world, zoom);
        self.sync_viewport();
        self.render();
    }

    /// Releases the drawing handle. Returns false when already disposed.
    pub fn dispose(&mut self) -> bool {
        match self.handle.take() {
            Some(mut handle) => {
                handle.release();
                self.active.clear();
                self.signals.clear();
                tracing::info!("Surface disposed");
                true
            }
            None => false,
        }
    }

    pub fn active_ids(&self) -> &[ObjectId] {
        &self.active
    }

    /// Live active objects in z-order.
    pub fn active_objects(&self) -> Vec<&SceneObject> {
        self.objects
            .iter()
            .filter(|o| self.active.contains(&o.id))
            .collect()
    }

    /// Replaces the active selection, keeping only selectable objects that
    /// exist, and records the matching signal.
    pub fn set_active_objects(&mut self, ids: &[ObjectId]) {
        let next: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|o| o.flags.selectable && ids.contains(&o.id))
            .map(|o| o.id)
            .collect();
        let signal = match (self.active.is_empty(), next.is_empty()) {
            (true, true) => None,
            (false, true) => Some(SelectionSignal::Cleared),
            (true, false) => Some(SelectionSignal::Created),
            (false, false) if next != self.active => Some(SelectionSignal::Updated),
            (false, false) => None,
        };
        self.active = next;
        if let Some(signal) = signal {
            self.signals.push(signal);
        }
    }

    pub fn discard_active_objects(&mut self) {
        self.set_active_objects(&[]);
    }

    /// Drains the selection signals recorded since the last call.
    pub fn take_signals(&mut self) -> Vec<SelectionSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Serializes every object, workspace included. Viewport is not captured.
    pub fn snapshot(&self) -> Result<String, SurfaceError> {
        serde_json::to_string(&self.objects).map_err(|e| SurfaceError::Snapshot {
            reason: e.to_string(),
        })
    }

    /// Replaces all objects with the snapshot's and clears the selection.
    pub fn restore(&mut self, snapshot: &str) -> Result<(), SurfaceError> {
        let objects: Vec<SceneObject> =
            serde_json::from_str(snapshot).map_err(|e| SurfaceError::Snapshot {
                reason: e.to_string(),
            })?;
        self.replace_objects(objects);
        Ok(())
    }

    /// Swaps in a new object list, clears the selection and re-derives the clip.
    pub fn replace_objects(&mut self, objects: Vec<SceneObject>) {
        if self.is_disposed() {
            return;
        }
        self.discard_active_objects();
        self.objects = objects;
        self.pin_workspace();
        self.refresh_clip();
        self.render();
    }

    /// Wraps the active objects in one group placed on top. Needs at least two.
    pub fn group_active(&mut self) -> Option<ObjectId> {
        if self.is_disposed() || self.active.len() < 2 {
            return None;
        }
        let members: Vec<SceneObject> = self
            .objects
            .iter()
            .filter(|o| self.active.contains(&o.id) && !o.is_workspace())
            .cloned()
            .collect();
        let group = group_objects(members)?;
        let member_ids = self.active.clone();
        self.objects.retain(|o| !member_ids.contains(&o.id));
        let id = group.id;
        self.objects.push(group);
        self.set_active_objects(&[id]);
        self.render();
        Some(id)
    }

    /// Dissolves every active group in place; the released children become
    /// the selection.
    pub fn ungroup_active(&mut self) -> Vec<ObjectId> {
        if self.is_disposed() {
            return Vec::new();
        }
        let mut released = Vec::new();
        let mut index = 0;
        while index < self.objects.len() {
            let is_active_group = self.active.contains(&self.objects[index].id)
                && matches!(self.objects[index].kind, ObjectKind::Group { .. });
            if !is_active_group {
                index += 1;
                continue;
            }
            let group = self.objects.remove(index);
            let children = ungroup_object(group);
            let count = children.len();
            for (offset, child) in children.into_iter().enumerate() {
                released.push(child.id);
                self.objects.insert(index + offset, child);
            }
            index += count;
        }
        if !released.is_empty() {
            self.set_active_objects(&released);
            self.render();
        }
        released
    }

    /// Aligns each active object to the matching workspace edge or centre line.
    pub fn align_active(&mut self, alignment: Alignment) -> usize {
        if self.is_disposed() {
            return 0;
        }
        let Some(ws) = self.workspace_bounds() else {
            return 0;
        };
        let mut moved = 0;
        for object in self
            .objects
            .iter_mut()
            .filter(|o| self.active.contains(&o.id))
        {
            let b = object.bounding_rect();
            let (dx, dy) = match alignment {
                Alignment::Left => (ws.left - b.left, 0.0),
                Alignment::Center => (ws.center().x - b.center().x, 0.0),
                Alignment::Right => (ws.right() - b.right(), 0.0),
                Alignment::Top => (0.0, ws.top - b.top),
                Alignment::Middle => (0.0, ws.center().y - b.center().y),
                Alignment::Bottom => (0.0, ws.bottom() - b.bottom()),
            };
            object.translate(dx, dy);
            moved += 1;
        }
        if moved > 0 {
            self.render();
        }
        moved
    }
}

/// Builds a group whose centre is the centre of the members' union bounds;
/// member positions become relative to that centre.
pub fn group_objects(members: Vec<SceneObject>) -> Option<SceneObject> {
    let union = members
        .iter()
        .map(SceneObject::bounding_rect)
        .reduce(|a, b| a.union(&b))?;
    let center = union.center();
    let children = members
        .into_iter()
        .map(|mut child| {
            let c = child.center();
            child.set_center(Point::new(c.x - center.x, c.y - center.y));
            child
        })
        .collect();
    let mut group = SceneObject::new(ObjectKind::Group { objects: children });
    group.set_center(center);
    Some(group)
}

/// Resolves each child of `group` back into world coordinates, folding in
/// the group's scale and rotation.
pub fn ungroup_object(group: SceneObject) -> Vec<SceneObject> {
    let center = group.center();
    let t = group.transform.clone();
    let objects = match group.kind {
        ObjectKind::Group { objects } => objects,
        other => return vec![SceneObject { kind: other, ..group }],
    };
    objects
        .into_iter()
        .map(|mut child| {
            let rel = child.center();
            let scaled = Point::new(rel.x * t.scale_x, rel.y * t.scale_y).rotated(t.angle);
            child.transform.scale_x *= t.scale_x;
            child.transform.scale_y *= t.scale_y;
            child.transform.angle = (child.transform.angle + t.angle) % 360.0;
            child.set_center(Point::new(center.x + scaled.x, center.y + scaled.y));
            child
        })
        .collect()
}
