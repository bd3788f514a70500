//! Object operations (insert, import, delete, reorder, group, align) for the
//! editor session.

use designkit_core::{AppEvent, ImportError, ObjectId, SurfaceEvent};

use super::Editor;
use crate::factory::{
    build_image, build_shape, build_text, ShapeOverrides, ShapePreset, TextOverrides, TextPreset,
};
use crate::import::{image_from_url, import_raster, SvgImporter};
use crate::model::{ObjectKind, SceneObject};
use crate::surface::{Alignment, ReorderDirection};

impl Editor {
    /// Centres `object` on the workspace, puts it on top and selects it.
    /// Every creation path ends here.
    pub fn add_object(&mut self, object: SceneObject) -> Option<ObjectId> {
        let id = self.surface.add_object(object)?;
        self.publish(AppEvent::Surface(SurfaceEvent::ObjectAdded { id }));
        self.commit();
        Some(id)
    }

    pub fn add_shape(&mut self, preset: ShapePreset, overrides: &ShapeOverrides) -> Option<ObjectId> {
        self.add_object(build_shape(preset, overrides))
    }

    pub fn add_circle(&mut self, overrides: &ShapeOverrides) -> Option<ObjectId> {
        self.add_shape(ShapePreset::Circle, overrides)
    }

    pub fn add_rectangle(&mut self, overrides: &ShapeOverrides) -> Option<ObjectId> {
        self.add_shape(ShapePreset::Rectangle, overrides)
    }

    pub fn add_soft_rectangle(&mut self, overrides: &ShapeOverrides) -> Option<ObjectId> {
        self.add_shape(ShapePreset::SoftRectangle, overrides)
    }

    pub fn add_triangle(&mut self, overrides: &ShapeOverrides) -> Option<ObjectId> {
        self.add_shape(ShapePreset::Triangle, overrides)
    }

    pub fn add_inverse_triangle(&mut self, overrides: &ShapeOverrides) -> Option<ObjectId> {
        self.add_shape(ShapePreset::InverseTriangle, overrides)
    }

    pub fn add_diamond(&mut self, overrides: &ShapeOverrides) -> Option<ObjectId> {
        self.add_shape(ShapePreset::Diamond, overrides)
    }

    /// Adds a textbox. Unset overrides fall back to the session defaults.
    pub fn add_text(&mut self, content: &str, overrides: &TextOverrides) -> Option<ObjectId> {
        let mut merged = overrides.clone();
        merged
            .font_family
            .get_or_insert_with(|| self.defaults.font_family.clone());
        self.add_object(build_text(content, &merged))
    }

    pub fn add_text_preset(&mut self, preset: TextPreset) -> Option<ObjectId> {
        self.add_text(preset.content(), &preset.overrides())
    }

    /// Decodes a raster image and inserts it.
    pub fn add_image_bytes(&mut self, bytes: &[u8]) -> Result<Option<ObjectId>, ImportError> {
        let object = import_raster(bytes, self.config.import_max_dimension)?;
        Ok(self.add_object(object))
    }

    /// Inserts a remote image whose natural size is known.
    pub fn add_image_url(&mut self, url: &str, width: f64, height: f64) -> Option<ObjectId> {
        let object = image_from_url(url, width, height, self.config.import_max_dimension);
        self.add_object(object)
    }

    /// Imports SVG markup as one object (a group when it has several
    /// elements) scaled to the import limit.
    pub fn import_svg(&mut self, markup: &str) -> Result<Option<ObjectId>, ImportError> {
        let object = SvgImporter::new(self.config.import_max_dimension).import_str(markup)?;
        tracing::info!("Imported SVG as {}", object.type_name());
        Ok(self.add_object(object))
    }

    /// Swaps the image `old` for a new image with the same placement. The
    /// replacement lands on top and is selected. Returns `None` when `old`
    /// is gone or is not an image.
    pub fn replace_image(
        &mut self,
        old: ObjectId,
        src: String,
        width: f64,
        height: f64,
    ) -> Option<ObjectId> {
        if self.is_disposed() {
            return None;
        }
        let original = self.surface.object(old)?;
        if !matches!(original.kind, ObjectKind::Image { .. }) {
            return None;
        }
        let mut replacement = build_image(src, width, height);
        replacement.transform = original.transform.clone();
        replacement.opacity = original.opacity;
        replacement.name = original.name.clone();

        self.surface.remove_object(old)?;
        self.publish(AppEvent::Surface(SurfaceEvent::ObjectRemoved { id: old }));
        let id = self.surface.append(replacement);
        self.publish(AppEvent::Surface(SurfaceEvent::ObjectAdded { id }));
        self.commit();
        tracing::info!("Replaced image {} with {}", old, id);
        Some(id)
    }

    /// Removes one object. The workspace cannot be removed.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        if self.surface.remove_object(id).is_none() {
            return false;
        }
        self.publish(AppEvent::Surface(SurfaceEvent::ObjectRemoved { id }));
        self.commit();
        true
    }

    /// Deletes the active objects and clears the selection. Returns how many
    /// were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.is_disposed() {
            return 0;
        }
        let removed = self.surface.remove_active_selection();
        for object in &removed {
            self.publish(AppEvent::Surface(SurfaceEvent::ObjectRemoved { id: object.id }));
        }
        self.surface.discard_active_objects();
        self.commit();
        removed.len()
    }

    /// Moves `id` one step; the workspace stays at the bottom.
    pub fn reorder(&mut self, id: ObjectId, direction: ReorderDirection) -> Option<usize> {
        let index = self.surface.reorder(id, direction)?;
        self.publish(AppEvent::Surface(SurfaceEvent::Reordered { id, index }));
        self.commit();
        Some(index)
    }

    pub fn bring_forward(&mut self) -> usize {
        self.reorder_selected(ReorderDirection::Forward)
    }

    pub fn send_backwards(&mut self) -> usize {
        self.reorder_selected(ReorderDirection::Backward)
    }

    /// Steps every active object; checkpoints once even if nothing moved.
    fn reorder_selected(&mut self, direction: ReorderDirection) -> usize {
        if self.is_disposed() {
            return 0;
        }
        let active = self.surface.active_ids().to_vec();
        let mut ids = active.clone();
        // Raise the topmost first so neighbours do not swap back.
        if direction == ReorderDirection::Forward {
            ids.sort_by_key(|id| std::cmp::Reverse(self.surface.z_index(*id)));
        } else {
            ids.sort_by_key(|id| self.surface.z_index(*id));
        }
        let mut moved = 0;
        for id in ids {
            // Never jump past a selected neighbour that could not move.
            let blocked = self
                .surface
                .z_index(id)
                .and_then(|index| match direction {
                    ReorderDirection::Forward => index.checked_add(1),
                    ReorderDirection::Backward => index.checked_sub(1),
                })
                .and_then(|slot| self.surface.objects().get(slot))
                .is_some_and(|neighbour| active.contains(&neighbour.id));
            if blocked {
                continue;
            }
            if let Some(index) = self.surface.reorder(id, direction) {
                self.publish(AppEvent::Surface(SurfaceEvent::Reordered { id, index }));
                moved += 1;
            }
        }
        self.commit();
        moved
    }

    pub fn group_selected(&mut self) -> Option<ObjectId> {
        let id = self.surface.group_active()?;
        self.commit();
        Some(id)
    }

    pub fn ungroup_selected(&mut self) -> Vec<ObjectId> {
        let released = self.surface.ungroup_active();
        if !released.is_empty() {
            self.commit();
        }
        released
    }

    pub fn align_selected(&mut self, alignment: Alignment) -> usize {
        let moved = self.surface.align_active(alignment);
        if moved > 0 {
            self.commit();
        }
        moved
    }
}
