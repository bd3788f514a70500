//! Export, download and document load for the editor session.

use std::path::{Path, PathBuf};

use designkit_core::{AppEvent, ExportError, ImportError, SurfaceEvent};

use super::Editor;
use crate::export::{self, DesignDocument, ExportFormat};
use crate::svg_export::export_svg;

impl Editor {
    pub fn document(&self) -> Result<DesignDocument, ExportError> {
        DesignDocument::capture(self.surface.objects(), self.project_id.as_deref())
    }

    /// JSON document of the whole canvas.
    pub fn export_document(&self) -> Result<String, ExportError> {
        self.document()?.to_json()
    }

    /// SVG of the workspace area.
    pub fn export_vector(&self) -> Result<String, ExportError> {
        export_svg(self.surface.objects())
    }

    pub fn export(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Json => self.export_document(),
            ExportFormat::Svg => self.export_vector(),
        }
    }

    /// Exports in `format` and writes the result into `dir`.
    pub fn download(
        &self,
        format: ExportFormat,
        name: Option<&str>,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let data = self.export(format)?;
        export::download(&data, format, name, dir)
    }

    /// Replaces every non-workspace object with the document's content and
    /// checkpoints. The current workspace is kept. Returns the number of
    /// objects loaded.
    pub fn load_document(&mut self, json: &str) -> Result<usize, ImportError> {
        let document = DesignDocument::from_json(json)?;
        if self.is_disposed() {
            return Ok(0);
        }
        let Some(workspace) = self.surface.workspace().cloned() else {
            return Err(ImportError::InvalidDocument {
                reason: "surface has no workspace".to_string(),
            });
        };

        let previous: Vec<_> = self.surface.content().map(|o| o.id).collect();
        let mut objects = vec![workspace];
        objects.extend(document.content().cloned().map(|mut object| {
            export::normalize_text(&mut object);
            object
        }));
        let loaded = objects.len() - 1;

        self.surface.replace_objects(objects);
        for id in previous {
            self.publish(AppEvent::Surface(SurfaceEvent::ObjectRemoved { id }));
        }
        let added: Vec<_> = self.surface.content().map(|o| o.id).collect();
        for id in added {
            self.publish(AppEvent::Surface(SurfaceEvent::ObjectAdded { id }));
        }
        self.commit();
        tracing::info!(
            "Loaded document v{} with {} object(s)",
            document.version,
            loaded
        );
        Ok(loaded)
    }
}
