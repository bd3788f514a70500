//! Document export and the file download helper.
//!
//! A [`DesignDocument`] is the JSON form of the canvas: every object with
//! its geometry, paint and the persisted interaction flags. Transient
//! interaction state (text editing) is never written, and every text object
//! is saved with the `textbox` flavour.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use designkit_core::constants::DOCUMENT_VERSION;
use designkit_core::{ExportError, ImportError};

use crate::model::{ObjectKind, SceneObject, TextFlavour};

/// File name prefix used when the caller gives no name.
pub const DEFAULT_EXPORT_PREFIX: &str = "canvas-export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Svg => "image/svg+xml;charset=utf-8",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(ExportError::Download {
                reason: format!("Unsupported export format: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub project_id: Option<String>,
    pub exported_at: DateTime<Utc>,
    pub workspace_width: f64,
    pub workspace_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    pub version: String,
    pub metadata: DocumentMetadata,
    pub objects: Vec<SceneObject>,
}

impl DesignDocument {
    /// Captures `objects`, which must include the workspace.
    pub fn capture(
        objects: &[SceneObject],
        project_id: Option<&str>,
    ) -> Result<Self, ExportError> {
        let workspace = objects
            .iter()
            .find(|o| o.is_workspace())
            .ok_or(ExportError::WorkspaceNotFound)?;
        let size = workspace.local_size();

        let objects = objects
            .iter()
            .cloned()
            .map(|mut object| {
                normalize_text(&mut object);
                object
            })
            .collect();

        Ok(Self {
            version: DOCUMENT_VERSION.to_string(),
            metadata: DocumentMetadata {
                project_id: project_id.map(str::to_string),
                exported_at: Utc::now(),
                workspace_width: size.width,
                workspace_height: size.height,
            },
            objects,
        })
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialization {
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let document: DesignDocument =
            serde_json::from_str(json).map_err(|e| ImportError::InvalidDocument {
                reason: e.to_string(),
            })?;
        if document.objects.iter().filter(|o| o.is_workspace()).count() > 1 {
            return Err(ImportError::InvalidDocument {
                reason: "more than one workspace object".to_string(),
            });
        }
        Ok(document)
    }

    /// Objects other than the workspace, bottom to top.
    pub fn content(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| !o.is_workspace())
    }
}

/// Forces the `textbox` flavour on text, recursing into groups.
pub fn normalize_text(object: &mut SceneObject) {
    match &mut object.kind {
        ObjectKind::Text(text) => {
            text.flavour = TextFlavour::Textbox;
            text.editing = false;
        }
        ObjectKind::Group { objects } => objects.iter_mut().for_each(normalize_text),
        _ => {}
    }
}

/// File name for a download: `<name>.<ext>`, or
/// `canvas-export-YYYY-MM-DD.<ext>` when no usable name is given.
pub fn export_file_name(name: Option<&str>, format: ExportFormat, now: DateTime<Utc>) -> String {
    export_file_name_with_prefix(name, DEFAULT_EXPORT_PREFIX, format, now)
}

pub fn export_file_name_with_prefix(
    name: Option<&str>,
    prefix: &str,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> String {
    let stem = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| {
            n.strip_suffix(&format!(".{}", format.extension()))
                .unwrap_or(n)
                .replace(['/', '\\'], "_")
        })
        .unwrap_or_else(|| format!("{}-{}", prefix, now.format("%Y-%m-%d")));
    format!("{}.{}", stem, format.extension())
}

/// Writes `data` into `dir` and returns the written path.
pub fn download(
    data: &str,
    format: ExportFormat,
    name: Option<&str>,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    write_export(data, &export_file_name(name, format, Utc::now()), dir)
}

/// Writes `data` as `file_name` inside `dir`, creating `dir` as needed.
pub fn write_export(data: &str, file_name: &str, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(file_name);
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Download {
        reason: format!("Failed to create {}: {}", dir.display(), e),
    })?;
    std::fs::write(&path, data).map_err(|e| ExportError::Download {
        reason: format!("Failed to write {}: {}", path.display(), e),
    })?;
    tracing::info!("Exported {}", path.display());
    Ok(path)
}
