//! Application wiring: one event bus, one mounted editor, and the remote
//! services configured from the same settings.

use std::path::{Path, PathBuf};

use chrono::Utc;
use designkit_core::{EventBus, ExportError};
use designkit_editor::export::{export_file_name_with_prefix, write_export};
use designkit_editor::{DrawingHandle, EditorMount, ExportFormat, Size};
use designkit_remote::{AssetBridge, FontService};
use designkit_settings::Config;

pub struct App {
    config: Config,
    bus: EventBus,
    mount: EditorMount,
    bridge: Option<AssetBridge>,
    fonts: FontService,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("mounted", &self.mount.is_mounted())
            .field("fonts", &self.fonts)
            .finish()
    }
}

impl App {
    /// Mounts an editor on `handle`. A mount failure leaves the app without
    /// an editor (and without an asset bridge) rather than failing; errors
    /// here come from building the HTTP clients.
    pub fn new(
        config: Config,
        handle: Box<dyn DrawingHandle>,
        container: Size,
    ) -> anyhow::Result<Self> {
        let bus = EventBus::new();
        let mount = EditorMount::mount(handle, container, config.to_editor_config(), bus.clone());
        let bridge = mount
            .editor()
            .map(|editor| AssetBridge::from_settings(editor, &config.remote))
            .transpose()?;
        let fonts = FontService::from_settings(&config.remote)?;
        Ok(Self {
            config,
            bus,
            mount,
            bridge,
            fonts,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn mount(&self) -> &EditorMount {
        &self.mount
    }

    pub fn bridge(&self) -> Option<&AssetBridge> {
        self.bridge.as_ref()
    }

    pub fn fonts(&self) -> &FontService {
        &self.fonts
    }

    /// Writes an export into the configured output directory, or `dir`
    /// when given. Unnamed exports use the configured file prefix.
    /// `Ok(None)` when no editor is mounted.
    pub fn download(
        &self,
        format: ExportFormat,
        name: Option<&str>,
        dir: Option<&Path>,
    ) -> Result<Option<PathBuf>, ExportError> {
        let Some(editor) = self.mount.editor() else {
            return Ok(None);
        };
        let dir = dir.unwrap_or(self.config.export.output_directory.as_path());
        let data = editor.lock().export(format)?;
        let file_name =
            export_file_name_with_prefix(name, &self.config.export.file_prefix, format, Utc::now());
        write_export(&data, &file_name, dir).map(Some)
    }

    /// Disposes the editor and drops the bridge.
    pub fn shutdown(&mut self) {
        self.bridge = None;
        self.mount.unmount();
        tracing::info!("DesignKit session closed");
    }
}
