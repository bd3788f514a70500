//! Asset bridge between the editor session and the remote services.
//!
//! The editor lock is never held across an await: each operation reads
//! what it needs, releases the lock, talks to the service, then locks again
//! to apply the result. A session disposed in the meantime turns the apply
//! step into a no-op.

use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use designkit_core::{AppEvent, EventBus, ImportError, NotificationEvent, ObjectId, ThreadSafe};
use designkit_editor::{Editor, ObjectKind};
use designkit_settings::RemoteSettings;

use crate::background::{BackgroundRemover, HttpBackgroundRemover};
use crate::client::ApiClient;
use crate::error::RemoteError;
use crate::images::{
    CatalogImage, HttpImageCatalog, ImageCatalog, Pagination, SearchParams, SearchResponse,
};

struct PendingImage {
    id: ObjectId,
    src: String,
    width: f64,
    height: f64,
}

/// Claim on the editor's image-processing slot. Dropping it releases the
/// slot, so a removal whose future is dropped mid-request frees it too.
struct ProcessingSlot {
    editor: ThreadSafe<Editor>,
    released: bool,
}

impl ProcessingSlot {
    /// Claims the slot through the caller's guard; `None` when it is taken.
    fn claim(handle: &ThreadSafe<Editor>, editor: &mut Editor) -> Option<Self> {
        editor.try_begin_image_processing().then(|| Self {
            editor: handle.clone(),
            released: false,
        })
    }

    /// Releases the slot through a guard the caller already holds.
    fn release(mut self, editor: &mut Editor) {
        editor.finish_image_processing();
        self.released = true;
    }
}

impl Drop for ProcessingSlot {
    fn drop(&mut self) {
        if !self.released {
            tracing::debug!("Background removal cancelled, releasing the processing slot");
            self.editor.lock().finish_image_processing();
        }
    }
}

pub struct AssetBridge {
    editor: ThreadSafe<Editor>,
    bus: EventBus,
    remover: Arc<dyn BackgroundRemover>,
    catalog: Arc<dyn ImageCatalog>,
}

impl std::fmt::Debug for AssetBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetBridge").finish_non_exhaustive()
    }
}

impl AssetBridge {
    pub fn new(
        editor: ThreadSafe<Editor>,
        remover: Arc<dyn BackgroundRemover>,
        catalog: Arc<dyn ImageCatalog>,
    ) -> Self {
        let bus = editor.lock().bus().clone();
        Self {
            editor,
            bus,
            remover,
            catalog,
        }
    }

    /// Bridge talking to the asset API named in `settings`.
    pub fn from_settings(
        editor: ThreadSafe<Editor>,
        settings: &RemoteSettings,
    ) -> Result<Self, RemoteError> {
        let client = ApiClient::from_settings(settings)?;
        tracing::info!("Asset API at {}", client.base_url());
        Ok(Self::new(
            editor,
            Arc::new(HttpBackgroundRemover::new(client.clone())),
            Arc::new(HttpImageCatalog::new(client)),
        ))
    }

    pub fn editor(&self) -> &ThreadSafe<Editor> {
        &self.editor
    }

    /// Whether a background removal is running.
    pub fn is_processing(&self) -> bool {
        self.editor.lock().is_processing_image()
    }

    fn notify(&self, event: NotificationEvent) {
        self.bus.publish(AppEvent::Notification(event)).ok();
    }

    fn report(&self, title: &str, err: RemoteError) -> RemoteError {
        tracing::error!("{}: {}", title, err);
        self.notify(NotificationEvent::error(title, err.user_message()));
        err
    }

    /// Replaces the first selected image with a copy whose background has
    /// been removed. The copy keeps the original's placement and is
    /// selected.
    ///
    /// Returns `Ok(None)` when there is nothing to do: no image is selected
    /// or the session was disposed. Only one removal runs at a time;
    /// a second request while one is running gets [`RemoteError::Busy`].
    /// Dropping the returned future releases the slot.
    pub async fn remove_background(&self) -> Result<Option<ObjectId>, RemoteError> {
        let (pending, slot) = {
            let mut editor = self.editor.lock();
            if editor.is_disposed() {
                return Ok(None);
            }
            let pending = editor.active_objects().first().and_then(|o| match &o.kind {
                ObjectKind::Image { src, width, height } => Some(PendingImage {
                    id: o.id,
                    src: src.clone(),
                    width: *width,
                    height: *height,
                }),
                _ => None,
            });
            let Some(pending) = pending else {
                tracing::debug!("Background removal skipped: no image selected");
                return Ok(None);
            };
            let Some(slot) = ProcessingSlot::claim(&self.editor, &mut editor) else {
                return Err(RemoteError::Busy);
            };
            (pending, slot)
        };

        let result = self.remover.remove_background(&pending.src).await;

        let applied = {
            let mut editor = self.editor.lock();
            slot.release(&mut editor);
            result.map(|data_url| {
                let (width, height) = data_url_dimensions(&data_url)
                    .unwrap_or((pending.width, pending.height));
                editor.replace_image(pending.id, data_url, width, height)
            })
        };

        match applied {
            Ok(Some(id)) => {
                self.notify(NotificationEvent::success(
                    "Background removed",
                    "The background was removed from the image.",
                ));
                Ok(Some(id))
            }
            Ok(None) => {
                tracing::warn!(
                    "Image {} disappeared before its background was removed",
                    pending.id
                );
                Ok(None)
            }
            Err(e) => Err(self.report("Background removal failed", e)),
        }
    }

    /// Searches when `params.query` is set; otherwise lists random images
    /// with the requested orientation.
    pub async fn browse(&self, params: &SearchParams) -> Result<SearchResponse, RemoteError> {
        self.list_or_search(params)
            .await
            .map_err(|e| self.report("Images failed to load", e))
    }

    async fn list_or_search(&self, params: &SearchParams) -> Result<SearchResponse, RemoteError> {
        if !params.query.trim().is_empty() {
            return self.catalog.search_images(params).await;
        }
        let photos = self
            .catalog
            .get_images(params.orientation, params.per_page)
            .await?;
        Ok(SearchResponse {
            pagination: Pagination {
                total: photos.len() as u64,
                total_pages: 1,
                current_page: 1,
                per_page: params.per_page,
            },
            photos,
        })
    }

    /// Adds a catalog image by its regular-size URL.
    pub async fn insert_catalog_image(
        &self,
        image: &CatalogImage,
    ) -> Result<Option<ObjectId>, RemoteError> {
        let url = image.urls.regular.as_str();
        let bytes = match self.catalog.fetch_image(url).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.report("Image failed to load", e)),
        };
        let (width, height) = image_dimensions(&bytes)
            .map_err(|e| self.report("Image failed to load", e.into()))?;
        Ok(self.editor.lock().add_image_url(url, width, height))
    }

    /// Uploads a local file to the catalog.
    pub async fn upload_file(&self, path: &Path) -> Result<CatalogImage, RemoteError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| self.report("Upload failed", e.into()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        match self.catalog.upload_image(bytes, &file_name).await {
            Ok(image) => {
                self.notify(NotificationEvent::success(
                    "Upload complete",
                    format!("{} was uploaded.", file_name),
                ));
                Ok(image)
            }
            Err(e) => Err(self.report("Upload failed", e)),
        }
    }

    /// Embeds a local raster file.
    pub async fn insert_image_file(&self, path: &Path) -> Result<Option<ObjectId>, RemoteError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| self.report("Image import failed", e.into()))?;
        let result = self.editor.lock().add_image_bytes(&bytes);
        result.map_err(|e| self.report("Image import failed", e.into()))
    }

    /// Imports a local SVG file.
    pub async fn import_svg_file(&self, path: &Path) -> Result<Option<ObjectId>, RemoteError> {
        let markup = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| self.report("SVG import failed", e.into()))?;
        let result = self.editor.lock().import_svg(&markup);
        result.map_err(|e| self.report("SVG import failed", e.into()))
    }
}

/// Payload of a base64 data URL.
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let (meta, payload) = url.strip_prefix("data:")?.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    STANDARD.decode(payload.trim()).ok()
}

pub fn image_dimensions(bytes: &[u8]) -> Result<(f64, f64), ImportError> {
    let image = image::load_from_memory(bytes).map_err(|e| ImportError::ImageDecode {
        reason: e.to_string(),
    })?;
    Ok((image.width() as f64, image.height() as f64))
}

fn data_url_dimensions(url: &str) -> Option<(f64, f64)> {
    let bytes = decode_data_url(url)?;
    image_dimensions(&bytes).ok()
}
