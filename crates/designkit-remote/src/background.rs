//! Background-removal service.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::RemoteError;

const REMOVE_PATH: &str = "background/remove";

/// Removes the background of an encoded image.
#[async_trait::async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Takes image data (a data URL or a remote URL) and returns the
    /// processed image as a data URL.
    async fn remove_background(&self, image_data: &str) -> Result<String, RemoteError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveRequest<'a> {
    image_data: &'a str,
}

#[derive(Debug, Deserialize)]
struct RemoveResponse {
    image: String,
}

/// [`BackgroundRemover`] backed by the asset API.
#[derive(Debug, Clone)]
pub struct HttpBackgroundRemover {
    client: ApiClient,
}

impl HttpBackgroundRemover {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl BackgroundRemover for HttpBackgroundRemover {
    async fn remove_background(&self, image_data: &str) -> Result<String, RemoteError> {
        tracing::debug!("Requesting background removal ({} bytes)", image_data.len());
        let response: RemoveResponse = self
            .client
            .post_json(REMOVE_PATH, &RemoveRequest { image_data })
            .await?;
        Ok(response.image)
    }
}
