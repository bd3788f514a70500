//! Stock image catalog and uploads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::RemoteError;

/// Default page size for catalog searches.
pub const DEFAULT_PER_PAGE: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImageUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImageUser {
    pub name: String,
    #[serde(default)]
    pub username: String,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogImage {
    pub id: String,
    pub urls: ImageUrls,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user: ImageUser,
}

impl CatalogImage {
    /// Text for an `alt` attribute or tooltip.
    pub fn caption(&self) -> &str {
        self.alt_description
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("Image")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Squarish,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Squarish => "squarish",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Relevant,
    Latest,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBy::Relevant => f.write_str("relevant"),
            OrderBy::Latest => f.write_str("latest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
    pub orientation: Option<Orientation>,
    pub color: Option<String>,
    pub order_by: OrderBy,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            orientation: None,
            color: None,
            order_by: OrderBy::Relevant,
        }
    }
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Query-string pairs; unset and empty values are left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.query.is_empty() {
            pairs.push(("query", self.query.clone()));
        }
        if self.page > 0 {
            pairs.push(("page", self.page.to_string()));
        }
        if self.per_page > 0 {
            pairs.push(("per_page", self.per_page.to_string()));
        }
        if let Some(orientation) = self.orientation {
            pairs.push(("orientation", orientation.to_string()));
        }
        if let Some(color) = self.color.as_ref().filter(|c| !c.is_empty()) {
            pairs.push(("color", color.clone()));
        }
        pairs.push(("order_by", self.order_by.to_string()));
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            total_pages: 0,
            current_page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResponse {
    pub photos: Vec<CatalogImage>,
    pub pagination: Pagination,
}

/// Remote image catalog.
#[async_trait::async_trait]
pub trait ImageCatalog: Send + Sync {
    /// Random or filtered images.
    async fn get_images(
        &self,
        orientation: Option<Orientation>,
        count: u32,
    ) -> Result<Vec<CatalogImage>, RemoteError>;

    async fn get_image(&self, id: &str) -> Result<CatalogImage, RemoteError>;

    async fn search_images(&self, params: &SearchParams) -> Result<SearchResponse, RemoteError>;

    /// Uploads a local image; the catalog returns it as an entry.
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<CatalogImage, RemoteError>;

    /// Raw bytes behind an image URL.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, RemoteError>;
}

/// [`ImageCatalog`] backed by the asset API.
#[derive(Debug, Clone)]
pub struct HttpImageCatalog {
    client: ApiClient,
}

impl HttpImageCatalog {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ImageCatalog for HttpImageCatalog {
    async fn get_images(
        &self,
        orientation: Option<Orientation>,
        count: u32,
    ) -> Result<Vec<CatalogImage>, RemoteError> {
        let mut query = vec![("count", count.to_string())];
        if let Some(orientation) = orientation {
            query.push(("orientation", orientation.to_string()));
        }
        let images = self
            .client
            .get_envelope::<Vec<CatalogImage>>("images", &query)
            .await?
            .data_or_default();
        tracing::debug!("Fetched {} catalog image(s)", images.len());
        Ok(images)
    }

    async fn get_image(&self, id: &str) -> Result<CatalogImage, RemoteError> {
        self.client.get(&format!("images/{}", id), &[]).await
    }

    async fn search_images(&self, params: &SearchParams) -> Result<SearchResponse, RemoteError> {
        let response = self
            .client
            .get_envelope::<SearchResponse>("images/search", &params.to_query())
            .await?
            .data_or_default();
        tracing::debug!(
            "Search '{}' returned {} of {} image(s)",
            params.query,
            response.photos.len(),
            response.pagination.total
        );
        Ok(response)
    }

    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<CatalogImage, RemoteError> {
        tracing::info!("Uploading {} ({} bytes)", file_name, bytes.len());
        self.client
            .post_file("images/upload", "image", file_name, bytes)
            .await
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        self.client.fetch_bytes(url).await
    }
}
