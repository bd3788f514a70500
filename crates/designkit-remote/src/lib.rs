//! # DesignKit Remote
//!
//! Clients for the services the editor leans on, and the bridge that
//! applies their results to an editor session.
//!
//! - **Background removal**: [`BackgroundRemover`] and its HTTP client
//! - **Image catalog**: search, browse, fetch and upload via [`ImageCatalog`]
//! - **Fonts**: [`FontService`] over a [`FontCatalog`], with a fallback list
//! - **Bridge**: [`AssetBridge`] drives the above against a shared
//!   [`Editor`](designkit_editor::Editor)
//!
//! Every client is a trait object so tests and hosts can swap in their own.

pub mod background;
pub mod bridge;
pub mod client;
pub mod error;
pub mod fonts;
pub mod images;

pub use background::{BackgroundRemover, HttpBackgroundRemover};
pub use bridge::{decode_data_url, image_dimensions, AssetBridge};
pub use client::{ApiClient, ApiResponse};
pub use error::RemoteError;
pub use fonts::{
    default_fonts, group_by_category, stylesheet_url, FontCatalog, FontCategory, FontInfo,
    FontService, HttpFontCatalog, DEFAULT_FONTS,
};
pub use images::{
    CatalogImage, HttpImageCatalog, ImageCatalog, ImageUrls, ImageUser, OrderBy, Orientation,
    Pagination, SearchParams, SearchResponse, DEFAULT_PER_PAGE,
};
