//! Font catalog and loaded-font bookkeeping.
//!
//! Without a catalog key, or when the catalog cannot be reached, the
//! service falls back to a fixed list of common families. Fallback results
//! are not cached so a later call can still reach the catalog.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use designkit_settings::RemoteSettings;

use crate::error::RemoteError;

/// Families always available without loading.
pub const DEFAULT_FONTS: [&str; 13] = [
    "Arial",
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Oswald",
    "Source Sans Pro",
    "Slabo 27px",
    "Raleway",
    "PT Sans",
    "Merriweather",
    "Ubuntu",
    "Playfair Display",
];

const DEFAULT_CATEGORY: &str = "sans-serif";
const STYLESHEET_BASE: &str = "https://fonts.googleapis.com/css2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontInfo {
    pub family: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub subsets: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<std::collections::BTreeMap<String, String>>,
}

impl FontInfo {
    /// Entry used for the fallback list.
    pub fn fallback(family: &str) -> Self {
        Self {
            family: family.to_string(),
            variants: vec!["regular".to_string()],
            subsets: vec!["latin".to_string()],
            category: DEFAULT_CATEGORY.to_string(),
            files: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontCategory {
    pub name: String,
    pub fonts: Vec<FontInfo>,
}

pub fn default_fonts() -> Vec<FontInfo> {
    DEFAULT_FONTS.iter().map(|f| FontInfo::fallback(f)).collect()
}

/// Stylesheet URL for regular and bold weights of `family`, with the
/// query form-encoded.
pub fn stylesheet_url(family: &str) -> Result<Url, RemoteError> {
    let mut url = Url::parse(STYLESHEET_BASE).map_err(|e| RemoteError::Request(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("family", &format!("{}:wght@400;700", family))
        .append_pair("display", "swap");
    Ok(url)
}

/// Groups fonts by category in first-seen order. An empty category counts
/// as sans-serif.
pub fn group_by_category(fonts: &[FontInfo]) -> Vec<FontCategory> {
    let mut categories: Vec<FontCategory> = Vec::new();
    for font in fonts {
        let name = if font.category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            font.category.as_str()
        };
        match categories.iter_mut().find(|c| c.name == name) {
            Some(category) => category.fonts.push(font.clone()),
            None => categories.push(FontCategory {
                name: name.to_string(),
                fonts: vec![font.clone()],
            }),
        }
    }
    categories
}

/// Remote font catalog.
#[async_trait::async_trait]
pub trait FontCatalog: Send + Sync {
    /// Fonts sorted by popularity.
    async fn list_fonts(&self) -> Result<Vec<FontInfo>, RemoteError>;

    /// Fetches the stylesheet that registers `family`.
    async fn load_stylesheet(&self, family: &str) -> Result<String, RemoteError>;
}

#[derive(Debug, Deserialize)]
struct FontList {
    #[serde(default)]
    items: Vec<FontInfo>,
}

/// [`FontCatalog`] backed by the web fonts API.
#[derive(Debug, Clone)]
pub struct HttpFontCatalog {
    http: reqwest::Client,
    fonts_url: String,
    api_key: Option<String>,
}

impl HttpFontCatalog {
    pub fn new(
        fonts_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            fonts_url: fonts_url.into(),
            api_key,
        })
    }

    pub fn from_settings(settings: &RemoteSettings) -> Result<Self, RemoteError> {
        Self::new(
            settings.fonts_url.clone(),
            settings.fonts_api_key.clone(),
            settings.timeout(),
        )
    }

    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl FontCatalog for HttpFontCatalog {
    async fn list_fonts(&self) -> Result<Vec<FontInfo>, RemoteError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(RemoteError::Service("font catalog key not configured".to_string()));
        };
        let request = self
            .http
            .get(&self.fonts_url)
            .query(&[("key", key), ("sort", "popularity")]);
        let body = self.get_text(request).await?;
        let list: FontList =
            serde_json::from_str(&body).map_err(|e| RemoteError::Parse(e.to_string()))?;
        Ok(list.items)
    }

    async fn load_stylesheet(&self, family: &str) -> Result<String, RemoteError> {
        self.get_text(self.http.get(stylesheet_url(family)?)).await
    }
}

/// Caches the catalog and tracks which families have been loaded.
pub struct FontService {
    catalog: Arc<dyn FontCatalog>,
    fonts: Mutex<Vec<FontInfo>>,
    loaded: Mutex<HashSet<String>>,
}

impl std::fmt::Debug for FontService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontService")
            .field("cached", &self.fonts.lock().len())
            .field("loaded", &self.loaded.lock().len())
            .finish()
    }
}

impl FontService {
    pub fn new(catalog: Arc<dyn FontCatalog>) -> Self {
        Self {
            catalog,
            fonts: Mutex::new(Vec::new()),
            loaded: Mutex::new(HashSet::new()),
        }
    }

    pub fn from_settings(settings: &RemoteSettings) -> Result<Self, RemoteError> {
        if settings.fonts_api_key.is_none() {
            tracing::warn!("Font catalog key not found. Using default fonts.");
        }
        Ok(Self::new(Arc::new(HttpFontCatalog::from_settings(settings)?)))
    }

    /// The catalog's fonts, or the fallback list when it is unavailable.
    pub async fn fonts(&self) -> Vec<FontInfo> {
        {
            let cached = self.fonts.lock();
            if !cached.is_empty() {
                return cached.clone();
            }
        }
        match self.catalog.list_fonts().await {
            Ok(fonts) if !fonts.is_empty() => {
                tracing::info!("Loaded {} font(s) from catalog", fonts.len());
                *self.fonts.lock() = fonts.clone();
                fonts
            }
            Ok(_) => default_fonts(),
            Err(e) => {
                tracing::warn!("Font catalog unavailable, using defaults: {}", e);
                default_fonts()
            }
        }
    }

    pub async fn categories(&self) -> Vec<FontCategory> {
        group_by_category(&self.fonts().await)
    }

    /// Makes `family` available. Returns false when it already was.
    pub async fn load_font(&self, family: &str) -> Result<bool, RemoteError> {
        if self.is_loaded(family) {
            return Ok(false);
        }
        if let Err(e) = self.catalog.load_stylesheet(family).await {
            tracing::error!("Error loading font {}: {}", family, e);
            return Err(e);
        }
        self.loaded.lock().insert(family.to_string());
        tracing::debug!("Loaded font {}", family);
        Ok(true)
    }

    /// Loads the first `count` fonts. Failures are logged and skipped;
    /// returns how many were newly loaded.
    pub async fn preload_popular(&self, count: usize) -> usize {
        let fonts = self.fonts().await;
        let mut newly = 0;
        for font in fonts.iter().take(count) {
            if let Ok(true) = self.load_font(&font.family).await {
                newly += 1;
            }
        }
        newly
    }

    pub fn is_loaded(&self, family: &str) -> bool {
        DEFAULT_FONTS.iter().any(|f| *f == family) || self.loaded.lock().contains(family)
    }
}
