//! Shared HTTP plumbing for the asset API.
//!
//! Every endpoint answers with the same envelope:
//! `{"success": bool, "data": ..., "error": "..."}`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use designkit_settings::RemoteSettings;

use crate::error::RemoteError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The payload of a successful response; the service's own message
    /// otherwise.
    pub fn into_data(self) -> Result<T, RemoteError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(RemoteError::Service(
                self.error.unwrap_or_else(|| "Request failed".to_string()),
            )),
        }
    }

    /// The payload of a successful response, or `T::default()` when the
    /// service reports a failure.
    pub fn data_or_default(self) -> T
    where
        T: Default,
    {
        match (self.success, self.data) {
            (true, Some(data)) => data,
            _ => {
                if let Some(error) = self.error {
                    tracing::warn!("Service reported failure: {}", error);
                }
                T::default()
            }
        }
    }
}

/// Parses an envelope body.
pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T, RemoteError> {
    read_envelope::<T>(body)?.into_data()
}

fn read_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, RemoteError> {
    serde_json::from_str(body).map_err(|e| RemoteError::Parse(e.to_string()))
}

/// Error for a non-success status, preferring the `error` field of a JSON
/// body when there is one.
fn status_error(status: u16, body: String) -> RemoteError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            error: Some(message),
        }) => RemoteError::Service(message),
        _ => RemoteError::Status { status, body },
    }
}

/// JSON client rooted at the asset API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| RemoteError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &RemoteSettings) -> Result<Self, RemoteError> {
        Self::new(&settings.api_base_url, settings.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        self.get_envelope(path, query).await?.into_data()
    }

    /// GET returning the whole envelope, for endpoints whose failures are
    /// reported as empty results.
    pub async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, RemoteError> {
        let request = self.http.get(self.url(path)).query(query);
        read_envelope(&send(request).await?)
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, RemoteError> {
        let request = self.http.post(self.url(path)).json(body);
        parse_envelope(&send(request).await?)
    }

    /// Uploads `bytes` as the multipart field `field`.
    pub async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<T, RemoteError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part(field.to_string(), part);
        let request = self.http.post(self.url(path)).multipart(form);
        parse_envelope(&send(request).await?)
    }

    /// Raw bytes from an absolute URL.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<String, RemoteError> {
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
        return Err(status_error(status.as_u16(), body));
    }
    Ok(body)
}
