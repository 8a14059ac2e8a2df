//! HTTP adapter for the remote image metadata service.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use crate::domain::entities::ImageDimensions;
use crate::domain::ports::{MetadataProviderPort, ProviderError, ProviderResult};
use crate::infrastructure::config::ServiceConfig;

/// Fetches image metadata over HTTP from an image proxy service.
///
/// Two independent request shapes against the canonical image URL: a JSON
/// dimensions query (`output=json`) and a placeholder query returning a
/// small blurred rendition as raw bytes, which is converted into a data URI.
pub struct HttpMetadataProvider {
    client: reqwest::Client,
    base_url: String,
    placeholder_width: u32,
    placeholder_blur: u32,
}

/// Structured dimensions body returned by the service. Extra fields are
/// ignored.
#[derive(Debug, Deserialize)]
struct DimensionsBody {
    width: u32,
    height: u32,
}

impl std::fmt::Debug for HttpMetadataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMetadataProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpMetadataProvider {
    /// Creates a provider for the configured service.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &ServiceConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            placeholder_width: config.placeholder_width,
            placeholder_blur: config.placeholder_blur,
        })
    }

    /// Builds the dimensions request URL for a canonical image URL.
    fn dimensions_request(&self, url: &str) -> ProviderResult<Url> {
        let mut request = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::Network(format!("Bad service base URL: {e}")))?;
        request
            .query_pairs_mut()
            .append_pair("url", url)
            .append_pair("output", "json");
        Ok(request)
    }

    /// Builds the placeholder request URL for a canonical image URL.
    fn placeholder_request(&self, url: &str) -> ProviderResult<Url> {
        let mut request = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::Network(format!("Bad service base URL: {e}")))?;
        request
            .query_pairs_mut()
            .append_pair("url", url)
            .append_pair("w", &self.placeholder_width.to_string())
            .append_pair("blur", &self.placeholder_blur.to_string());
        Ok(request)
    }
}

#[async_trait]
impl MetadataProviderPort for HttpMetadataProvider {
    async fn fetch_dimensions(&self, url: &str) -> ProviderResult<ImageDimensions> {
        let request = self.dimensions_request(url)?;
        trace!(url = %url, "Fetching image dimensions");

        let response = self
            .client
            .get(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: DimensionsBody = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedBody(e.to_string()))?;

        if body.width == 0 || body.height == 0 {
            return Err(ProviderError::MalformedBody(format!(
                "non-positive dimensions {}x{}",
                body.width, body.height
            )));
        }

        debug!(url = %url, width = body.width, height = body.height, "Fetched dimensions");
        Ok(ImageDimensions::new(body.width, body.height))
    }

    async fn fetch_placeholder(&self, url: &str) -> ProviderResult<String> {
        let request = self.placeholder_request(url)?;
        trace!(url = %url, "Fetching placeholder");

        let response = self
            .client
            .get(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to read body: {e}")))?;

        if bytes.is_empty() {
            return Err(ProviderError::MalformedBody("empty placeholder body".to_string()));
        }

        debug!(url = %url, size = bytes.len(), "Fetched placeholder");
        Ok(format!("data:{content_type};base64,{}", BASE64.encode(&bytes)))
    }
}
