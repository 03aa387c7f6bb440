//! CLIP HTTP Embedding Provider
//!
//! Implements the `EmbeddingProvider` port against a CLIP encoder served
//! over HTTP (one endpoint for images, one for text). Images are sent as
//! base64 payloads; the encoder's raw vectors are L2-normalized here so
//! the rest of the system can rely on the unit-norm invariant.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;

use pictura_domain::error::{Error, Result};
use pictura_domain::ports::EmbeddingProvider;
use pictura_domain::value_objects::Embedding;
use pictura_domain::value_objects::embedding::l2_normalize;

use crate::constants::CONTENT_TYPE_JSON;

/// CLIP embedding provider backed by an HTTP encoder service
///
/// Receives its HTTP client via constructor injection.
///
/// ## Example
///
/// ```rust,no_run
/// use pictura_providers::embedding::ClipHttpProvider;
/// use reqwest::Client;
/// use std::time::Duration;
///
/// fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::builder()
///         .timeout(Duration::from_secs(30))
///         .build()?;
///     let provider = ClipHttpProvider::new(
///         "http://localhost:8000".to_string(),
///         "clip-vit-base-patch32".to_string(),
///         512,
///         Duration::from_secs(30),
///         client,
///     );
///     Ok(())
/// }
/// ```
pub struct ClipHttpProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
    http_client: Client,
}

impl ClipHttpProvider {
    /// Create a new CLIP HTTP provider.
    ///
    /// # Arguments
    /// * `base_url` - Encoder service URL (e.g., "http://localhost:8000")
    /// * `model` - Model name reported to the service
    /// * `dimensions` - Dimensionality the encoder is expected to produce
    /// * `timeout` - Request timeout duration
    /// * `http_client` - Reqwest HTTP client for making API requests
    pub fn new(
        base_url: String,
        model: String,
        dimensions: usize,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            base_url,
            model,
            dimensions,
            timeout,
            http_client,
        }
    }

    /// Get the model name for this provider
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn post_json(&self, endpoint: &str, payload: serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .http_client
            .post(format!(
                "{}/{endpoint}",
                self.base_url.trim_end_matches('/')
            ))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::provider_unavailable(format!(
                        "request timed out after {:?}",
                        self.timeout
                    ))
                } else if e.is_connect() {
                    Error::provider_unavailable(format!("connection failed: {e}"))
                } else {
                    Error::embedding(format!("HTTP request failed: {e}"))
                }
            })?;

        crate::utils::HttpResponseUtils::check_and_parse(response, "CLIP").await
    }

    /// Parse, validate, and normalize an embedding from response data.
    fn parse_embedding(&self, response_data: &serde_json::Value) -> Result<Embedding> {
        let raw = response_data["embedding"]
            .as_array()
            .ok_or_else(|| {
                Error::embedding("invalid response format: missing embedding array")
            })?
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| Error::embedding("embedding array holds a non-numeric value"))
            })
            .collect::<Result<Vec<f32>>>()?;

        if raw.len() != self.dimensions {
            return Err(Error::dimension_mismatch(self.dimensions, raw.len()));
        }
        if raw.iter().any(|v| !v.is_finite()) {
            return Err(Error::embedding("encoder returned a non-finite value"));
        }
        if raw.iter().all(|v| *v == 0.0) {
            return Err(Error::embedding("encoder returned a zero vector"));
        }

        Ok(Embedding::new(l2_normalize(&raw), self.model.clone()))
    }
}

#[async_trait]
impl EmbeddingProvider for ClipHttpProvider {
    async fn embed_images(&self, images: &[Vec<u8>]) -> Result<Vec<Embedding>> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        // The encoder endpoint takes one image per request; process
        // sequentially, callers parallelize across batches.
        let mut results = Vec::with_capacity(images.len());
        for (i, bytes) in images.iter().enumerate() {
            // Reject undecodable payloads locally so the error names the
            // item instead of surfacing as an opaque encoder 4xx.
            image::load_from_memory(bytes)
                .map_err(|e| Error::embedding(format!("image {i} failed to decode: {e}")))?;

            let payload = serde_json::json!({
                "model": self.model,
                "image": BASE64.encode(bytes),
            });
            let response_data = self.post_json("embed/image", payload).await?;
            results.push(self.parse_embedding(&response_data)?);
        }

        tracing::debug!(count = results.len(), "embedded image batch");
        Ok(results)
    }

    async fn embed_text(&self, text: &str) -> Result<Embedding> {
        if text.trim().is_empty() {
            return Err(Error::embedding("text query is empty"));
        }

        let payload = serde_json::json!({
            "model": self.model,
            "text": text,
        });
        let response_data = self.post_json("embed/text", payload).await?;
        self.parse_embedding(&response_data)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "clip-http"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use std::sync::Arc;

use crate::constants::{
    CLIP_DEFAULT_BASE_URL, CLIP_DEFAULT_MODEL, EMBEDDING_DIMENSION_CLIP, HTTP_TIMEOUT_SECS,
};
use crate::registry::{EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry};

fn clip_http_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| CLIP_DEFAULT_BASE_URL.to_string());
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| CLIP_DEFAULT_MODEL.to_string());
    let dimensions = config.dimensions.unwrap_or(EMBEDDING_DIMENSION_CLIP);
    let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(HTTP_TIMEOUT_SECS));
    let http_client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

    Ok(Arc::new(ClipHttpProvider::new(
        base_url, model, dimensions, timeout, http_client,
    )))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static CLIP_HTTP_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "clip-http",
    description: "CLIP encoder served over HTTP (image and text endpoints)",
    factory: clip_http_factory,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ClipHttpProvider {
        ClipHttpProvider::new(
            "http://localhost:8000".to_string(),
            "clip-vit-base-patch32".to_string(),
            4,
            Duration::from_secs(5),
            Client::new(),
        )
    }

    #[test]
    fn parse_normalizes_the_raw_vector() {
        let data = serde_json::json!({ "embedding": [3.0, 4.0, 0.0, 0.0] });
        let embedding = provider().parse_embedding(&data).unwrap();
        assert!(embedding.is_unit_norm());
        assert!((embedding.vector[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn parse_rejects_wrong_dimensionality() {
        let data = serde_json::json!({ "embedding": [1.0, 2.0] });
        assert!(matches!(
            provider().parse_embedding(&data),
            Err(Error::DimensionMismatch { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn parse_rejects_missing_array() {
        let data = serde_json::json!({ "vector": [1.0] });
        assert!(provider().parse_embedding(&data).is_err());
    }

    #[test]
    fn parse_rejects_zero_vector() {
        let data = serde_json::json!({ "embedding": [0.0, 0.0, 0.0, 0.0] });
        assert!(provider().parse_embedding(&data).is_err());
    }
}
