//! Null embedding provider for testing and development
//!
//! Deterministic, hash-based embeddings with no external service. The
//! same input always yields the same unit vector, and distinct inputs
//! almost surely yield near-orthogonal ones, which is enough structure
//! for exercising the index and the ingestion pipeline offline.

use async_trait::async_trait;

use pictura_domain::error::{Error, Result};
use pictura_domain::ports::EmbeddingProvider;
use pictura_domain::value_objects::Embedding;
use pictura_domain::value_objects::embedding::l2_normalize;

use crate::constants::EMBEDDING_DIMENSION_NULL;

const NULL_MODEL: &str = "null-test";

/// Null embedding provider
///
/// Decodes images for real, so corrupt payloads fail exactly like they
/// would against a live encoder, then derives the vector from a hash of
/// the decoded pixels. Text is hashed directly.
///
/// # Example
///
/// ```rust
/// use pictura_providers::embedding::NullEmbeddingProvider;
/// use pictura_domain::ports::EmbeddingProvider;
///
/// let provider = NullEmbeddingProvider::new();
/// assert_eq!(provider.dimensions(), 64);
/// assert_eq!(provider.provider_name(), "null");
/// ```
pub struct NullEmbeddingProvider {
    dimensions: usize,
}

impl NullEmbeddingProvider {
    /// Create a provider with the default dimensionality.
    pub fn new() -> Self {
        Self::with_dimensions(EMBEDDING_DIMENSION_NULL)
    }

    /// Create a provider with explicit dimensionality.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn vector_from_seed(&self, seed: u64) -> Embedding {
        // splitmix64 stream keyed by the input hash; centered so vectors
        // point in varied directions rather than crowding one orthant.
        let mut state = seed;
        let raw: Vec<f32> = (0..self.dimensions)
            .map(|_| {
                state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
                let mut z = state;
                z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
                z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
                z ^= z >> 31;
                (z >> 40) as f32 / (1u64 << 24) as f32 - 0.5
            })
            .collect();

        let mut vector = l2_normalize(&raw);
        if vector.iter().all(|v| *v == 0.0) {
            vector[0] = 1.0;
        }
        Embedding::new(vector, NULL_MODEL)
    }
}

impl Default for NullEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xCBF2_9CE4_8422_2325u64;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01B3);
    }
    hash
}

#[async_trait]
impl EmbeddingProvider for NullEmbeddingProvider {
    async fn embed_images(&self, images: &[Vec<u8>]) -> Result<Vec<Embedding>> {
        images
            .iter()
            .enumerate()
            .map(|(i, bytes)| {
                if bytes.is_empty() {
                    return Err(Error::embedding(format!("image {i} is empty")));
                }
                // Hash decoded pixels, not file bytes, so the vector is a
                // function of the image content.
                let decoded = image::load_from_memory(bytes)
                    .map_err(|e| Error::embedding(format!("image {i} failed to decode: {e}")))?;
                Ok(self.vector_from_seed(fnv1a(decoded.to_rgb8().as_raw())))
            })
            .collect()
    }

    async fn embed_text(&self, text: &str) -> Result<Embedding> {
        if text.trim().is_empty() {
            return Err(Error::embedding("text query is empty"));
        }
        Ok(self.vector_from_seed(fnv1a(text.as_bytes())))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "null"
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use std::sync::Arc;

use crate::registry::{EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry};

fn null_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    Ok(Arc::new(match config.dimensions {
        Some(dims) => NullEmbeddingProvider::with_dimensions(dims),
        None => NullEmbeddingProvider::new(),
    }))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static NULL_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "null",
    description: "Null provider for testing (deterministic hash-based embeddings)",
    factory: null_factory,
};
