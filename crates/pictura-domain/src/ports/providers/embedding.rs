//! Embedding provider port

use crate::error::Result;
use crate::value_objects::Embedding;
use async_trait::async_trait;

/// Cross-Modal Embedding Interface
///
/// Contract for adapters that map raw image bytes and UTF-8 text into a
/// shared similarity space. Implementations MUST return unit-L2-norm
/// vectors of a fixed dimensionality; the rest of the system relies on
/// this invariant and does not re-check it on every call.
///
/// Failure contract: an input that cannot be encoded (decode error, empty
/// input) yields `Error::Embedding` naming the offending item. A batch
/// call never silently drops items.
///
/// # Example
///
/// ```ignore
/// let query = provider.embed_text("a dog catching a frisbee").await?;
/// assert_eq!(query.dimensions, provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of raw images. Result order matches input order.
    async fn embed_images(&self, images: &[Vec<u8>]) -> Result<Vec<Embedding>>;

    /// Embed a single text query.
    async fn embed_text(&self, text: &str) -> Result<Embedding>;

    /// Dimensionality of every embedding this provider produces.
    ///
    /// Fixed for the lifetime of the provider; indexes are created with
    /// this value.
    fn dimensions(&self) -> usize;

    /// Name/identifier of this provider implementation
    fn provider_name(&self) -> &str;

    /// Health check for the provider (default implementation provided)
    async fn health_check(&self) -> Result<()> {
        self.embed_text("health check").await?;
        Ok(())
    }
}
