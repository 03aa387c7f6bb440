//! Embedding Provider Registry
//!
//! Auto-registration for embedding adapters using linkme distributed
//! slices. Providers register themselves via
//! `#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]` and are discovered
//! at runtime by name.

use std::sync::Arc;

use pictura_domain::ports::EmbeddingProvider;

/// Configuration for embedding provider creation
///
/// Carries every option an adapter might need; each adapter uses what it
/// needs and ignores the rest.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingProviderConfig {
    /// Provider name (e.g., "clip-http", "null")
    pub provider: String,
    /// Model name/identifier
    pub model: Option<String>,
    /// Base URL for HTTP-backed adapters
    pub base_url: Option<String>,
    /// Embedding dimensions (if configurable)
    pub dimensions: Option<usize>,
    /// Request timeout in seconds for HTTP-backed adapters
    pub timeout_secs: Option<u64>,
}

impl EmbeddingProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the dimensions
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Registry entry for embedding providers
///
/// Each adapter registers itself with one of these via
/// `#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]`.
pub struct EmbeddingProviderEntry {
    /// Unique provider name (e.g., "clip-http", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instances
    pub factory: fn(&EmbeddingProviderConfig) -> Result<Arc<dyn EmbeddingProvider>, String>,
}

// Auto-collection via linkme distributed slices - adapters submit entries at compile time
#[linkme::distributed_slice]
pub static EMBEDDING_PROVIDERS: [EmbeddingProviderEntry] = [..];

/// Resolve an embedding provider by name from the registry.
///
/// # Example
///
/// ```ignore
/// let config = EmbeddingProviderConfig::new("clip-http")
///     .with_base_url("http://localhost:8000")
///     .with_model("clip-vit-base-patch32");
/// let provider = resolve_embedding_provider(&config)?;
/// ```
pub fn resolve_embedding_provider(
    config: &EmbeddingProviderConfig,
) -> Result<Arc<dyn EmbeddingProvider>, String> {
    for entry in EMBEDDING_PROVIDERS {
        if entry.name == config.provider {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = EMBEDDING_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown embedding provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered embedding providers as (name, description) pairs.
pub fn list_embedding_providers() -> Vec<(&'static str, &'static str)> {
    EMBEDDING_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_sets_all_fields() {
        let config = EmbeddingProviderConfig::new("test")
            .with_model("model-1")
            .with_base_url("http://localhost")
            .with_dimensions(384)
            .with_timeout_secs(5);

        assert_eq!(config.provider, "test");
        assert_eq!(config.model, Some("model-1".to_string()));
        assert_eq!(config.base_url, Some("http://localhost".to_string()));
        assert_eq!(config.dimensions, Some(384));
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn unknown_provider_names_the_available_ones() {
        let err = resolve_embedding_provider(&EmbeddingProviderConfig::new("no-such-provider"))
            .err()
            .unwrap();
        assert!(err.contains("no-such-provider"));
        assert!(err.contains("Available providers"));
    }

    #[test]
    fn builtin_providers_are_registered() {
        let names: Vec<&str> = list_embedding_providers()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert!(names.contains(&"null"));
        assert!(names.contains(&"clip-http"));
    }
}
