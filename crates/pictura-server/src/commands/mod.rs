//! CLI command implementations
//!
//! Each subcommand of the `pictura` binary lives here: `build` produces
//! the artifact pair, `serve` runs the HTTP API, `search` answers a
//! one-shot query, `evaluate` measures retrieval quality and latency.

mod build;
mod evaluate;
mod search;
mod serve;

pub use build::build;
pub use evaluate::{EvaluationReport, evaluate};
pub use search::search;
pub use serve::serve;

use pictura_domain::error::{Error, Result};
use pictura_domain::ports::EmbeddingProvider;
use pictura_infrastructure::config::EmbeddingConfig;
use pictura_providers::registry::{EmbeddingProviderConfig, resolve_embedding_provider};
use std::sync::Arc;

/// Resolve the configured embedding adapter from the provider registry.
pub fn resolve_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let mut provider_config = EmbeddingProviderConfig::new(&config.provider);
    if let Some(model) = &config.model {
        provider_config = provider_config.with_model(model);
    }
    if let Some(base_url) = &config.base_url {
        provider_config = provider_config.with_base_url(base_url);
    }
    if let Some(dimensions) = config.dimensions {
        provider_config = provider_config.with_dimensions(dimensions);
    }
    if let Some(timeout_secs) = config.timeout_secs {
        provider_config = provider_config.with_timeout_secs(timeout_secs);
    }
    resolve_embedding_provider(&provider_config).map_err(Error::config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_provider_resolves_with_configured_dimensions() {
        let config = EmbeddingConfig {
            provider: "null".to_string(),
            dimensions: Some(48),
            ..EmbeddingConfig::default()
        };
        let provider = resolve_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "null");
        assert_eq!(provider.dimensions(), 48);
    }

    #[test]
    fn unknown_provider_is_a_config_error() {
        let config = EmbeddingConfig {
            provider: "does-not-exist".to_string(),
            ..EmbeddingConfig::default()
        };
        assert!(matches!(
            resolve_provider(&config),
            Err(Error::Config { .. })
        ));
    }
}
