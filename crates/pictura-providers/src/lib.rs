//! # Pictura - Embedding Providers
//!
//! Adapter implementations of the ports defined in `pictura-domain`.
//! Each adapter registers itself in the [`registry`] at compile time via
//! linkme distributed slices; the serving layer resolves one by name.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Embedding | `EmbeddingProvider` | ClipHttp, Null |
//!
//! ## Usage
//!
//! ```ignore
//! use pictura_providers::registry::{EmbeddingProviderConfig, resolve_embedding_provider};
//!
//! let config = EmbeddingProviderConfig::new("clip-http")
//!     .with_base_url("http://localhost:8000");
//! let provider = resolve_embedding_provider(&config)?;
//! ```

// Re-export domain types commonly used with providers
pub use pictura_domain::error::{Error, Result};
pub use pictura_domain::ports::EmbeddingProvider;

/// Provider-specific constants
pub mod constants;

/// Embedding provider implementations
pub mod embedding;

/// Provider auto-registration and resolution
pub mod registry;

/// Shared utilities for provider implementations
pub mod utils;

pub use embedding::{ClipHttpProvider, NullEmbeddingProvider};
