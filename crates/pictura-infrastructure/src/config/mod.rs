//! Configuration
//!
//! Typed configuration with layered loading (defaults, TOML file,
//! environment variables).

/// Configuration loader
pub mod loader;
/// Configuration types
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DataConfig, EmbeddingConfig, IngestConfig, LoggingConfig, ServerConfig};
