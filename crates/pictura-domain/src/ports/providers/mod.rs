//! External Provider Ports
//!
//! Contracts for external capabilities the engine consumes. The embedding
//! model is deliberately behind a port: the engine only requires that it
//! produces fixed-dimension, pre-normalized vectors.

/// Embedding provider port
pub mod embedding;

pub use embedding::EmbeddingProvider;
