//! Corpus ingestion
//!
//! Turns the image dataset into the (vectors, identifiers) pair consumed
//! by the flat index, batch by batch, skipping items that cannot be
//! embedded.

/// Corpus manifest loading
pub mod manifest;
/// Batch ingestion pipeline
pub mod pipeline;

pub use pipeline::{IngestPipeline, IngestReport};
