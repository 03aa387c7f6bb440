//! Vector index and artifact persistence

/// Durable artifact pair (matrix + identifier table)
pub mod artifact;
/// Exact inner-product index
pub mod flat;

pub use artifact::ArtifactStore;
pub use flat::FlatIndex;
