//! Value Objects
//!
//! Immutable values exchanged between the engine, the providers and the
//! serving layer.

/// Embedding value object and norm helpers
pub mod embedding;
/// Search result value object
pub mod search;

pub use embedding::Embedding;
pub use search::SearchHit;
