//! Domain layer for Pictura
//!
//! Core business types for cross-modal image retrieval: embedding and
//! search value objects, the error taxonomy, and the ports implemented
//! by the outer layers (embedding adapters, ingest observers).
//!
//! This crate is dependency-light by design: no IO, no runtime. Everything
//! here is either a value or a contract.

/// Shared constants
pub mod constants;
/// Error handling types
pub mod error;
/// Ports (trait contracts) implemented by outer layers
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::{Embedding, SearchHit};
