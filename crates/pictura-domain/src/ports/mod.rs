//! Ports
//!
//! Trait contracts the domain depends on, implemented by outer layers.
//!
//! | Port | Description |
//! |------|-------------|
//! | `EmbeddingProvider` | Image and text embedding generation |
//! | `IngestObserver` | Progress reporting during corpus ingestion |

/// Ingest progress observer port
pub mod observer;
/// External provider ports
pub mod providers;

pub use observer::{IngestObserver, NoopObserver};
pub use providers::EmbeddingProvider;
