//! Embedding Provider Implementations
//!
//! Adapters that map images and text queries into the shared similarity
//! space.
//!
//! | Provider | Type | Use |
//! |----------|------|-----|
//! | `ClipHttpProvider` | HTTP service | Production |
//! | `NullEmbeddingProvider` | Deterministic local | Tests, development |

pub mod clip_http;
pub mod null;

pub use clip_http::ClipHttpProvider;
pub use null::NullEmbeddingProvider;
