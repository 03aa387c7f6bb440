//! Retrieval engine for Pictura
//!
//! The core of the system: an exact inner-product vector index over the
//! image corpus, the durable artifact pair it is persisted as, the
//! ingestion pipeline that builds it, and the search engine that serves
//! queries against it.
//!
//! Build time: dataset -> [`ingest::IngestPipeline`] -> ([`index::FlatIndex`],
//! identifier table) -> [`index::ArtifactStore::save`].
//!
//! Query time: raw query -> embedding adapter -> [`index::FlatIndex::search`]
//! -> [`search::SearchEngine`] maps row positions to identifiers.

/// Vector index and artifact persistence
pub mod index;
/// Corpus ingestion
pub mod ingest;
/// Query-time orchestration
pub mod search;

pub use index::{ArtifactStore, FlatIndex};
pub use ingest::{IngestPipeline, IngestReport};
pub use search::SearchEngine;
