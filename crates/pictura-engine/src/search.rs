//! Search engine
//!
//! Query-time orchestration: embed the input, search the index, map row
//! positions back to identifiers. An explicit value with an explicit
//! lifecycle (`Unloaded` -> `Ready`) constructed once per process and
//! passed by handle to request handlers; there is no ambient global.

use crate::index::{ArtifactStore, FlatIndex};
use pictura_domain::error::{Error, Result};
use pictura_domain::ports::EmbeddingProvider;
use pictura_domain::value_objects::SearchHit;
use std::sync::{Arc, RwLock};
use tracing::{info, instrument};

/// Immutable snapshot shared by all in-flight searches.
struct Loaded {
    index: FlatIndex,
    names: Vec<String>,
}

enum State {
    Unloaded,
    Ready(Arc<Loaded>),
}

/// The single entry point consumed by the serving layer.
///
/// Starts `Unloaded`; [`SearchEngine::load`] transitions to `Ready` only
/// after the artifact pair loads consistently. Queries against an
/// `Unloaded` engine fail fast with `Error::EngineNotReady`; the engine
/// never lazily loads on the query path.
///
/// After `Ready`, the index and identifier table are immutable and shared
/// by concurrent searches without locking beyond an `Arc` clone; a
/// rebuild writes a fresh artifact pair and only affects what a future
/// `load` sees.
pub struct SearchEngine {
    provider: Arc<dyn EmbeddingProvider>,
    state: RwLock<State>,
}

impl SearchEngine {
    /// Create an unloaded engine over the given embedding adapter.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            state: RwLock::new(State::Unloaded),
        }
    }

    /// Whether the engine has a loaded index.
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read().expect("state lock poisoned"), State::Ready(_))
    }

    /// Number of indexed corpus items, if ready.
    pub fn index_size(&self) -> Option<usize> {
        match &*self.state.read().expect("state lock poisoned") {
            State::Ready(loaded) => Some(loaded.index.len()),
            State::Unloaded => None,
        }
    }

    /// Load the artifact pair and transition to `Ready`.
    ///
    /// On failure the engine stays `Unloaded` and the cause is returned,
    /// never swallowed. Loading again replaces the previous snapshot;
    /// in-flight searches keep the one they started with.
    pub async fn load(&self, store: &ArtifactStore) -> Result<()> {
        let (index, names) = store.load().await?;

        if index.len() > 0 && index.dims() != self.provider.dimensions() {
            return Err(Error::dimension_mismatch(
                self.provider.dimensions(),
                index.dims(),
            ));
        }

        info!(
            rows = index.len(),
            provider = self.provider.provider_name(),
            "search engine ready"
        );
        *self.state.write().expect("state lock poisoned") = State::Ready(Arc::new(Loaded {
            index,
            names,
        }));
        Ok(())
    }

    /// Text -> image search.
    #[instrument(skip(self))]
    pub async fn search_by_text(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(Error::invalid_argument("query must not be empty"));
        }
        let loaded = self.ready_snapshot()?;
        let embedding = self.provider.embed_text(query).await?;
        Self::run_search(&loaded, &embedding.vector, k)
    }

    /// Image -> image search over raw image bytes.
    #[instrument(skip(self, image_bytes))]
    pub async fn search_by_image(&self, image_bytes: &[u8], k: usize) -> Result<Vec<SearchHit>> {
        if image_bytes.is_empty() {
            return Err(Error::invalid_argument("image payload must not be empty"));
        }
        let loaded = self.ready_snapshot()?;
        let payload = [image_bytes.to_vec()];
        let mut embeddings = self.provider.embed_images(&payload).await?;
        let embedding = embeddings
            .pop()
            .ok_or_else(|| Error::embedding("adapter returned no embedding for query image"))?;
        Self::run_search(&loaded, &embedding.vector, k)
    }

    fn ready_snapshot(&self) -> Result<Arc<Loaded>> {
        match &*self.state.read().expect("state lock poisoned") {
            State::Ready(loaded) => Ok(Arc::clone(loaded)),
            State::Unloaded => Err(Error::EngineNotReady),
        }
    }

    fn run_search(loaded: &Loaded, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if k == 0 {
            return Err(Error::invalid_argument("k must be a positive integer"));
        }

        let positions = loaded.index.search(query, k)?;

        // Positions are guaranteed in-bounds by the build/load invariant;
        // a miss here is an internal consistency violation, not a user error.
        positions
            .into_iter()
            .map(|(row, score)| {
                loaded
                    .names
                    .get(row)
                    .map(|name| SearchHit::new(name.clone(), score))
                    .ok_or_else(|| {
                        Error::internal(format!(
                            "row {} out of bounds for identifier table of {}",
                            row,
                            loaded.names.len()
                        ))
                    })
            })
            .collect()
    }
}
