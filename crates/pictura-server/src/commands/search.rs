//! `pictura search` - one-shot text query from the command line

use super::resolve_provider;
use pictura_domain::error::Result;
use pictura_domain::value_objects::SearchHit;
use pictura_engine::{ArtifactStore, SearchEngine};
use pictura_infrastructure::AppConfig;

/// Load the artifact and answer a single text query.
///
/// Unlike `serve`, a missing artifact is a hard failure here.
pub async fn search(config: &AppConfig, query: &str, k: usize) -> Result<Vec<SearchHit>> {
    let provider = resolve_provider(&config.embedding)?;
    let engine = SearchEngine::new(provider);
    engine
        .load(&ArtifactStore::new(&config.data.artifact_dir))
        .await?;
    engine.search_by_text(query, k).await
}
