//! `pictura serve` - run the HTTP API

use super::resolve_provider;
use crate::routes::{rocket_config, search_rocket};
use crate::state::AppState;
use pictura_domain::error::{Error, Result};
use pictura_engine::{ArtifactStore, SearchEngine};
use pictura_infrastructure::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Start the search API server.
///
/// A missing or unloadable artifact is reported but does not prevent
/// startup: the server answers `/api/health` with `not_loaded` and search
/// requests with 503 until an artifact is built and the process restarted.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let provider = resolve_provider(&config.embedding)?;
    let provider_name = provider.provider_name().to_string();
    let engine = Arc::new(SearchEngine::new(provider));

    let store = ArtifactStore::new(&config.data.artifact_dir);
    match engine.load(&store).await {
        Ok(()) => info!(index_size = ?engine.index_size(), "index loaded"),
        Err(e) => warn!(error = %e, "starting without an index; run `pictura build` first"),
    }

    let state = AppState {
        engine,
        images_dir: config.data.images_dir.clone(),
        provider_name,
    };

    let rocket_cfg = rocket_config(&config.server)?;
    info!(
        address = %rocket_cfg.address,
        port = rocket_cfg.port,
        "search API listening"
    );

    search_rocket(state)
        .configure(rocket_cfg)
        .launch()
        .await
        .map_err(|e| Error::internal(format!("Rocket launch failed: {e}")))?;

    Ok(())
}
