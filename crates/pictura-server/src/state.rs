//! Shared request-handler state

use pictura_engine::SearchEngine;
use std::path::PathBuf;
use std::sync::Arc;

/// State managed by Rocket and shared by all handlers.
pub struct AppState {
    /// The search engine handle (may still be unloaded)
    pub engine: Arc<SearchEngine>,
    /// Directory the corpus images are served from
    pub images_dir: PathBuf,
    /// Name of the active embedding provider, for health reporting
    pub provider_name: String,
}
