//! `pictura build` - ingest the corpus and persist the artifact pair

use super::resolve_provider;
use pictura_domain::error::Result;
use pictura_domain::ports::IngestObserver;
use pictura_engine::ingest::manifest::{load_manifest, scan_images_dir};
use pictura_engine::{ArtifactStore, IngestPipeline, IngestReport};
use pictura_infrastructure::AppConfig;
use tracing::{info, warn};

/// Logs ingestion progress as it happens.
struct LogObserver;

impl IngestObserver for LogObserver {
    fn on_progress(&self, processed: usize, total: usize) {
        info!(processed, total, "ingestion progress");
    }

    fn on_skip(&self, name: &str, reason: &str) {
        warn!(item = name, reason, "item skipped");
    }
}

/// Build the index from the configured corpus and save the artifact pair.
pub async fn build(config: &AppConfig) -> Result<IngestReport> {
    let provider = resolve_provider(&config.embedding)?;
    // Checking the adapter up front keeps a dead service from turning
    // into a long run of per-item failures.
    provider.health_check().await?;

    let manifest = if config.data.captions_file.exists() {
        load_manifest(&config.data.captions_file)?
    } else {
        warn!(
            captions_file = %config.data.captions_file.display(),
            "captions file not found, scanning images directory instead"
        );
        scan_images_dir(&config.data.images_dir)?
    };

    let pipeline = IngestPipeline::new(
        provider,
        config.ingest.batch_size,
        config.ingest.concurrency,
    );
    let (index, names, report) = pipeline
        .run(&config.data.images_dir, &manifest, &LogObserver)
        .await?;

    ArtifactStore::new(&config.data.artifact_dir)
        .save(&index, &names)
        .await?;

    info!(
        embedded = report.embedded,
        skipped = report.skipped,
        artifact_dir = %config.data.artifact_dir.display(),
        "build complete"
    );
    Ok(report)
}
