//! `pictura evaluate` - retrieval quality and latency measurement
//!
//! Runs every caption in the captions file as a text query and checks
//! whether the captioned image appears in the top k results (Recall@k),
//! while timing each query.

use super::resolve_provider;
use pictura_domain::error::Result;
use pictura_engine::ingest::manifest::load_caption_pairs;
use pictura_engine::{ArtifactStore, SearchEngine};
use pictura_infrastructure::AppConfig;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Aggregated evaluation results
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    /// Number of caption queries executed
    pub queries: usize,
    /// Cutoff used for recall
    pub k: usize,
    /// Fraction of queries whose ground-truth image ranked in the top k
    pub recall_at_k: f64,
    /// Mean per-query latency in milliseconds
    pub mean_latency_ms: f64,
    /// Queries per second over the whole run
    pub qps: f64,
    /// Number of indexed images
    pub index_size: usize,
}

/// Evaluate retrieval over the captions file.
///
/// `limit` caps the number of caption queries; `None` runs them all.
pub async fn evaluate(config: &AppConfig, k: usize, limit: Option<usize>) -> Result<EvaluationReport> {
    let provider = resolve_provider(&config.embedding)?;
    let engine = SearchEngine::new(provider);
    engine
        .load(&ArtifactStore::new(&config.data.artifact_dir))
        .await?;
    let index_size = engine.index_size().unwrap_or(0);

    let mut pairs = load_caption_pairs(&config.data.captions_file)?;
    if let Some(limit) = limit {
        pairs.truncate(limit);
    }

    let mut hits_at_k = 0usize;
    let mut total_latency_ms = 0.0f64;
    let run_start = Instant::now();

    for (image, caption) in &pairs {
        let query_start = Instant::now();
        let results = engine.search_by_text(caption, k).await?;
        total_latency_ms += query_start.elapsed().as_secs_f64() * 1000.0;

        if results.iter().any(|hit| &hit.name == image) {
            hits_at_k += 1;
        }
    }

    let elapsed = run_start.elapsed().as_secs_f64();
    let queries = pairs.len();
    let report = EvaluationReport {
        queries,
        k,
        recall_at_k: if queries > 0 {
            hits_at_k as f64 / queries as f64
        } else {
            0.0
        },
        mean_latency_ms: if queries > 0 {
            total_latency_ms / queries as f64
        } else {
            0.0
        },
        qps: if elapsed > 0.0 {
            queries as f64 / elapsed
        } else {
            0.0
        },
        index_size,
    };

    info!(
        queries = report.queries,
        recall_at_k = report.recall_at_k,
        mean_latency_ms = report.mean_latency_ms,
        "evaluation complete"
    );
    Ok(report)
}
