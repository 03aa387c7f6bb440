//! Batch ingestion pipeline
//!
//! Transforms a corpus manifest into the (index, identifier table) pair,
//! resiliently: an item that cannot be read or embedded is logged and
//! skipped, never replaced by a placeholder vector. Batches are embedded
//! concurrently but merged in manifest order, so the output is
//! reproducible across runs over unchanged input.

use crate::index::FlatIndex;
use futures::StreamExt;
use pictura_domain::error::{Error, Result};
use pictura_domain::ports::{EmbeddingProvider, IngestObserver};
use pictura_domain::value_objects::Embedding;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Items listed in the manifest
    pub attempted: usize,
    /// Items that produced an index row
    pub embedded: usize,
    /// Items dropped (unreadable, undecodable, embedding failure)
    pub skipped: usize,
    /// One message per skipped item
    pub errors: Vec<String>,
}

impl IngestReport {
    fn record_skip(&mut self, observer: &dyn IngestObserver, name: &str, reason: &str) {
        self.skipped += 1;
        self.errors.push(format!("{name}: {reason}"));
        observer.on_skip(name, reason);
        warn!(item = name, reason, "skipping corpus item");
    }
}

/// What one batch produced, reassembled in batch order by the aggregator.
struct BatchOutcome {
    embedded: Vec<(String, Embedding)>,
    skipped: Vec<(String, String)>,
    attempted: usize,
}

/// Corpus ingestion pipeline.
///
/// Owns the index exclusively while building it; hands ownership to the
/// caller when done. Batch size trades memory for throughput and has no
/// effect on the output; concurrency controls how many batches are
/// in-flight against the embedding adapter at once.
pub struct IngestPipeline {
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
    concurrency: usize,
}

impl IngestPipeline {
    /// Create a pipeline over the given embedding adapter.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, batch_size: usize, concurrency: usize) -> Self {
        Self {
            provider,
            batch_size: batch_size.max(1),
            concurrency: concurrency.max(1),
        }
    }

    /// Run ingestion over the manifest.
    ///
    /// Returns the built index, the identifier table aligned to its rows,
    /// and a report of what was skipped. Postcondition:
    /// `names.len() == index.len() == report.embedded`.
    pub async fn run(
        &self,
        images_dir: &Path,
        manifest: &[String],
        observer: &dyn IngestObserver,
    ) -> Result<(FlatIndex, Vec<String>, IngestReport)> {
        let total = manifest.len();
        info!(
            items = total,
            batch_size = self.batch_size,
            concurrency = self.concurrency,
            provider = self.provider.provider_name(),
            "starting ingestion"
        );

        let mut index = FlatIndex::new(self.provider.dimensions());
        let mut names: Vec<String> = Vec::with_capacity(total);
        let mut report = IngestReport {
            attempted: total,
            ..IngestReport::default()
        };

        // Parallel processing, serial order-preserving aggregation:
        // `buffered` runs up to `concurrency` batches at once but yields
        // outcomes in input order.
        let images_dir = images_dir.to_path_buf();
        let mut outcomes = futures::stream::iter(
            manifest
                .chunks(self.batch_size)
                .map(|batch| batch.to_vec())
                .collect::<Vec<_>>(),
        )
        .map(|batch| {
            let provider = Arc::clone(&self.provider);
            let images_dir = images_dir.clone();
            async move { process_batch(provider, images_dir, batch).await }
        })
        .buffered(self.concurrency);

        let mut processed = 0usize;
        while let Some(outcome) = outcomes.next().await {
            let outcome = outcome?;
            processed += outcome.attempted;

            for (name, reason) in &outcome.skipped {
                report.record_skip(observer, name, reason);
            }
            for (name, embedding) in outcome.embedded {
                debug_assert!(
                    embedding.is_unit_norm(),
                    "adapter returned non-unit vector for {name}"
                );
                index.add(std::slice::from_ref(&embedding))?;
                names.push(name);
                report.embedded += 1;
            }
            observer.on_progress(processed, total);
        }

        debug!(
            embedded = report.embedded,
            skipped = report.skipped,
            "ingestion aggregation complete"
        );

        // A run where nothing embedded is an adapter outage, not a bad
        // corpus: fail instead of handing back an empty index that a
        // rebuild would then persist over a good artifact.
        if report.attempted > 0 && report.embedded == 0 {
            return Err(Error::embedding(format!(
                "all {} corpus items failed to embed, aborting",
                report.attempted
            )));
        }

        // The invariant the whole system hinges on.
        if names.len() != index.len() {
            return Err(Error::internal(format!(
                "ingestion produced {} names for {} index rows",
                names.len(),
                index.len()
            )));
        }

        info!(
            embedded = report.embedded,
            skipped = report.skipped,
            "ingestion finished"
        );
        Ok((index, names, report))
    }
}

/// Read and embed one batch. Per-item failures are recorded, not fatal.
async fn process_batch(
    provider: Arc<dyn EmbeddingProvider>,
    images_dir: PathBuf,
    batch: Vec<String>,
) -> Result<BatchOutcome> {
    let attempted = batch.len();
    let mut skipped: Vec<(String, String)> = Vec::new();
    let mut loaded: Vec<(String, Vec<u8>)> = Vec::with_capacity(batch.len());

    for name in batch {
        match tokio::fs::read(images_dir.join(&name)).await {
            Ok(bytes) => loaded.push((name, bytes)),
            Err(e) => skipped.push((name, format!("unreadable: {e}"))),
        }
    }

    let embedded = embed_resilient(provider.as_ref(), &loaded, &mut skipped).await?;

    Ok(BatchOutcome {
        embedded,
        skipped,
        attempted,
    })
}

/// Embed a batch; when the whole batch fails, retry item-wise so one bad
/// image cannot sink its batch-mates. An unavailable adapter is fatal at
/// either level: retrying items against a dead service would only turn
/// an outage into a silently empty index.
async fn embed_resilient(
    provider: &dyn EmbeddingProvider,
    loaded: &[(String, Vec<u8>)],
    skipped: &mut Vec<(String, String)>,
) -> Result<Vec<(String, Embedding)>> {
    if loaded.is_empty() {
        return Ok(Vec::new());
    }

    let bytes: Vec<Vec<u8>> = loaded.iter().map(|(_, b)| b.clone()).collect();
    match provider.embed_images(&bytes).await {
        Ok(embeddings) => {
            if embeddings.len() != loaded.len() {
                return Err(Error::internal(format!(
                    "adapter returned {} embeddings for {} images",
                    embeddings.len(),
                    loaded.len()
                )));
            }
            Ok(loaded
                .iter()
                .map(|(name, _)| name.clone())
                .zip(embeddings)
                .collect())
        }
        Err(batch_err @ Error::ProviderUnavailable { .. }) => Err(batch_err),
        Err(batch_err) => {
            debug!(error = %batch_err, "batch embedding failed, retrying item-wise");
            let mut embedded = Vec::new();
            for (name, item) in loaded {
                match provider.embed_images(std::slice::from_ref(item)).await {
                    Ok(mut one) if one.len() == 1 => {
                        embedded.push((name.clone(), one.remove(0)));
                    }
                    Ok(_) => {
                        return Err(Error::internal(
                            "adapter returned wrong embedding count for single image",
                        ));
                    }
                    Err(e @ Error::ProviderUnavailable { .. }) => return Err(e),
                    Err(e) => skipped.push((name.clone(), e.to_string())),
                }
            }
            Ok(embedded)
        }
    }
}
