//! Ingest progress observer port
//!
//! Progress reporting is a capability passed into the ingestion pipeline
//! rather than something wired through its control flow, so callers (CLI
//! progress output, tests) decide what to do with it.

/// Observer notified as the ingestion pipeline makes progress.
///
/// Callbacks are invoked from the single aggregation task, in corpus
/// order; implementations do not need to be re-entrant.
pub trait IngestObserver: Send + Sync {
    /// A batch finished embedding. `processed` counts items attempted so
    /// far (including skipped ones) out of `total`.
    fn on_progress(&self, processed: usize, total: usize);

    /// An item was skipped and will not appear in the index.
    fn on_skip(&self, name: &str, reason: &str);
}

/// Observer that ignores all notifications.
pub struct NoopObserver;

impl IngestObserver for NoopObserver {
    fn on_progress(&self, _processed: usize, _total: usize) {}

    fn on_skip(&self, _name: &str, _reason: &str) {}
}
