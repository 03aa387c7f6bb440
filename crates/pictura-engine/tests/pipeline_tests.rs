//! End-to-end ingestion tests against the deterministic null provider

use pictura_domain::error::{Error, Result};
use pictura_domain::ports::{EmbeddingProvider, NoopObserver};
use pictura_domain::value_objects::Embedding;
use pictura_engine::IngestPipeline;
use pictura_engine::ingest::manifest::load_manifest;
use pictura_providers::NullEmbeddingProvider;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn write_png(dir: &Path, name: &str, seed: u8) {
    let img = image::RgbImage::from_fn(8, 8, |x, y| {
        image::Rgb([seed, (x * 30) as u8, (y * 30) as u8])
    });
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join(name), buf.into_inner()).unwrap();
}

fn pipeline() -> IngestPipeline {
    IngestPipeline::new(Arc::new(NullEmbeddingProvider::new()), 2, 2)
}

#[tokio::test]
async fn valid_corpus_ingests_fully_in_manifest_order() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "a.png", 10);
    write_png(dir.path(), "b.png", 120);
    write_png(dir.path(), "c.png", 240);
    let manifest = vec!["a.png".into(), "b.png".into(), "c.png".into()];

    let (index, names, report) = pipeline()
        .run(dir.path(), &manifest, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(names, manifest);
    assert_eq!(index.len(), 3);
    assert_eq!(report.attempted, 3);
    assert_eq!(report.embedded, 3);
    assert_eq!(report.skipped, 0);
}

#[tokio::test]
async fn corrupt_image_is_skipped_not_substituted() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "good1.png", 10);
    std::fs::write(dir.path().join("broken.png"), b"definitely not a png").unwrap();
    write_png(dir.path(), "good2.png", 200);
    let manifest = vec!["good1.png".into(), "broken.png".into(), "good2.png".into()];

    let (index, names, report) = pipeline()
        .run(dir.path(), &manifest, &NoopObserver)
        .await
        .unwrap();

    // The corrupt item must vanish entirely, never appear as a dummy row.
    assert_eq!(names, vec!["good1.png".to_string(), "good2.png".to_string()]);
    assert_eq!(index.len(), 2);
    assert_eq!(report.embedded, 2);
    assert_eq!(report.skipped, 1);
    assert!(report.errors[0].contains("broken.png"));
}

#[tokio::test]
async fn missing_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "present.png", 50);
    let manifest = vec!["present.png".into(), "absent.png".into()];

    let (index, names, report) = pipeline()
        .run(dir.path(), &manifest, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(names, vec!["present.png".to_string()]);
    assert_eq!(index.len(), 1);
    assert_eq!(report.skipped, 1);
    assert!(report.errors[0].contains("unreadable"));
}

/// Adapter standing in for a sidecar that is down: every call fails.
struct DeadAdapter {
    error: fn() -> Error,
}

#[async_trait::async_trait]
impl EmbeddingProvider for DeadAdapter {
    async fn embed_images(&self, _images: &[Vec<u8>]) -> Result<Vec<Embedding>> {
        Err((self.error)())
    }

    async fn embed_text(&self, _text: &str) -> Result<Embedding> {
        Err((self.error)())
    }

    fn dimensions(&self) -> usize {
        8
    }

    fn provider_name(&self) -> &str {
        "dead"
    }
}

#[tokio::test]
async fn total_adapter_outage_fails_the_run_instead_of_emptying_the_index() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "a.png", 10);
    write_png(dir.path(), "b.png", 120);
    write_png(dir.path(), "c.png", 240);
    let manifest = vec!["a.png".into(), "b.png".into(), "c.png".into()];

    // Generic per-call failures over a fully valid corpus: nothing
    // embeds, so the run must fail rather than return an empty index
    // that a rebuild would persist over a good artifact.
    let adapter = DeadAdapter {
        error: || Error::embedding("HTTP request failed: connection refused"),
    };
    let result = IngestPipeline::new(Arc::new(adapter), 2, 2)
        .run(dir.path(), &manifest, &NoopObserver)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn unavailable_adapter_aborts_without_itemwise_retry() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "a.png", 10);
    write_png(dir.path(), "b.png", 120);
    let manifest = vec!["a.png".into(), "b.png".into()];

    let adapter = DeadAdapter {
        error: || Error::provider_unavailable("connection failed: connection refused"),
    };
    let err = IngestPipeline::new(Arc::new(adapter), 2, 2)
        .run(dir.path(), &manifest, &NoopObserver)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ProviderUnavailable { .. }));
}

#[tokio::test]
async fn repeated_runs_over_unchanged_input_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    for (name, seed) in [("x.png", 1u8), ("y.png", 2), ("z.png", 3)] {
        write_png(dir.path(), name, seed);
    }
    let manifest = vec!["x.png".into(), "y.png".into(), "z.png".into()];

    let (first, first_names, _) = pipeline()
        .run(dir.path(), &manifest, &NoopObserver)
        .await
        .unwrap();
    let (second, second_names, _) = pipeline()
        .run(dir.path(), &manifest, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first_names, second_names);
}

#[tokio::test]
async fn observer_sees_progress_and_skips() {
    struct CountingObserver {
        progress_calls: AtomicUsize,
        skips: AtomicUsize,
    }
    impl pictura_domain::ports::IngestObserver for CountingObserver {
        fn on_progress(&self, _processed: usize, _total: usize) {
            self.progress_calls.fetch_add(1, Ordering::SeqCst);
        }
        fn on_skip(&self, _name: &str, _reason: &str) {
            self.skips.fetch_add(1, Ordering::SeqCst);
        }
    }

    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "ok.png", 77);
    std::fs::write(dir.path().join("bad.png"), b"nope").unwrap();
    let manifest = vec!["ok.png".into(), "bad.png".into()];

    let observer = CountingObserver {
        progress_calls: AtomicUsize::new(0),
        skips: AtomicUsize::new(0),
    };
    pipeline()
        .run(dir.path(), &manifest, &observer)
        .await
        .unwrap();

    assert!(observer.progress_calls.load(Ordering::SeqCst) >= 1);
    assert_eq!(observer.skips.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn manifest_from_captions_file_feeds_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "dog.jpg", 11);
    write_png(dir.path(), "cat.jpg", 22);

    let captions = dir.path().join("captions.csv");
    std::fs::write(
        &captions,
        "image,caption\ndog.jpg,a dog running\ndog.jpg,a dog on grass\ncat.jpg,a cat sleeping\n",
    )
    .unwrap();

    let manifest = load_manifest(&captions).unwrap();
    assert_eq!(manifest, vec!["dog.jpg".to_string(), "cat.jpg".to_string()]);

    let (index, names, _) = pipeline()
        .run(dir.path(), &manifest, &NoopObserver)
        .await
        .unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(names, manifest);
}
