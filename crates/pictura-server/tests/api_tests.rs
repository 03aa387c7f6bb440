//! HTTP API tests against a Rocket local client

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pictura_domain::ports::{EmbeddingProvider, NoopObserver};
use pictura_engine::{ArtifactStore, IngestPipeline, SearchEngine};
use pictura_providers::NullEmbeddingProvider;
use pictura_server::AppState;
use pictura_server::routes::search_rocket;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use std::path::Path;
use std::sync::Arc;

fn write_png(dir: &Path, name: &str, seed: u8) -> Vec<u8> {
    let img = image::RgbImage::from_fn(8, 8, |x, y| {
        image::Rgb([seed, (x * 13) as u8, (y * 17) as u8])
    });
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    let bytes = buf.into_inner();
    std::fs::write(dir.join(name), &bytes).unwrap();
    bytes
}

/// Spin up a client over a three-image corpus; returns the bytes of
/// "b.png" for query-by-image tests.
async fn ready_client(dir: &Path) -> (Client, Vec<u8>) {
    write_png(dir, "a.png", 20);
    let probe = write_png(dir, "b.png", 140);
    write_png(dir, "c.png", 230);

    let provider: Arc<dyn EmbeddingProvider> = Arc::new(NullEmbeddingProvider::new());
    let manifest = vec!["a.png".into(), "b.png".into(), "c.png".into()];
    let (index, names, _) = IngestPipeline::new(Arc::clone(&provider), 2, 2)
        .run(dir, &manifest, &NoopObserver)
        .await
        .unwrap();
    let store = ArtifactStore::new(dir);
    store.save(&index, &names).await.unwrap();

    let engine = Arc::new(SearchEngine::new(provider));
    engine.load(&store).await.unwrap();

    let state = AppState {
        engine,
        images_dir: dir.to_path_buf(),
        provider_name: "null".to_string(),
    };
    let client = Client::tracked(search_rocket(state)).await.unwrap();
    (client, probe)
}

async fn unloaded_client(dir: &Path) -> Client {
    let state = AppState {
        engine: Arc::new(SearchEngine::new(Arc::new(NullEmbeddingProvider::new()))),
        images_dir: dir.to_path_buf(),
        provider_name: "null".to_string(),
    };
    Client::tracked(search_rocket(state)).await.unwrap()
}

#[tokio::test]
async fn health_reports_not_loaded_without_an_index() {
    let dir = tempfile::tempdir().unwrap();
    let client = unloaded_client(dir.path()).await;

    let response = client.get("/api/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["status"], "not_loaded");
    assert!(body.get("index_size").is_none());
}

#[tokio::test]
async fn health_reports_healthy_with_index_size() {
    let dir = tempfile::tempdir().unwrap();
    let (client, _) = ready_client(dir.path()).await;

    let response = client.get("/api/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "pictura");
    assert_eq!(body["index_size"], 3);
    assert_eq!(body["provider"], "null");
}

#[tokio::test]
async fn text_search_returns_ranked_results() {
    let dir = tempfile::tempdir().unwrap();
    let (client, _) = ready_client(dir.path()).await;

    let response = client
        .post("/api/search/text")
        .header(ContentType::JSON)
        .body(r#"{"query": "a dog in the park", "k": 2}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["count"], 2);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0]["score"].as_f64().unwrap() >= results[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn text_search_defaults_to_five_results() {
    let dir = tempfile::tempdir().unwrap();
    let (client, _) = ready_client(dir.path()).await;

    let response = client
        .post("/api/search/text")
        .header(ContentType::JSON)
        .body(r#"{"query": "anything"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    // Corpus holds 3 images; the default k of 5 is clamped by corpus size.
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn image_search_finds_the_query_image_itself() {
    let dir = tempfile::tempdir().unwrap();
    let (client, probe) = ready_client(dir.path()).await;

    let request = serde_json::json!({
        "image_b64": BASE64.encode(&probe),
        "k": 1,
    });
    let response = client
        .post("/api/search/image")
        .header(ContentType::JSON)
        .body(request.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["results"][0]["filename"], "b.png");
    assert_eq!(body["results"][0]["url"], "/images/b.png");
    assert!(body["results"][0]["score"].as_f64().unwrap() > 0.999);
}

#[tokio::test]
async fn invalid_base64_is_a_400() {
    let dir = tempfile::tempdir().unwrap();
    let (client, _) = ready_client(dir.path()).await;

    let response = client
        .post("/api/search/image")
        .header(ContentType::JSON)
        .body(r#"{"image_b64": "!!!not-base64!!!"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("base64"));
}

#[tokio::test]
async fn empty_query_is_a_400() {
    let dir = tempfile::tempdir().unwrap();
    let (client, _) = ready_client(dir.path()).await;

    let response = client
        .post("/api/search/text")
        .header(ContentType::JSON)
        .body(r#"{"query": "   "}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[tokio::test]
async fn zero_k_is_a_400() {
    let dir = tempfile::tempdir().unwrap();
    let (client, _) = ready_client(dir.path()).await;

    let response = client
        .post("/api/search/text")
        .header(ContentType::JSON)
        .body(r#"{"query": "a dog", "k": 0}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[tokio::test]
async fn search_without_an_index_is_a_503() {
    let dir = tempfile::tempdir().unwrap();
    let client = unloaded_client(dir.path()).await;

    let response = client
        .post("/api/search/text")
        .header(ContentType::JSON)
        .body(r#"{"query": "a dog"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::ServiceUnavailable);
}

#[tokio::test]
async fn corpus_image_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let (client, probe) = ready_client(dir.path()).await;

    let response = client.get("/images/b.png").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_bytes().await.unwrap(), probe);
}

#[tokio::test]
async fn unknown_image_is_a_404() {
    let dir = tempfile::tempdir().unwrap();
    let (client, _) = ready_client(dir.path()).await;

    let response = client.get("/images/missing.png").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}
