//! Search endpoints

use super::error::{ApiError, to_api_error};
use crate::state::AppState;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pictura_domain::constants::DEFAULT_TOP_K;
use pictura_domain::value_objects::SearchHit;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, post};
use serde::{Deserialize, Serialize};

/// Body of a text search request
#[derive(Debug, Deserialize)]
pub struct TextSearchRequest {
    /// Natural-language query
    pub query: String,
    /// Number of results to return (defaults to 5)
    pub k: Option<usize>,
}

/// Body of an image search request
#[derive(Debug, Deserialize)]
pub struct ImageSearchRequest {
    /// Base64-encoded image bytes
    pub image_b64: String,
    /// Number of results to return (defaults to 5)
    pub k: Option<usize>,
}

/// One ranked result
#[derive(Debug, Serialize)]
pub struct HitResponse {
    /// Image filename within the corpus
    pub filename: String,
    /// Cosine similarity to the query
    pub score: f32,
    /// Path this image is served at
    pub url: String,
}

/// Response for both search endpoints
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Ranked results, best first
    pub results: Vec<HitResponse>,
    /// Convenience count of results
    pub count: usize,
}

impl From<Vec<SearchHit>> for SearchResponse {
    fn from(hits: Vec<SearchHit>) -> Self {
        let results: Vec<HitResponse> = hits
            .into_iter()
            .map(|hit| HitResponse {
                url: format!("/images/{}", hit.name),
                filename: hit.name,
                score: hit.score,
            })
            .collect();
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Text query against the image corpus.
///
/// POST /api/search/text
#[post("/search/text", data = "<request>")]
pub async fn search_text(
    state: &State<AppState>,
    request: Json<TextSearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let k = request.k.unwrap_or(DEFAULT_TOP_K);
    let hits = state
        .engine
        .search_by_text(&request.query, k)
        .await
        .map_err(|e| to_api_error(&e))?;
    Ok(Json(hits.into()))
}

/// Image query (base64 payload) against the corpus.
///
/// POST /api/search/image
#[post("/search/image", data = "<request>")]
pub async fn search_image(
    state: &State<AppState>,
    request: Json<ImageSearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let bytes = BASE64.decode(request.image_b64.as_bytes()).map_err(|e| {
        (
            Status::BadRequest,
            Json(super::ErrorResponse {
                error: format!("image_b64 is not valid base64: {e}"),
            }),
        )
    })?;

    let k = request.k.unwrap_or(DEFAULT_TOP_K);
    let hits = state
        .engine
        .search_by_image(&bytes, k)
        .await
        .map_err(|e| to_api_error(&e))?;
    Ok(Json(hits.into()))
}
