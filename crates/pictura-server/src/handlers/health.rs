//! Health endpoint

use crate::state::AppState;
use pictura_domain::constants::SERVICE_NAME;
use rocket::serde::json::Json;
use rocket::{State, get};
use serde::Serialize;

/// Response for the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when an index is loaded, "not_loaded" otherwise
    pub status: String,
    /// Service identifier
    pub service: String,
    /// Number of indexed images, when loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_size: Option<usize>,
    /// Active embedding provider
    pub provider: String,
}

/// Engine readiness and index size.
///
/// GET /api/health
///
/// Always answers 200; readiness is carried in the body so probes can
/// distinguish "up but not loaded" from "down".
#[get("/health")]
pub fn health(state: &State<AppState>) -> Json<HealthResponse> {
    let index_size = state.engine.index_size();
    Json(HealthResponse {
        status: if index_size.is_some() {
            "healthy".to_string()
        } else {
            "not_loaded".to_string()
        },
        service: SERVICE_NAME.to_string(),
        index_size,
        provider: state.provider_name.clone(),
    })
}
