//! Error-to-response mapping

use pictura_domain::Error;
use rocket::http::Status;
use rocket::serde::json::Json;
use serde::Serialize;

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description
    pub error: String,
}

/// Status + body pair handlers return on failure.
pub type ApiError = (Status, Json<ErrorResponse>);

/// Map a domain error onto an HTTP status.
///
/// Client mistakes (bad query, undecodable image) map to 400. An engine
/// that has no index yet and an unreachable embedding adapter both map
/// to 503, since neither is something the caller did wrong. Everything
/// else is a 500.
pub fn to_api_error(err: &Error) -> ApiError {
    let status = match err {
        Error::EngineNotReady | Error::ProviderUnavailable { .. } => Status::ServiceUnavailable,
        Error::InvalidArgument { .. }
        | Error::Embedding { .. }
        | Error::DimensionMismatch { .. } => Status::BadRequest,
        _ => Status::InternalServerError,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
