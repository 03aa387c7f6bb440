//! Provider Utilities
//!
//! Shared response handling for HTTP-backed embedding adapters.

use pictura_domain::error::{Error, Result};
use reqwest::Response;

fn embedding_error(provider: &str, context: &str, details: &str) -> Error {
    Error::embedding(format!("{provider} {context}: {details}"))
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse the body as JSON.
    ///
    /// Maps the common failure statuses to `Error::Embedding` messages
    /// that name the provider. Server-side statuses (5xx) map to
    /// `Error::ProviderUnavailable` instead, since they say nothing
    /// about the input.
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let code = status.as_u16();

            return Err(match code {
                401 => embedding_error(provider_name, "authentication failed", &error_text),
                429 => embedding_error(provider_name, "rate limit exceeded", &error_text),
                500..=599 => Error::provider_unavailable(format!(
                    "{provider_name} server error ({code}): {error_text}"
                )),
                _ => embedding_error(
                    provider_name,
                    &format!("request failed ({code})"),
                    &error_text,
                ),
            });
        }

        response
            .json()
            .await
            .map_err(|e| embedding_error(provider_name, "response parse failed", &e.to_string()))
    }
}
