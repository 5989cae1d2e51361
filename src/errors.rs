//! Error types for og-preview.
//!
//! Uses `thiserror` for library-style error definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while looking up an event in the backend.
///
/// The request handler never surfaces these to the client: every variant
/// degrades to the generic site preview.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Backend URL or key is not configured
    #[error("backend credentials not configured: {0} is missing")]
    MissingCredentials(&'static str),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend returned an error status
    #[error("backend API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// No row matched the requested id
    #[error("event {0} not found")]
    NotFound(String),
}

/// Errors that escape the request handler.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// The inbound request could not be turned into an absolute URL
    #[error("malformed request URL: {0}")]
    MalformedUrl(String),
}

impl IntoResponse for PreviewError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "rejecting request");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::MissingCredentials("SUPABASE_URL");
        assert_eq!(
            err.to_string(),
            "backend credentials not configured: SUPABASE_URL is missing"
        );

        let err = FetchError::Api {
            status: 401,
            message: "bad key".into(),
        };
        assert_eq!(err.to_string(), "backend API error (HTTP 401): bad key");
    }

    #[test]
    fn test_malformed_url_is_server_error() {
        let response = PreviewError::MalformedUrl("no host".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
