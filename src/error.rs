//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::info;

/// Message returned when no API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "Server misconfigured: missing OpenAI API key";

/// Message returned when the images API answers without an image.
pub const INVALID_UPSTREAM_MESSAGE: &str = "Invalid response from OpenAI";

/// definitions for the sackboy studio application.
#[derive(Debug)]
pub enum StudioError {
    /// When you didn't send the right thing
    BadRequest(String),
    /// No API key, the server can't do its job
    MissingApiKey,
    /// The images API failed or sent back something unusable
    Upstream(String),
}

impl StudioError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            StudioError::BadRequest(_) => StatusCode::BAD_REQUEST,
            StudioError::MissingApiKey | StudioError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for StudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudioError::BadRequest(message) | StudioError::Upstream(message) => {
                f.write_str(message)
            }
            StudioError::MissingApiKey => f.write_str(MISSING_API_KEY_MESSAGE),
        }
    }
}

impl std::error::Error for StudioError {}

impl From<reqwest::Error> for StudioError {
    fn from(err: reqwest::Error) -> Self {
        StudioError::Upstream(err.to_string())
    }
}

/// JSON body of every failed API response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human readable message, shown as-is by the page.
    pub error: String,
}

impl IntoResponse for StudioError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match &self {
            StudioError::BadRequest(message) => {
                info!("Bad request received: {}", message);
            }
            StudioError::MissingApiKey => {
                tracing::error!("Refusing request, no OpenAI API key configured");
            }
            StudioError::Upstream(message) => {
                tracing::error!("Images API error: {}", message);
            }
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: StudioError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        (
            status,
            serde_json::from_slice(&bytes).expect("error body is json"),
        )
    }

    #[tokio::test]
    async fn bad_request_is_400_with_message() {
        let (status, body) = body_json(StudioError::BadRequest("Missing image file".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Missing image file"}));
    }

    #[tokio::test]
    async fn missing_key_is_500() {
        let (status, body) = body_json(StudioError::MissingApiKey).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], MISSING_API_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn upstream_text_is_relayed() {
        let (status, body) =
            body_json(StudioError::Upstream("{\"error\":\"quota\"}".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "{\"error\":\"quota\"}");
    }
}
