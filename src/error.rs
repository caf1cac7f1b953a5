use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Repository not found or private")]
    RepositoryNotFound,

    #[error("Model API key is not configured (set GEMINI_API_KEY or GOOGLE_API_KEY)")]
    CredentialMissing,

    #[error("All model attempts failed: {0}")]
    ModelUnavailable(String),

    #[error("Model returned malformed output: {0}")]
    MalformedModelOutput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // HTTP errors might contain upstream URLs or authentication info
            Error::Http(_) => "Upstream HTTP request failed".to_string(),

            // Internal errors might contain sensitive details
            Error::Internal(msg) => {
                if msg.to_lowercase().contains("password")
                    || msg.to_lowercase().contains("secret")
                    || msg.to_lowercase().contains("token")
                    || msg.to_lowercase().contains("key")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            // These errors are generally safe to log as-is
            Error::RepositoryNotFound => "Repository not found or private".to_string(),
            Error::CredentialMissing => "Model API key is not configured".to_string(),
            Error::ModelUnavailable(msg) => format!("All model attempts failed: {msg}"),
            Error::MalformedModelOutput(msg) => format!("Model returned malformed output: {msg}"),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }
}

// Implement IntoResponse for API error handling
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log the full error internally using the safe logging method
        tracing::error!("Request error: {}", self.log_safe());

        let (status, body) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Error::RepositoryNotFound => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Repository not found or private" }),
            ),
            Error::CredentialMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
            Error::ModelUnavailable(last) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "All model attempts failed", "details": last }),
            ),
            Error::MalformedModelOutput(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Model returned malformed output" }),
            ),
            Error::Http(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Upstream request failed" }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
