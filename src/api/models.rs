use serde::{Deserialize, Serialize};

/// POST /evaluate request body
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    /// GitHub repository URL; absence is reported as a validation error
    /// rather than a deserialization failure
    #[serde(rename = "repoUrl")]
    pub repo_url: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
