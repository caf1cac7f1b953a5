use axum::{extract::State, Json};
use tracing::{debug, info};

use crate::api::models::*;
use crate::eval::{classify, EvaluationResult, GeminiClient};
use crate::github::{parse_repository_url, GitHubClient};
use crate::{Error, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub github: GitHubClient,
    pub evaluator: GeminiClient,
    pub settings: crate::config::Settings,
}

/// POST /evaluate - Fetch, classify, and grade a repository
pub async fn evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>> {
    let raw_url = request
        .repo_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| Error::Validation("repoUrl is required".to_string()))?;

    debug!("Evaluate request: {}", raw_url);

    let info = parse_repository_url(raw_url)?;
    let snapshot = state.github.fetch_snapshot(&info).await?;
    let context = classify(&snapshot);

    let result = state.evaluator.evaluate(&snapshot, context).await?;
    info!(
        "Evaluated {}/{} as {} with score {}",
        info.owner, info.repo, result.context, result.score
    );

    Ok(Json(result))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
