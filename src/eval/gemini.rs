use crate::config::GeminiConfig;
use crate::eval::models::{EvaluationResult, RepoContext};
use crate::eval::prompt::{build_prompt, response_schema};
use crate::github::RepositorySnapshot;
use crate::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// Client for the Gemini generateContent API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

/// Wire envelope for a generateContent reply
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self> {
        // Generation can take a while on large prompts
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Evaluate a snapshot, trying each configured model in order.
    ///
    /// A transport error, non-2xx status, or undecodable envelope moves on
    /// to the next model. A reply whose text is missing or is not a valid
    /// result is terminal: the model answered, retrying another one would
    /// not produce the same evaluation.
    pub async fn evaluate(
        &self,
        snapshot: &RepositorySnapshot,
        context: RepoContext,
    ) -> Result<EvaluationResult> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(Error::CredentialMissing)?;

        let prompt = build_prompt(snapshot, context);
        let schema = response_schema();

        let mut last_error: Option<String> = None;
        for model in &self.config.models {
            debug!("Requesting evaluation from model {}", model);
            match self.generate(model, api_key, &prompt, &schema).await {
                Ok(reply) => return parse_reply(&reply),
                Err(e @ Error::MalformedModelOutput(_)) => return Err(e),
                Err(e) => {
                    warn!("Model {} attempt failed: {}", model, e);
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(Error::ModelUnavailable(
            last_error.unwrap_or_else(|| "no models configured".to_string()),
        ))
    }

    /// One generateContent call against a single model
    async fn generate(
        &self,
        model: &str,
        api_key: &str,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            model
        );

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            debug!("Gemini API error: {} - {}", status, error_body);
            return Err(Error::Internal(format!(
                "Gemini API error {status}: {error_body}"
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("Failed to parse Gemini API response: {e}")))?;

        reply_text(envelope).ok_or_else(|| {
            Error::MalformedModelOutput("reply contained no text part".to_string())
        })
    }
}

/// Pull the generated text out of the first candidate
fn reply_text(envelope: GenerateContentResponse) -> Option<String> {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
}

/// Decode the model's JSON reply into an evaluation result
fn parse_reply(reply: &str) -> Result<EvaluationResult> {
    serde_json::from_str(reply.trim())
        .map_err(|e| Error::MalformedModelOutput(format!("invalid result JSON: {e}")))
}
