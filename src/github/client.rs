use crate::config::GitHubConfig;
use crate::github::models::{ReadmeContent, Repository, Tree};
use crate::{Error, Result};
use reqwest::{header, Client, StatusCode};
use std::collections::BTreeMap;
use tracing::debug;

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("repograder/0.1"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        // Add authentication if token is provided
        if let Some(token) = &config.token {
            let auth_value = format!("Bearer {token}");
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Internal(format!("Invalid GitHub token: {e}")))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Make a GET request to GitHub API
    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!("GitHub API request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Internal(format!("GitHub API request failed: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            debug!("GitHub API error: {} - {}", status, error_body);

            return Err(match status {
                StatusCode::NOT_FOUND => Error::RepositoryNotFound,
                StatusCode::FORBIDDEN => {
                    Error::Internal("GitHub API rate limit exceeded or access forbidden".to_string())
                }
                StatusCode::UNAUTHORIZED => {
                    Error::Internal("GitHub authentication failed".to_string())
                }
                _ => Error::Internal(format!("GitHub API error: {status}")),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Internal(format!("Failed to parse GitHub API response: {e}")))
    }

    /// Get repository metadata
    pub async fn repository(&self, owner: &str, repo: &str) -> Result<Repository> {
        let path = format!("/repos/{owner}/{repo}");
        self.get(&path).await
    }

    /// Get language byte counts
    pub async fn languages(&self, owner: &str, repo: &str) -> Result<BTreeMap<String, u64>> {
        let path = format!("/repos/{owner}/{repo}/languages");
        self.get(&path).await
    }

    /// Get the recursive tree for a branch
    pub async fn tree(&self, owner: &str, repo: &str, branch: &str) -> Result<Tree> {
        let path = format!("/repos/{owner}/{repo}/git/trees/{branch}?recursive=1");
        self.get(&path).await
    }

    /// Get the repository README (base64-encoded by the contents API)
    pub async fn readme(&self, owner: &str, repo: &str) -> Result<ReadmeContent> {
        let path = format!("/repos/{owner}/{repo}/readme");
        self.get(&path).await
    }
}
