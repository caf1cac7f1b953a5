use crate::error::{Error, Result};

/// Default ordered list of model candidates tried in sequence
pub const DEFAULT_MODEL_CANDIDATES: &[&str] =
    &["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"];

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub github: GitHubConfig,
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Optional GitHub personal access token for increased rate limits
    pub token: Option<String>,

    /// Base URL of the GitHub REST API (overridable for tests)
    pub api_base_url: String,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the generation service; absence is tolerated at startup
    /// and fatal per evaluation request
    pub api_key: Option<String>,

    /// Base URL of the generation service (overridable for tests)
    pub api_base_url: String,

    /// Ordered model candidates, attempted in turn until one succeeds
    pub models: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let github_token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let github_api_url = std::env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".to_string());

        // The generation service key is checked under two alternative names
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty());
        let gemini_api_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let models = match std::env::var("GEMINI_MODEL") {
            Ok(model) if !model.is_empty() => vec![model],
            _ => DEFAULT_MODEL_CANDIDATES
                .iter()
                .map(|m| m.to_string())
                .collect(),
        };

        Ok(Settings {
            server: ServerConfig { host, port },
            github: GitHubConfig {
                token: github_token,
                api_base_url: github_api_url,
            },
            gemini: GeminiConfig {
                api_key: gemini_api_key,
                api_base_url: gemini_api_url,
                models,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.gemini.models.is_empty() {
            return Err(Error::Config(
                "At least one model candidate is required".to_string(),
            ));
        }

        Ok(())
    }
}
