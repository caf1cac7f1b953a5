use crate::{Error, Result};
use url::Url;

/// Parsed GitHub repository information
#[derive(Debug, Clone)]
pub struct RepositoryInfo {
    pub owner: String,
    pub repo: String,
}

/// Parse a GitHub repository URL
/// Accepts formats:
/// - https://github.com/owner/repo
/// - https://github.com/owner/repo/
/// - https://github.com/owner/repo.git
/// - https://github.com/owner/repo/tree/main
/// - github.com/owner/repo
pub fn parse_repository_url(raw: &str) -> Result<RepositoryInfo> {
    let raw = raw.trim();

    // Tolerate a missing scheme so "github.com/owner/repo" still parses
    let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&candidate).map_err(|_| {
        Error::Validation(format!("Invalid repository URL: {raw}"))
    })?;

    let host_ok = url
        .host_str()
        .is_some_and(|h| h == "github.com" || h == "www.github.com");
    if !host_ok {
        return Err(Error::Validation(
            "Expected a GitHub repository URL: https://github.com/<owner>/<repo>".to_string(),
        ));
    }

    let parts: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if parts.len() < 2 {
        return Err(Error::Validation(
            "Invalid GitHub repository URL format. Expected: github.com/<owner>/<repo>".to_string(),
        ));
    }

    let owner = parts[0].trim();
    let repo = parts[1].trim().trim_end_matches(".git");

    if owner.is_empty() || repo.is_empty() {
        return Err(Error::Validation(
            "Repository owner and name cannot be empty".to_string(),
        ));
    }

    Ok(RepositoryInfo {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
