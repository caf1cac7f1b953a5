use crate::github::client::GitHubClient;
use crate::github::models::{ReadmeContent, RepositorySnapshot, Tree};
use crate::github::parser::RepositoryInfo;
use crate::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Maximum number of file paths carried into the prompt
const MAX_FILE_PATHS: usize = 100;

/// Maximum path depth (number of "/"-separated segments) kept from the tree
const MAX_PATH_DEPTH: usize = 3;

/// Maximum number of characters kept from the decoded README
const MAX_README_CHARS: usize = 8000;

impl GitHubClient {
    /// Fetch a point-in-time snapshot of a repository.
    ///
    /// The four sub-requests run concurrently and are all awaited; no
    /// failure cancels a sibling. Only the metadata request is fatal;
    /// languages, tree, and README failures degrade to empty values.
    pub async fn fetch_snapshot(&self, info: &RepositoryInfo) -> Result<RepositorySnapshot> {
        let (metadata, languages, tree, readme) = tokio::join!(
            self.repository(&info.owner, &info.repo),
            self.languages(&info.owner, &info.repo),
            self.tree_with_fallback(&info.owner, &info.repo),
            self.readme(&info.owner, &info.repo),
        );

        let metadata = metadata?;

        let languages = languages.unwrap_or_else(|e| {
            warn!(
                "Language fetch failed for {}/{}: {}",
                info.owner, info.repo, e
            );
            BTreeMap::new()
        });

        let file_paths = match tree {
            Ok(tree) => shape_file_paths(tree),
            Err(e) => {
                warn!("Tree fetch failed for {}/{}: {}", info.owner, info.repo, e);
                Vec::new()
            }
        };

        let readme = match readme {
            Ok(payload) => decode_readme(&payload),
            Err(e) => {
                warn!("README fetch failed for {}/{}: {}", info.owner, info.repo, e);
                String::new()
            }
        };

        debug!(
            "Snapshot ready for {}/{}: {} stars, {} forks, {} open issues, {} languages, {} paths",
            info.owner,
            info.repo,
            metadata.stargazers_count,
            metadata.forks_count,
            metadata.open_issues_count,
            languages.len(),
            file_paths.len(),
        );

        Ok(RepositorySnapshot {
            owner: info.owner.clone(),
            name: info.repo.clone(),
            description: metadata.description.unwrap_or_default(),
            stars: metadata.stargazers_count,
            forks: metadata.forks_count,
            open_issues: metadata.open_issues_count,
            readme,
            file_paths,
            languages,
        })
    }

    /// Fetch the recursive tree for "main", falling back to "master"
    async fn tree_with_fallback(&self, owner: &str, repo: &str) -> Result<Tree> {
        match self.tree(owner, repo, "main").await {
            Ok(tree) => Ok(tree),
            Err(e) => {
                debug!(
                    "Tree fetch for branch main failed ({}), trying master",
                    e
                );
                self.tree(owner, repo, "master").await
            }
        }
    }
}

/// Shape the raw tree into a bounded path listing: paths of at most
/// three segments, truncated to the first 100 entries in upstream order.
/// This is a token-budget control, not a correctness requirement.
fn shape_file_paths(tree: Tree) -> Vec<String> {
    if tree.truncated {
        debug!("Upstream tree listing was truncated");
    }

    tree.tree
        .into_iter()
        .map(|entry| entry.path)
        .filter(|path| path.split('/').count() <= MAX_PATH_DEPTH)
        .take(MAX_FILE_PATHS)
        .collect()
}

/// Decode the README payload and truncate it for the prompt
fn decode_readme(payload: &ReadmeContent) -> String {
    let text = if payload.encoding == "base64" {
        // The contents API wraps base64 at 60 columns; strip the line breaks
        let compact: String = payload.content.split_whitespace().collect();
        match BASE64.decode(compact.as_bytes()) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Failed to decode README payload: {}", e);
                return String::new();
            }
        }
    } else {
        payload.content.clone()
    };

    truncate_chars(text, MAX_README_CHARS)
}

/// Truncate to a character count without splitting a UTF-8 sequence
fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}
