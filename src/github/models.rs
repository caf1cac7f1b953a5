use serde::Deserialize;
use std::collections::BTreeMap;

/// GitHub repository metadata
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
}

/// Git tree API response
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

/// Directory tree entry
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
}

/// README payload from the contents API
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeContent {
    pub content: String,
    pub encoding: String,
}

/// Point-in-time bundle of repository metadata gathered for one
/// evaluation request. Built once per request, never persisted.
///
/// Every field the prompt uses is always present: sub-fetch failures
/// other than metadata degrade to empty values instead of aborting.
#[derive(Debug, Clone)]
pub struct RepositorySnapshot {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// Decoded README text, at most 8000 characters
    pub readme: String,
    /// At most 100 paths, each at most 3 segments deep, in upstream order
    pub file_paths: Vec<String>,
    /// Language name to byte count, sorted for deterministic prompt output
    pub languages: BTreeMap<String, u64>,
}
