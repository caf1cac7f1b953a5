use crate::eval::models::RepoContext;
use crate::github::RepositorySnapshot;

/// Name/description keywords that mark a DSA practice repository
const DSA_KEYWORDS: &[&str] = &[
    "leetcode",
    "hackerrank",
    "dsa",
    "algorithm",
    "solutions",
    "cp",
    "competitive",
];

/// Manifest filenames that mark a configured backend project
const BACKEND_MANIFESTS: &[&str] = &["package.json", "requirements.txt", "go.mod", "Cargo.toml"];

/// Repositories with fewer paths than this and no manifest are treated
/// as practice collections rather than projects
const MIN_PROJECT_FILES: usize = 10;

/// Label a repository as DSA practice or a backend project.
///
/// Priority-ordered decision list, first match wins, no confidence value:
/// a DSA keyword in the name or description decides immediately; otherwise
/// a small repository without any backend manifest is DSA; everything else
/// is Backend.
pub fn classify(snapshot: &RepositorySnapshot) -> RepoContext {
    let haystack = format!("{} {}", snapshot.name, snapshot.description).to_lowercase();
    if DSA_KEYWORDS.iter().any(|keyword| haystack.contains(keyword)) {
        return RepoContext::Dsa;
    }

    let has_manifest = snapshot
        .file_paths
        .iter()
        .any(|path| BACKEND_MANIFESTS.iter().any(|name| path.contains(name)));
    if !has_manifest && snapshot.file_paths.len() < MIN_PROJECT_FILES {
        return RepoContext::Dsa;
    }

    RepoContext::Backend
}
