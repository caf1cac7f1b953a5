pub mod client;
pub mod models;
pub mod parser;
pub mod snapshot;

pub use client::GitHubClient;
pub use models::RepositorySnapshot;
pub use parser::{parse_repository_url, RepositoryInfo};
