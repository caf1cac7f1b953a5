pub mod config;
pub mod error;

// GitHub data acquisition
pub mod github;

// Classification and model-backed grading
pub mod eval;

// HTTP API
pub mod api;

// Command-line interface
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
