// Repository evaluation: context classification, prompt assembly, and the
// Gemini client that grades the snapshot

pub mod classifier;
pub mod gemini;
pub mod models;
pub mod prompt;

pub use classifier::classify;
pub use gemini::GeminiClient;
pub use models::{EvaluationResult, RepoContext, ScoreBreakdown};
