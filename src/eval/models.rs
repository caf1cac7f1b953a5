use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category label used to select the grading rubric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepoContext {
    #[serde(rename = "DSA")]
    Dsa,
    Backend,
    Frontend,
    Project,
}

impl fmt::Display for RepoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepoContext::Dsa => "DSA",
            RepoContext::Backend => "Backend",
            RepoContext::Frontend => "Frontend",
            RepoContext::Project => "Project",
        };
        f.write_str(label)
    }
}

/// The four named sub-scores composing the overall score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub documentation: i64,
    pub structure: i64,
    pub code_quality: i64,
    pub best_practices: i64,
}

/// Structured assessment produced by the model.
///
/// Returned to the caller as decoded: no local score validation, no
/// clamping, no re-ordering of suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub context: RepoContext,
    pub score: i64,
    pub breakdown: ScoreBreakdown,
    pub summary: String,
    pub suggestions: Vec<String>,
    pub production_gaps: Vec<String>,
}
