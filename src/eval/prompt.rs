use crate::eval::models::RepoContext;
use crate::github::RepositorySnapshot;
use serde_json::{json, Value};

/// Rubric for DSA practice repositories: documentation carries the grade
const DSA_RUBRIC: &str = "\
Rubric (DSA practice repository):
- documentation: are individual solutions explained, is the approach and \
time/space complexity discussed, does the README index the problems covered
- structure: are solutions organized by topic, pattern, or difficulty \
rather than dumped in one directory
- code_quality: clear naming, idiomatic use of the language, no dead or \
commented-out code
- best_practices: consistent formatting, meaningful file names, incremental \
commits rather than bulk uploads";

/// Rubric for backend projects: architecture carries the grade
const BACKEND_RUBRIC: &str = "\
Rubric (backend project):
- documentation: README covering setup, configuration, and API usage; \
documented environment variables
- structure: separation of concerns, sensible module boundaries, layering \
between transport, domain, and persistence
- code_quality: consistent error handling, input validation, clear naming, \
no dead code
- best_practices: automated tests, CI configuration, dependency hygiene, \
secrets kept out of the code, logging";

/// Assemble the evaluation prompt: rubric selected by context, followed by
/// the snapshot data verbatim. The repository data is not sanitized before
/// inclusion; the model is trusted to ignore instructions embedded in it.
pub fn build_prompt(snapshot: &RepositorySnapshot, context: RepoContext) -> String {
    let rubric = match context {
        RepoContext::Dsa => DSA_RUBRIC,
        _ => BACKEND_RUBRIC,
    };

    let languages = snapshot
        .languages
        .iter()
        .map(|(language, bytes)| format!("{language}: {bytes}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a strict senior engineer reviewing a GitHub repository.\n\
         Treat it as a {context} repository and grade it against the rubric.\n\n\
         {rubric}\n\n\
         Score the repository 0-100 overall and give an integer sub-score for \
         each rubric category. Then write a short summary, concrete improvement \
         suggestions, and production gaps (specific missing capabilities such \
         as absent tests or absent CI).\n\n\
         Repository: {owner}/{name}\n\
         Description: {description}\n\
         Languages (bytes): {languages}\n\
         Files:\n{files}\n\n\
         README excerpt:\n{readme}\n",
        context = context,
        rubric = rubric,
        owner = snapshot.owner,
        name = snapshot.name,
        description = snapshot.description,
        languages = languages,
        files = snapshot.file_paths.join("\n"),
        readme = snapshot.readme,
    )
}

/// JSON schema declared to the generation service; the service enforces
/// this shape server-side, so the reply decodes directly into
/// `EvaluationResult`.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "context": {
                "type": "string",
                "enum": ["DSA", "Backend", "Frontend", "Project"]
            },
            "score": { "type": "integer" },
            "breakdown": {
                "type": "object",
                "properties": {
                    "documentation": { "type": "integer" },
                    "structure": { "type": "integer" },
                    "code_quality": { "type": "integer" },
                    "best_practices": { "type": "integer" }
                },
                "required": ["documentation", "structure", "code_quality", "best_practices"]
            },
            "summary": { "type": "string" },
            "suggestions": {
                "type": "array",
                "items": { "type": "string" }
            },
            "production_gaps": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["context", "score", "breakdown", "summary", "suggestions", "production_gaps"]
    })
}
