use crate::config::Settings;
use crate::eval::{classify, GeminiClient};
use crate::github::{parse_repository_url, GitHubClient};
use crate::{Error, Result};

/// Evaluate a single repository and print the result as JSON
pub async fn evaluate(settings: &Settings, url: &str) -> Result<()> {
    let info = parse_repository_url(url)?;

    let github = GitHubClient::new(settings.github.clone())?;
    let evaluator = GeminiClient::new(settings.gemini.clone())?;

    println!("Fetching {}/{}...", info.owner, info.repo);
    let snapshot = github.fetch_snapshot(&info).await?;

    let context = classify(&snapshot);
    println!("Detected context: {context}");

    let result = evaluator.evaluate(&snapshot, context).await?;

    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|e| Error::Internal(format!("Failed to render result: {e}")))?;
    println!("\n{rendered}");
    println!(
        "\n\u{2713} {}/{} scored {}/100",
        info.owner, info.repo, result.score
    );

    Ok(())
}
