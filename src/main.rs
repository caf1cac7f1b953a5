use clap::Parser;
use repograder::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    eval::GeminiClient,
    github::GitHubClient,
    Error, Result,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,repograder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Evaluate { url } => {
            repograder::cli::commands::evaluate(&settings, &url).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Repograder server");
    info!("Server: {}:{}", settings.server.host, settings.server.port);
    info!("GitHub API: {}", settings.github.api_base_url);
    info!("Model candidates: {}", settings.gemini.models.join(", "));

    if settings.github.token.is_none() {
        warn!("GITHUB_TOKEN not set - unauthenticated GitHub requests are tightly rate limited");
    }
    if settings.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY not set - evaluation requests will fail until it is configured");
    }

    let github = GitHubClient::new(settings.github.clone())?;
    let evaluator = GeminiClient::new(settings.gemini.clone())?;

    // Create application state
    let state = AppState {
        github,
        evaluator,
        settings: settings.clone(),
    };

    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Repograder Server");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("\nAPI Endpoints:");
    println!("  POST /evaluate");
    println!("  GET  /health");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
