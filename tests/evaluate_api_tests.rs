use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mockito::ServerGuard;
use repograder::api::{create_router, AppState};
use repograder::config::{GeminiConfig, GitHubConfig, ServerConfig, Settings};
use repograder::eval::GeminiClient;
use repograder::github::GitHubClient;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(github_url: &str, gemini_url: &str, api_key: Option<&str>, models: &[&str]) -> Router {
    let settings = Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        github: GitHubConfig {
            token: None,
            api_base_url: github_url.to_string(),
        },
        gemini: GeminiConfig {
            api_key: api_key.map(|k| k.to_string()),
            api_base_url: gemini_url.to_string(),
            models: models.iter().map(|m| m.to_string()).collect(),
        },
    };

    let state = AppState {
        github: GitHubClient::new(settings.github.clone()).expect("client should build"),
        evaluator: GeminiClient::new(settings.gemini.clone()).expect("client should build"),
        settings,
    };

    create_router(state)
}

fn app_for(github_url: &str, gemini_url: &str, models: &[&str]) -> Router {
    app_with(github_url, gemini_url, Some("test-key"), models)
}

async fn post_evaluate(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/evaluate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

/// Mount the four GitHub endpoints for a small backend-looking repository.
/// The returned mocks must stay alive for the duration of the test.
async fn mock_backend_repo(server: &mut ServerGuard) -> Vec<mockito::Mock> {
    let repo = server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_body(
            r#"{
                "name": "widget",
                "full_name": "acme/widget",
                "description": "REST API for widgets",
                "stargazers_count": 5,
                "forks_count": 1,
                "open_issues_count": 0
            }"#,
        )
        .create_async()
        .await;
    let languages = server
        .mock("GET", "/repos/acme/widget/languages")
        .with_status(200)
        .with_body(r#"{"JavaScript": 9000}"#)
        .create_async()
        .await;
    let tree = server
        .mock("GET", "/repos/acme/widget/git/trees/main?recursive=1")
        .with_status(200)
        .with_body(
            r#"{"tree": [
                {"path": "package.json"},
                {"path": "src/index.js"},
                {"path": "src/routes.js"}
            ], "truncated": false}"#,
        )
        .create_async()
        .await;
    let readme = server
        .mock("GET", "/repos/acme/widget/readme")
        .with_status(200)
        .with_body(r#"{"content": "IyBIZWxsbw==", "encoding": "base64"}"#)
        .create_async()
        .await;

    vec![repo, languages, tree, readme]
}

fn sample_result() -> Value {
    json!({
        "context": "Backend",
        "score": 68,
        "breakdown": {
            "documentation": 55,
            "structure": 75,
            "code_quality": 70,
            "best_practices": 65
        },
        "summary": "Decent API with weak docs.",
        "suggestions": ["Add setup instructions to the README"],
        "production_gaps": ["No tests", "No CI"]
    })
}

fn gemini_envelope(result: &Value) -> String {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": result.to_string() }]
            }
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_evaluate_end_to_end() {
    let mut github = mockito::Server::new_async().await;
    let mut gemini = mockito::Server::new_async().await;

    let _github_mocks = mock_backend_repo(&mut github).await;
    let generate = gemini
        .mock("POST", "/v1beta/models/gemini-test:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_body(gemini_envelope(&sample_result()))
        .create_async()
        .await;

    let app = app_for(&github.url(), &gemini.url(), &["gemini-test"]);
    let (status, body) =
        post_evaluate(app, json!({"repoUrl": "https://github.com/acme/widget"})).await;

    assert_eq!(status, StatusCode::OK);
    // The model's reply comes back value for value
    assert_eq!(body, sample_result());
    generate.assert_async().await;
}

#[tokio::test]
async fn test_evaluate_dsa_repository_end_to_end() {
    let mut github = mockito::Server::new_async().await;
    let mut gemini = mockito::Server::new_async().await;

    let _repo = github
        .mock("GET", "/repos/acme/leetcode-solutions")
        .with_status(200)
        .with_body(
            r#"{
                "name": "leetcode-solutions",
                "full_name": "acme/leetcode-solutions",
                "description": "Grinding problems",
                "stargazers_count": 1,
                "forks_count": 0,
                "open_issues_count": 0
            }"#,
        )
        .create_async()
        .await;
    // Remaining sub-fetches stay unmocked and degrade to empty values

    let dsa_result = json!({
        "context": "DSA",
        "score": 35,
        "breakdown": {
            "documentation": 20,
            "structure": 40,
            "code_quality": 45,
            "best_practices": 35
        },
        "summary": "Loose solution files with no explanations.",
        "suggestions": ["Group solutions by topic"],
        "production_gaps": []
    });
    let _generate = gemini
        .mock("POST", "/v1beta/models/gemini-test:generateContent")
        .with_status(200)
        .with_body(gemini_envelope(&dsa_result))
        .create_async()
        .await;

    let app = app_for(&github.url(), &gemini.url(), &["gemini-test"]);
    let (status, body) = post_evaluate(
        app,
        json!({"repoUrl": "https://github.com/acme/leetcode-solutions"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, dsa_result);
}

#[tokio::test]
async fn test_missing_repo_url_is_rejected() {
    let app = app_for("http://127.0.0.1:9", "http://127.0.0.1:9", &["gemini-test"]);

    let (status, body) = post_evaluate(app, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "repoUrl is required");
}

#[tokio::test]
async fn test_blank_repo_url_is_rejected() {
    let app = app_for("http://127.0.0.1:9", "http://127.0.0.1:9", &["gemini-test"]);

    let (status, body) = post_evaluate(app, json!({"repoUrl": "   "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "repoUrl is required");
}

#[tokio::test]
async fn test_non_github_url_is_rejected() {
    let app = app_for("http://127.0.0.1:9", "http://127.0.0.1:9", &["gemini-test"]);

    let (status, body) =
        post_evaluate(app, json!({"repoUrl": "https://gitlab.com/acme/widget"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("GitHub"));
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected() {
    let app = app_for("http://127.0.0.1:9", "http://127.0.0.1:9", &["gemini-test"]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/evaluate")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_repository_maps_to_500() {
    let mut github = mockito::Server::new_async().await;

    let _repo = github
        .mock("GET", "/repos/acme/ghost")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let app = app_for(&github.url(), "http://127.0.0.1:9", &["gemini-test"]);
    let (status, body) =
        post_evaluate(app, json!({"repoUrl": "https://github.com/acme/ghost"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Repository not found or private"}));
}

#[tokio::test]
async fn test_missing_api_key_maps_to_500() {
    let mut github = mockito::Server::new_async().await;
    let mut gemini = mockito::Server::new_async().await;

    let _github_mocks = mock_backend_repo(&mut github).await;
    // The model must not be consulted when no key is configured
    let generate = gemini
        .mock("POST", "/v1beta/models/gemini-test:generateContent")
        .expect(0)
        .create_async()
        .await;

    let app = app_with(&github.url(), &gemini.url(), None, &["gemini-test"]);
    let (status, body) =
        post_evaluate(app, json!({"repoUrl": "https://github.com/acme/widget"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Model API key is not configured (set GEMINI_API_KEY or GOOGLE_API_KEY)"})
    );
    generate.assert_async().await;
}

#[tokio::test]
async fn test_model_fallback_tries_next_candidate() {
    let mut github = mockito::Server::new_async().await;
    let mut gemini = mockito::Server::new_async().await;

    let _github_mocks = mock_backend_repo(&mut github).await;
    let first = gemini
        .mock("POST", "/v1beta/models/gemini-a:generateContent")
        .with_status(500)
        .with_body("overloaded")
        .create_async()
        .await;
    let second = gemini
        .mock("POST", "/v1beta/models/gemini-b:generateContent")
        .with_status(200)
        .with_body(gemini_envelope(&sample_result()))
        .create_async()
        .await;

    let app = app_for(&github.url(), &gemini.url(), &["gemini-a", "gemini-b"]);
    let (status, body) =
        post_evaluate(app, json!({"repoUrl": "https://github.com/acme/widget"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 68);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_all_models_failing_reports_last_error() {
    let mut github = mockito::Server::new_async().await;
    let mut gemini = mockito::Server::new_async().await;

    let _github_mocks = mock_backend_repo(&mut github).await;
    let _first = gemini
        .mock("POST", "/v1beta/models/gemini-a:generateContent")
        .with_status(500)
        .with_body("boom-a")
        .create_async()
        .await;
    let _second = gemini
        .mock("POST", "/v1beta/models/gemini-b:generateContent")
        .with_status(503)
        .with_body("boom-b")
        .create_async()
        .await;

    let app = app_for(&github.url(), &gemini.url(), &["gemini-a", "gemini-b"]);
    let (status, body) =
        post_evaluate(app, json!({"repoUrl": "https://github.com/acme/widget"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "All model attempts failed");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("503"));
    assert!(details.contains("boom-b"));
}

#[tokio::test]
async fn test_malformed_model_reply_is_terminal() {
    let mut github = mockito::Server::new_async().await;
    let mut gemini = mockito::Server::new_async().await;

    let _github_mocks = mock_backend_repo(&mut github).await;
    let _first = gemini
        .mock("POST", "/v1beta/models/gemini-a:generateContent")
        .with_status(200)
        .with_body(
            json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "I would rate this repository 7/10." }]
                    }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;
    // The second candidate must not be consulted once a reply exists
    let second = gemini
        .mock("POST", "/v1beta/models/gemini-b:generateContent")
        .expect(0)
        .create_async()
        .await;

    let app = app_for(&github.url(), &gemini.url(), &["gemini-a", "gemini-b"]);
    let (status, body) =
        post_evaluate(app, json!({"repoUrl": "https://github.com/acme/widget"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Model returned malformed output");
    second.assert_async().await;
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app_for("http://127.0.0.1:9", "http://127.0.0.1:9", &["gemini-test"]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}
