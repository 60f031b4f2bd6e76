//! HTTP API server for integration with other systems.
//!
//! Exposes the video generation flow over REST with the same never-throwing
//! contract as the agent tool: every request gets a JSON object back.

use crate::cli::Output;
use crate::config::Settings;
use crate::generation::{GenerationRequest, VideoGenerator};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    generator: VideoGenerator,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let generator = VideoGenerator::new(settings.seedance.clone())?;

    let state = Arc::new(AppState { generator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Skape API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Generate", "POST /generate");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Submit a generation request and wait for its terminal outcome.
///
/// Always answers 200 with the normalized result object; timeout, provider
/// failure, and input errors are data in the body, not HTTP errors, so
/// callers handle one shape.
async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerationRequest>,
) -> impl IntoResponse {
    let rendered = state.generator.generate_json(&request).await;
    let body: serde_json::Value =
        serde_json::from_str(&rendered).unwrap_or_else(|_| serde_json::json!({ "error": rendered }));
    Json(body)
}
