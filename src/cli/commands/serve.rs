//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for document upload, question answering, and
//! session teardown. Sessions are memory-resident; they vanish with the
//! process.

use super::build_registry;
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::LeseError;
use crate::session::SessionRegistry;
use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    preflight::check_api_key()?;

    // Leave headroom for the JSON envelope around the document text.
    let body_limit = settings.upload.max_document_bytes() + 64 * 1024;
    let registry = build_registry(settings)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/ask", post(ask))
        .route("/session/{id}", delete(destroy_session))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(registry);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Lese API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("Upload", "POST   /upload");
    Output::kv("Ask", "POST   /ask");
    Output::kv("End Session", "DELETE /session/:id");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct UploadRequest {
    /// Display name for the document
    #[serde(default)]
    name: Option<String>,
    /// Plain-text document content
    text: String,
    /// Previous session to destroy; a client keeps one live session
    #[serde(default)]
    replaces: Option<Uuid>,
}

#[derive(Serialize)]
struct UploadResponse {
    session_id: Uuid,
    document: String,
    chunks_indexed: usize,
}

#[derive(Deserialize)]
struct AskRequest {
    session_id: Uuid,
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
    attachments: Vec<Attachment>,
}

#[derive(Serialize)]
struct Attachment {
    name: String,
    content: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(e: LeseError) -> axum::response::Response {
    let status = match e {
        LeseError::InvalidInput(_) | LeseError::Config(_) => StatusCode::BAD_REQUEST,
        LeseError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: e.to_string() })).into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn upload(
    State(registry): State<Arc<SessionRegistry>>,
    Json(req): Json<UploadRequest>,
) -> impl IntoResponse {
    let name = req.name.unwrap_or_else(|| "document.txt".to_string());

    match registry.replace(req.replaces, &name, &req.text).await {
        Ok(session_id) => {
            let chunks_indexed = match registry.get(session_id) {
                Ok(session) => session.lock().await.chunk_count,
                Err(e) => return error_response(e),
            };
            Json(UploadResponse {
                session_id,
                document: name,
                chunks_indexed,
            })
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn ask(
    State(registry): State<Arc<SessionRegistry>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    match registry.ask(req.session_id, &req.question).await {
        Ok(answer) => Json(AskResponse {
            answer: answer.text,
            attachments: answer
                .sources
                .into_iter()
                .map(|s| Attachment { name: s.label, content: s.content })
                .collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn destroy_session(
    State(registry): State<Arc<SessionRegistry>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if registry.destroy(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error_response(LeseError::SessionNotFound(id))
    }
}
