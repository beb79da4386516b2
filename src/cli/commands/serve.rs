//! HTTP API server for integration with other systems.
//!
//! Serves a single meeting session: one corpus, replaced by each build.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::{DebriefError, Result};
use crate::orchestrator::Orchestrator;
use crate::rag::{CorpusStats, RetrievedChunk};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
    settings: Settings,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(settings.clone())?;

    let state = Arc::new(AppState {
        orchestrator,
        settings,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/corpus", get(corpus_stats).post(build_corpus).delete(clear_corpus))
        .route("/process", post(process))
        .route("/ask", post(ask))
        .route("/search", post(search))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Debrief API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("Corpus stats", "GET    /corpus");
    Output::kv("Index transcript", "POST   /corpus");
    Output::kv("Clear corpus", "DELETE /corpus");
    Output::kv("Process file", "POST   /process");
    Output::kv("Ask", "POST   /ask");
    Output::kv("Search", "POST   /search");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct BuildRequest {
    transcript: String,
}

#[derive(Serialize)]
struct BuildResponse {
    ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    corpus: Option<CorpusStats>,
}

#[derive(Deserialize)]
struct ProcessRequest {
    /// Path of a transcript or video file on the server.
    input: String,
    /// Generate summary and action items (defaults to config).
    #[serde(default)]
    insights: Option<bool>,
}

#[derive(Deserialize)]
struct QueryRequest {
    query: String,
    #[serde(default)]
    k: Option<usize>,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<RetrievedChunk>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP status for a library error.
fn status_for(error: &DebriefError) -> StatusCode {
    match error {
        DebriefError::IndexNotReady => StatusCode::CONFLICT,
        DebriefError::EmptyInput(_)
        | DebriefError::InvalidInput(_)
        | DebriefError::UnsupportedMedia(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: DebriefError) -> axum::response::Response {
    (
        status_for(&error),
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn corpus_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let corpus = state.orchestrator.retrieval().stats();
    let status = if corpus.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (
        status,
        Json(BuildResponse {
            ready: corpus.is_some(),
            corpus,
        }),
    )
}

async fn build_corpus(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BuildRequest>,
) -> impl IntoResponse {
    let result = state
        .orchestrator
        .retrieval()
        .try_build_corpus(&req.transcript)
        .await;
    let (status, response) = build_outcome(result);
    (status, Json(response))
}

/// Report the corpus this request built, not whatever is live afterwards.
fn build_outcome(result: Result<CorpusStats>) -> (StatusCode, BuildResponse) {
    match result {
        Ok(stats) => (
            StatusCode::OK,
            BuildResponse {
                ready: true,
                corpus: Some(stats),
            },
        ),
        Err(e) => {
            error!("Error building vector store: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                BuildResponse {
                    ready: false,
                    corpus: None,
                },
            )
        }
    }
}

async fn clear_corpus(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.orchestrator.retrieval().clear();
    StatusCode::NO_CONTENT
}

async fn process(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessRequest>,
) -> impl IntoResponse {
    let with_insights = req.insights.unwrap_or(state.settings.insights.enabled);
    match state
        .orchestrator
        .process_media(Path::new(&req.input), with_insights)
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(e),
    }
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    let k = req.k.unwrap_or(state.settings.retrieval.top_k);
    let answer = state.orchestrator.retrieval().answer(&req.query, k).await;
    Json(AskResponse { answer })
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    let k = req.k.unwrap_or(state.settings.retrieval.top_k);
    match state.orchestrator.retrieval().retrieve(&req.query, k).await {
        Ok(results) => Json(SearchResponse { results }).into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&DebriefError::IndexNotReady), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&DebriefError::EmptyInput("query".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DebriefError::ModelInit("offline".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&DebriefError::Retrieval("search failed".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_build_outcome_reports_own_corpus() {
        let stats = CorpusStats {
            corpus_id: uuid::Uuid::new_v4(),
            chunk_count: 2,
            dimensions: 384,
            built_at: chrono::Utc::now(),
        };

        let (status, response) = build_outcome(Ok(stats.clone()));
        assert_eq!(status, StatusCode::OK);
        assert!(response.ready);
        assert_eq!(response.corpus.unwrap().corpus_id, stats.corpus_id);

        let (status, response) =
            build_outcome(Err(DebriefError::EmptyInput("transcript is empty".to_string())));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!response.ready);
        assert!(response.corpus.is_none());
    }
}
