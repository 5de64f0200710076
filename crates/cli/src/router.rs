//! HTTP routes.
//!
//! - `GET /health`: corpus counts
//! - `POST /ask`: answer a question
//! - `POST /reload`: rebuild the corpus index
//!
//! Every route answers 200; problems are reported inside the body.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use snowdesk_knowledge::CorpusStats;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    docs_loaded: usize,
    chunks: usize,
}

impl From<CorpusStats> for StatusResponse {
    fn from(stats: CorpusStats) -> Self {
        Self {
            status: "ok",
            docs_loaded: stats.docs_loaded,
            chunks: stats.chunks,
        }
    }
}

#[derive(Debug, Serialize)]
struct AskResponse {
    answer: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/reload", post(reload))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .on_response(
                    |res: &axum::http::Response<_>, latency: Duration, _span: &Span| {
                        tracing::info!(
                            "Sending response | {} | {}ms",
                            res.status(),
                            latency.as_millis()
                        );
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        tracing::error!("Error in request: {error}")
                    },
                ),
        )
        .layer(cors)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(state.stats().into())
}

/// Pull `question` out of a request body, tolerating any malformed input.
fn question_from_body(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("question")?.as_str().map(str::to_string))
        .unwrap_or_default()
}

async fn ask(State(state): State<Arc<AppState>>, body: Bytes) -> Json<AskResponse> {
    let question = question_from_body(&body);
    let result = state.agent.answer(&question).await;
    Json(AskResponse {
        answer: result.answer,
    })
}

async fn reload(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let stats = match state.reload().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!("Reload failed: {}", e);
            state.stats()
        }
    };
    Json(stats.into())
}
