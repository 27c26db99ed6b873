// HTTP API routes (health, metrics, leaderboard) and the WebSocket mount.

pub mod ws;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::Database;
use crate::llm::LlmClient;
use crate::metrics;

/// Rows the leaderboard returns and keeps visible.
const LEADERBOARD_SIZE: i64 = 10;

// ── Request types ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitScoreRequest {
    pub name: String,
    pub score: i64,
}

// ── Shared application state ─────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub decision: Arc<LlmClient>,
}

// ── Error helper ──────────────────────────────────────────────────────

fn json_error(status: StatusCode, msg: &str) -> impl IntoResponse {
    (status, Json(json!({ "error": msg })))
}

fn internal_error(e: sqlx::Error) -> impl IntoResponse {
    tracing::error!("Database error: {e}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

// ── Router ────────────────────────────────────────────────────────────

pub fn router(db: Arc<Database>, decision: Arc<LlmClient>) -> Router {
    let state = AppState { db, decision };

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .route("/api/leaderboard", get(get_leaderboard).post(submit_score))
        .route("/ws", get(ws::ws_session))
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "gridtactics-backend" }))
}

async fn get_metrics() -> impl IntoResponse {
    metrics::gather_metrics()
}

// ── Leaderboard handlers ─────────────────────────────────────────────

async fn get_leaderboard(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.top_scores(LEADERBOARD_SIZE).await {
        Ok(scores) => (StatusCode::OK, Json(json!(scores))).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

/// Record one score and return the updated top of the board.
async fn submit_score(
    State(state): State<AppState>,
    Json(req): Json<SubmitScoreRequest>,
) -> impl IntoResponse {
    if req.name.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "name is required").into_response();
    }
    if let Err(e) = state.db.insert_score(&req.name, req.score).await {
        return internal_error(e).into_response();
    }
    metrics::SCORE_SUBMISSIONS_TOTAL.inc();
    match state.db.top_scores(LEADERBOARD_SIZE).await {
        Ok(scores) => (StatusCode::OK, Json(json!(scores))).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}
