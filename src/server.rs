use axum::{
    Json, Router, debug_handler,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::orchestrator::{CycleOutcome, Orchestrator, random_query};
use crate::presenter::Screen;

pub struct AppState {
    pub orchestrator: Orchestrator<Screen>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/query", post(post_query_handler))
        .route("/query/{query}", get(get_query_handler))
        .route("/random", get(get_random_handler))
        .route("/screen", get(get_screen_handler))
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, bind: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await.map_err(|e| {
        tracing::error!("Failed to bind to address {}: {}", bind, e);
        e
    })?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

// The error taxonomy stays in the logs; clients only see the status and the screen.
fn status_for(outcome: &CycleOutcome) -> StatusCode {
    match outcome {
        CycleOutcome::Rendered(_) => StatusCode::OK,
        CycleOutcome::Errored(AppError::EmptyQuery) => StatusCode::BAD_REQUEST,
        CycleOutcome::Errored(_) => StatusCode::NOT_FOUND,
        CycleOutcome::Superseded => StatusCode::CONFLICT,
    }
}

async fn run_query(app_state: &AppState, query: &str) -> (StatusCode, Json<Screen>) {
    let (outcome, screen) = app_state
        .orchestrator
        .submit_observed(query, |screen| screen.clone())
        .await;
    // A superseded cycle wrote nothing; report whatever the newer one left.
    let screen =
        screen.unwrap_or_else(|| app_state.orchestrator.with_sink(|screen| screen.clone()));
    (status_for(&outcome), Json(screen))
}

#[debug_handler]
async fn post_query_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> (StatusCode, Json<Screen>) {
    tracing::debug!("Query submitted: {:?}", request.query);
    run_query(&app_state, &request.query).await
}

#[debug_handler]
async fn get_query_handler(
    State(app_state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> (StatusCode, Json<Screen>) {
    run_query(&app_state, &query).await
}

#[debug_handler]
async fn get_random_handler(
    State(app_state): State<Arc<AppState>>,
) -> (StatusCode, Json<Screen>) {
    let query = random_query();
    tracing::debug!("Random lookup for ID: {}", query);
    run_query(&app_state, &query).await
}

#[debug_handler]
async fn get_screen_handler(State(app_state): State<Arc<AppState>>) -> Json<Screen> {
    Json(app_state.orchestrator.with_sink(|screen| screen.clone()))
}
