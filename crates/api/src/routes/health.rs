use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use taskboard_core::error::CoreError;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `UP`, or `DEGRADED` when the store cannot be reached.
    pub status: &'static str,
    /// `connected` or `disconnected`.
    pub database: &'static str,
    pub tasks_count: i64,
    pub categories_count: i64,
}

async fn store_counts(state: &AppState) -> Result<(i64, i64), CoreError> {
    Ok((state.tasks.count().await?, state.categories.count().await?))
}

/// GET /api/health -- always 200; the body says whether the store answered.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match store_counts(&state).await {
        Ok((tasks_count, categories_count)) => HealthResponse {
            status: "UP",
            database: "connected",
            tasks_count,
            categories_count,
        },
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the store");
            HealthResponse {
                status: "DEGRADED",
                database: "disconnected",
                tasks_count: 0,
                categories_count: 0,
            }
        }
    };
    Json(response)
}

/// Mount the health check route (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
