pub mod category;
pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health          service and store health
/// /categories      category CRUD
/// /tasks           task CRUD, filters, status patch and stats
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/categories", category::router())
        .nest("/tasks", task::router())
}
