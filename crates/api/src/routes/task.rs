use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /stats                     -> stats
/// GET    /overdue                   -> list_overdue
/// GET    /status/{status}           -> list_by_status
/// GET    /priority/{priority}       -> list_by_priority
/// GET    /category/{category_id}    -> list_by_category
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// PATCH  /{id}/status               -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route("/stats", get(task::stats))
        .route("/overdue", get(task::list_overdue))
        .route("/status/{status}", get(task::list_by_status))
        .route("/priority/{priority}", get(task::list_by_priority))
        .route("/category/{category_id}", get(task::list_by_category))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/status", patch(task::update_status))
}
