//! Handlers for the `/tasks` resource.
//!
//! Every task in a response carries its resolved category.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::task::{
    CreateTask, TaskPriority, TaskStats, TaskStatus, TaskWithCategory, UpdateTask,
};
use taskboard_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::Path;
use crate::state::AppState;

/// GET /api/tasks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TaskWithCategory>>> {
    let tasks = state.tasks.list().await?;
    Ok(Json(state.tasks.resolve(tasks).await?))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskWithCategory>> {
    let task = state
        .tasks
        .get(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(state.tasks.resolve_one(task).await?))
}

/// GET /api/tasks/status/{status}
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<TaskWithCategory>>> {
    let status = TaskStatus::from_str(&status)?;
    let tasks = state.tasks.list_by_status(status).await?;
    Ok(Json(state.tasks.resolve(tasks).await?))
}

/// GET /api/tasks/priority/{priority}
pub async fn list_by_priority(
    State(state): State<AppState>,
    Path(priority): Path<String>,
) -> AppResult<Json<Vec<TaskWithCategory>>> {
    let priority = TaskPriority::from_str(&priority)?;
    let tasks = state.tasks.list_by_priority(priority).await?;
    Ok(Json(state.tasks.resolve(tasks).await?))
}

/// GET /api/tasks/category/{category_id}
///
/// An unknown category id yields an empty list.
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskWithCategory>>> {
    let tasks = state.tasks.list_by_category(category_id).await?;
    Ok(Json(state.tasks.resolve(tasks).await?))
}

/// GET /api/tasks/overdue
pub async fn list_overdue(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TaskWithCategory>>> {
    let tasks = state.tasks.list_overdue().await?;
    Ok(Json(state.tasks.resolve(tasks).await?))
}

/// GET /api/tasks/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<TaskStats>> {
    Ok(Json(state.tasks.stats().await?))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TaskWithCategory>)> {
    let Json(input) = payload?;
    let task = state
        .tasks
        .create(input)
        .await
        .map_err(AppError::from_task_write)?;
    Ok((StatusCode::CREATED, Json(state.tasks.resolve_one(task).await?)))
}

/// PUT /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> AppResult<Json<TaskWithCategory>> {
    let Json(input) = payload?;
    let task = state
        .tasks
        .update(id, input)
        .await
        .map_err(AppError::from_task_write)?;
    Ok(Json(state.tasks.resolve_one(task).await?))
}

/// Body of `PATCH /api/tasks/{id}/status`: either `"COMPLETED"` or
/// `{"status": "COMPLETED"}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusBody {
    Bare(String),
    Wrapped { status: Option<String> },
}

fn parse_status_body(body: &[u8]) -> AppResult<TaskStatus> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("Status is required".into()));
    }
    let parsed: StatusBody = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid status body: {e}")))?;
    let raw = match parsed {
        StatusBody::Bare(raw) => raw,
        StatusBody::Wrapped { status: Some(raw) } => raw,
        StatusBody::Wrapped { status: None } => {
            return Err(AppError::BadRequest("Status is required".into()))
        }
    };
    Ok(TaskStatus::from_str(&raw)?)
}

/// PATCH /api/tasks/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<TaskWithCategory>> {
    let status = parse_status_body(&body)?;
    let task = state.tasks.update_status(id, status).await?;
    Ok(Json(state.tasks.resolve_one(task).await?))
}

/// DELETE /api/tasks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
