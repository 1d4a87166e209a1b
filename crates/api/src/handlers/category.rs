//! Handlers for the `/categories` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::category::{Category, CreateCategory, UpdateCategory};
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::Path;
use crate::state::AppState;

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.categories.list().await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = state
        .categories
        .get(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategory>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let Json(input) = payload?;
    let category = state.categories.create(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateCategory>, JsonRejection>,
) -> AppResult<Json<Category>> {
    let Json(input) = payload?;
    let category = state.categories.update(id, input).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
