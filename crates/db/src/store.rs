//! PostgreSQL adapters for the `taskboard_core` store ports.

use async_trait::async_trait;
use taskboard_core::category::{duplicate_name_message, Category, CreateCategory};
use taskboard_core::error::CoreError;
use taskboard_core::store::{CategoryStore, StoreResult, TaskStore};
use taskboard_core::task::{NewTask, Task, TaskPriority, TaskStatus};
use taskboard_core::types::{DbId, Timestamp};

use crate::error::{into_core, violated_constraint, UNIQUE_VIOLATION, UQ_CATEGORIES_NAME};
use crate::models::task::TaskRow;
use crate::repositories::{CategoryRepo, TaskRepo};
use crate::DbPool;

fn into_tasks(rows: Vec<TaskRow>) -> StoreResult<Vec<Task>> {
    rows.into_iter().map(Task::try_from).collect()
}

/// Map an insert/update failure, naming the colliding category on a
/// unique-name violation.
fn category_write_error(err: sqlx::Error, name: &str) -> CoreError {
    match violated_constraint(&err, UNIQUE_VIOLATION) {
        Some(constraint) if constraint == UQ_CATEGORIES_NAME => {
            CoreError::Validation(duplicate_name_message(name))
        }
        _ => into_core(err),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Category store backed by the `categories` table.
#[derive(Debug, Clone)]
pub struct PgCategoryStore {
    pool: DbPool,
}

impl PgCategoryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>> {
        let row = CategoryRepo::find_by_id(&self.pool, id)
            .await
            .map_err(into_core)?;
        Ok(row.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let row = CategoryRepo::find_by_name(&self.pool, name)
            .await
            .map_err(into_core)?;
        Ok(row.map(Category::from))
    }

    async fn find_all(&self) -> StoreResult<Vec<Category>> {
        let rows = CategoryRepo::list(&self.pool).await.map_err(into_core)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        CategoryRepo::exists_by_name(&self.pool, name)
            .await
            .map_err(into_core)
    }

    async fn insert(&self, input: &CreateCategory) -> StoreResult<Category> {
        let row = CategoryRepo::create(&self.pool, &input.name, input.description.as_deref())
            .await
            .map_err(|e| category_write_error(e, &input.name))?;
        Ok(row.into())
    }

    async fn save(&self, category: &Category) -> StoreResult<Category> {
        let row = CategoryRepo::update(
            &self.pool,
            category.id,
            &category.name,
            category.description.as_deref(),
        )
        .await
        .map_err(|e| category_write_error(e, &category.name))?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id: category.id,
        })?;
        Ok(row.into())
    }

    async fn delete_by_id(&self, id: DbId) -> StoreResult<bool> {
        CategoryRepo::delete(&self.pool, id).await.map_err(into_core)
    }

    async fn count(&self) -> StoreResult<i64> {
        CategoryRepo::count(&self.pool).await.map_err(into_core)
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Task store backed by the `tasks` table.
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: DbPool,
}

impl PgTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Task>> {
        TaskRepo::find_by_id(&self.pool, id)
            .await
            .map_err(into_core)?
            .map(Task::try_from)
            .transpose()
    }

    async fn find_all(&self) -> StoreResult<Vec<Task>> {
        into_tasks(TaskRepo::list(&self.pool).await.map_err(into_core)?)
    }

    async fn find_by_status(&self, status: TaskStatus) -> StoreResult<Vec<Task>> {
        into_tasks(
            TaskRepo::list_by_status(&self.pool, status.as_str())
                .await
                .map_err(into_core)?,
        )
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> StoreResult<Vec<Task>> {
        into_tasks(
            TaskRepo::list_by_priority(&self.pool, priority.as_str())
                .await
                .map_err(into_core)?,
        )
    }

    async fn find_by_category_id(&self, category_id: DbId) -> StoreResult<Vec<Task>> {
        into_tasks(
            TaskRepo::list_by_category(&self.pool, category_id)
                .await
                .map_err(into_core)?,
        )
    }

    async fn find_overdue(&self, now: Timestamp) -> StoreResult<Vec<Task>> {
        into_tasks(
            TaskRepo::list_overdue(&self.pool, now)
                .await
                .map_err(into_core)?,
        )
    }

    async fn insert(&self, task: &NewTask) -> StoreResult<Task> {
        TaskRepo::create(&self.pool, task)
            .await
            .map_err(into_core)?
            .try_into()
    }

    async fn save(&self, task: &Task) -> StoreResult<Task> {
        TaskRepo::update(&self.pool, task)
            .await
            .map_err(into_core)?
            .ok_or(CoreError::NotFound {
                entity: "Task",
                id: task.id,
            })?
            .try_into()
    }

    async fn delete_by_id(&self, id: DbId) -> StoreResult<bool> {
        TaskRepo::delete(&self.pool, id).await.map_err(into_core)
    }

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool> {
        TaskRepo::exists(&self.pool, id).await.map_err(into_core)
    }

    async fn count_by_status(&self, status: TaskStatus) -> StoreResult<i64> {
        TaskRepo::count_by_status(&self.pool, status.as_str())
            .await
            .map_err(into_core)
    }

    async fn count_by_category_id(&self, category_id: DbId) -> StoreResult<i64> {
        TaskRepo::count_by_category(&self.pool, category_id)
            .await
            .map_err(into_core)
    }

    async fn count(&self) -> StoreResult<i64> {
        TaskRepo::count(&self.pool).await.map_err(into_core)
    }
}
