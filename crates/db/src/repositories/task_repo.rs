//! Repository for the `tasks` table.

use sqlx::PgPool;
use taskboard_core::task::{NewTask, Task};
use taskboard_core::types::{DbId, Timestamp};

use crate::models::task::TaskRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, priority, status, category_id, \
                       due_date, completed_at, created_at, updated_at";

/// Provides CRUD and filter queries for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row. `completed_at` starts
    /// out NULL.
    pub async fn create(pool: &PgPool, input: &NewTask) -> Result<TaskRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (title, description, priority, status, category_id, due_date, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority.as_str())
            .bind(input.status.as_str())
            .bind(input.category_id)
            .bind(input.due_date)
            .bind(input.created_at)
            .bind(input.updated_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<TaskRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks ORDER BY id");
        sqlx::query_as::<_, TaskRow>(&query).fetch_all(pool).await
    }

    pub async fn list_by_status(pool: &PgPool, status: &str) -> Result<Vec<TaskRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE status = $1 ORDER BY id");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_priority(
        pool: &PgPool,
        priority: &str,
    ) -> Result<Vec<TaskRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE priority = $1 ORDER BY id");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(priority)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<TaskRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE category_id = $1 ORDER BY id");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Tasks due strictly before `now` whose status is not `COMPLETED`.
    pub async fn list_overdue(pool: &PgPool, now: Timestamp) -> Result<Vec<TaskRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE due_date < $1 AND status <> 'COMPLETED'
             ORDER BY id"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column. `created_at` is never written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, task: &Task) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = $2,
                description = $3,
                priority = $4,
                status = $5,
                category_id = $6,
                due_date = $7,
                completed_at = $8,
                updated_at = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.priority.as_str())
            .bind(task.status.as_str())
            .bind(task.category_id)
            .bind(task.due_date)
            .bind(task.completed_at)
            .bind(task.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM tasks WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_category(pool: &PgPool, category_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
