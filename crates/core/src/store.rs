//! Store ports for categories and tasks.
//!
//! The lifecycle services depend only on these traits. The PostgreSQL
//! adapters live in `taskboard_db`; [`crate::memory`] provides an in-memory
//! implementation for tests and local runs.

use async_trait::async_trait;

use crate::category::{Category, CreateCategory};
use crate::error::CoreError;
use crate::task::{NewTask, Task, TaskPriority, TaskStatus};
use crate::types::{DbId, Timestamp};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, CoreError>;

/// Category persistence contract.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>>;

    /// Exact, case-sensitive name lookup.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>>;

    /// All categories ordered by id.
    async fn find_all(&self) -> StoreResult<Vec<Category>>;

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool>;

    /// Insert a new category, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name is already taken.
    async fn insert(&self, input: &CreateCategory) -> StoreResult<Category>;

    /// Overwrite an existing category's name and description.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] when the row no longer exists and
    /// [`CoreError::Validation`] when the name is already taken.
    async fn save(&self, category: &Category) -> StoreResult<Category>;

    /// Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: DbId) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<i64>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Task>>;

    /// All tasks ordered by id.
    async fn find_all(&self) -> StoreResult<Vec<Task>>;

    async fn find_by_status(&self, status: TaskStatus) -> StoreResult<Vec<Task>>;

    async fn find_by_priority(&self, priority: TaskPriority) -> StoreResult<Vec<Task>>;

    async fn find_by_category_id(&self, category_id: DbId) -> StoreResult<Vec<Task>>;

    /// Tasks with a due date strictly before `now` that are not `COMPLETED`.
    async fn find_overdue(&self, now: Timestamp) -> StoreResult<Vec<Task>>;

    /// Insert a new task, returning it with its assigned id.
    async fn insert(&self, task: &NewTask) -> StoreResult<Task>;

    /// Overwrite every mutable column of an existing task. `created_at` is
    /// never written.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] when the row no longer exists.
    async fn save(&self, task: &Task) -> StoreResult<Task>;

    /// Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: DbId) -> StoreResult<bool>;

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool>;

    async fn count_by_status(&self, status: TaskStatus) -> StoreResult<i64>;

    /// Number of tasks referencing the category.
    async fn count_by_category_id(&self, category_id: DbId) -> StoreResult<i64>;

    async fn count(&self) -> StoreResult<i64>;
}
