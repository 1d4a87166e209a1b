//! Task lifecycle: category reference resolution, partial-merge updates,
//! and the stamp-and-persist path every mutation goes through.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::category::Category;
use crate::error::CoreError;
use crate::store::{CategoryStore, TaskStore};
use crate::task::{
    validate_create, validate_update, CategoryChange, CreateTask, NewTask, Task, TaskPriority,
    TaskStats, TaskStatus, TaskWithCategory, UpdateTask,
};
use crate::types::{DbId, Timestamp};

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    categories: Arc<dyn CategoryStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self { tasks, categories }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub async fn list(&self) -> Result<Vec<Task>, CoreError> {
        self.tasks.find_all().await
    }

    pub async fn get(&self, id: DbId) -> Result<Option<Task>, CoreError> {
        self.tasks.find_by_id(id).await
    }

    pub async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, CoreError> {
        self.tasks.find_by_status(status).await
    }

    pub async fn list_by_priority(&self, priority: TaskPriority) -> Result<Vec<Task>, CoreError> {
        self.tasks.find_by_priority(priority).await
    }

    pub async fn list_by_category(&self, category_id: DbId) -> Result<Vec<Task>, CoreError> {
        self.tasks.find_by_category_id(category_id).await
    }

    /// Overdue as of the moment of the call.
    pub async fn list_overdue(&self) -> Result<Vec<Task>, CoreError> {
        self.list_overdue_at(Utc::now()).await
    }

    pub async fn list_overdue_at(&self, now: Timestamp) -> Result<Vec<Task>, CoreError> {
        self.tasks.find_overdue(now).await
    }

    pub async fn count_by_status(&self, status: TaskStatus) -> Result<i64, CoreError> {
        self.tasks.count_by_status(status).await
    }

    pub async fn count(&self) -> Result<i64, CoreError> {
        self.tasks.count().await
    }

    pub async fn stats(&self) -> Result<TaskStats, CoreError> {
        Ok(TaskStats {
            pending: self.count_by_status(TaskStatus::Pending).await?,
            in_progress: self.count_by_status(TaskStatus::InProgress).await?,
            completed: self.count_by_status(TaskStatus::Completed).await?,
            cancelled: self.count_by_status(TaskStatus::Cancelled).await?,
        })
    }

    /// Attach each task's category, looking every distinct id up once.
    pub async fn resolve(&self, tasks: Vec<Task>) -> Result<Vec<TaskWithCategory>, CoreError> {
        let mut cache: HashMap<DbId, Option<Category>> = HashMap::new();
        let mut resolved = Vec::with_capacity(tasks.len());
        for task in tasks {
            let category = match task.category_id {
                Some(id) => match cache.get(&id) {
                    Some(hit) => hit.clone(),
                    None => {
                        let found = self.categories.find_by_id(id).await?;
                        cache.insert(id, found.clone());
                        found
                    }
                },
                None => None,
            };
            resolved.push(TaskWithCategory { task, category });
        }
        Ok(resolved)
    }

    pub async fn resolve_one(&self, task: Task) -> Result<TaskWithCategory, CoreError> {
        let category = match task.category_id {
            Some(id) => self.categories.find_by_id(id).await?,
            None => None,
        };
        Ok(TaskWithCategory { task, category })
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a task, resolving its category reference first.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] for a blank title or an overlong
    /// description, [`CoreError::NotFound`] for an unknown category id. No
    /// task is persisted in either case.
    pub async fn create(&self, input: CreateTask) -> Result<Task, CoreError> {
        validate_create(&input)?;
        let category_id = match input.category_id() {
            Some(id) => Some(self.require_category(id).await?.id),
            None => None,
        };

        let new_task = NewTask::from_request(input, category_id, Utc::now());
        let task = self.tasks.insert(&new_task).await?;
        tracing::info!(task_id = task.id, category_id = ?task.category_id, "Task created");
        Ok(task)
    }

    /// Partial-merge update. Only provided, non-null fields overwrite; a
    /// blank title is ignored. The category link follows
    /// [`UpdateTask::category_change`].
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] for an unknown task (entity `Task`) or an
    /// unknown category (entity `Category`).
    pub async fn update(&self, id: DbId, patch: UpdateTask) -> Result<Task, CoreError> {
        let mut task = self.require(id).await?;
        validate_update(&patch)?;

        task.merge(&patch);
        match patch.category_change() {
            CategoryChange::Keep => {}
            CategoryChange::Clear => task.category_id = None,
            CategoryChange::Assign(category_id) => {
                task.category_id = Some(self.require_category(category_id).await?.id);
            }
        }

        let saved = self.persist(task).await?;
        tracing::info!(task_id = saved.id, status = %saved.status, "Task updated");
        Ok(saved)
    }

    /// Set only the status. The completion stamp still applies.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the task does not exist.
    pub async fn update_status(&self, id: DbId, status: TaskStatus) -> Result<Task, CoreError> {
        let mut task = self.require(id).await?;
        task.status = status;

        let saved = self.persist(task).await?;
        tracing::info!(task_id = saved.id, status = %saved.status, "Task status updated");
        Ok(saved)
    }

    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the task does not exist.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if !self.tasks.exists_by_id(id).await? || !self.tasks.delete_by_id(id).await? {
            return Err(CoreError::NotFound { entity: "Task", id });
        }
        tracing::info!(task_id = id, "Task deleted");
        Ok(())
    }

    /// The single write path for existing tasks: stamp derived fields, then
    /// save.
    async fn persist(&self, mut task: Task) -> Result<Task, CoreError> {
        task.stamp(Utc::now());
        self.tasks.save(&task).await
    }

    async fn require(&self, id: DbId) -> Result<Task, CoreError> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Task", id })
    }

    async fn require_category(&self, id: DbId) -> Result<Category, CoreError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Category",
                id,
            })
    }
}
