//! Task row model.
//!
//! `priority` and `status` are stored as their symbolic names; the CHECK
//! constraints in the migration keep them within the enumerated sets.

use sqlx::FromRow;
use taskboard_core::error::CoreError;
use taskboard_core::task::{Task, TaskPriority, TaskStatus};
use taskboard_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub category_id: Option<DbId>,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TaskRow> for Task {
    type Error = CoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let priority = TaskPriority::from_str(&row.priority).map_err(|e| {
            CoreError::Internal(format!("task {} has corrupt priority: {e}", row.id))
        })?;
        let status = TaskStatus::from_str(&row.status).map_err(|e| {
            CoreError::Internal(format!("task {} has corrupt status: {e}", row.id))
        })?;
        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            priority,
            status,
            category_id: row.category_id,
            due_date: row.due_date,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
