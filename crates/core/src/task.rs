//! Task entity, priority/status enums, request DTOs, and the derived-field
//! rules applied on every write.
//!
//! `completed_at` is derived: [`Task::stamp`] sets it the first time a task
//! is saved with status `COMPLETED` and nothing ever clears it. The status
//! values form an unchecked state machine; any value may follow any other.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::category::Category;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a task title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a task description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Task priority. Defaults to `MEDIUM`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// All valid priority values, in ascending order.
    pub const ALL: &'static [&'static str] = &["LOW", "MEDIUM", "HIGH", "URGENT"];

    /// Return the symbolic name, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    /// Parse a symbolic name, returning a validation error for unknown values.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            other => Err(CoreError::Validation(format!(
                "Unknown priority: '{other}'. Valid priorities: {}",
                Self::ALL.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Task status. Defaults to `PENDING`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// All valid status values.
    pub const ALL: &'static [&'static str] = &["PENDING", "IN_PROGRESS", "COMPLETED", "CANCELLED"];

    /// Return the symbolic name, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parse a symbolic name, returning a validation error for unknown values.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown status: '{other}'. Valid statuses: {}",
                Self::ALL.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A stored task. The category is a non-owning reference by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub category_id: Option<DbId>,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task that has not been persisted yet. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub category_id: Option<DbId>,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NewTask {
    /// Build an insertable task from a create request, defaulting priority
    /// and status and stamping both timestamps with `now`.
    pub fn from_request(input: CreateTask, category_id: Option<DbId>, now: Timestamp) -> Self {
        Self {
            title: input.title,
            description: input.description,
            priority: input.priority.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            category_id,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the id the store assigned.
    pub fn into_task(self, id: DbId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            category_id: self.category_id,
            due_date: self.due_date,
            completed_at: None,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Task {
    /// Refresh derived fields before persisting a mutation.
    ///
    /// `updated_at` becomes `now`. `completed_at` is set to `now` only when
    /// the task is `COMPLETED` and has never been completed before.
    pub fn stamp(&mut self, now: Timestamp) {
        self.updated_at = now;
        if self.status == TaskStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Merge the scalar fields of a patch. Category handling is resolved by
    /// the caller, since it needs a store lookup.
    pub fn merge(&mut self, patch: &UpdateTask) {
        if let Some(title) = patch.title.as_deref().filter(|t| !t.trim().is_empty()) {
            self.title = title.to_string();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
    }

    /// Due strictly before `now` and not completed.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Reference to a category inside a task request body: `{"id": 3}`.
///
/// An object with a null id is meaningful on update: it clears the link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryRef {
    #[serde(default)]
    pub id: Option<DbId>,
}

/// DTO for creating a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<Timestamp>,
}

impl CreateTask {
    /// A create request with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            status: None,
            category: None,
            due_date: None,
        }
    }

    /// The category id to resolve, if any.
    pub fn category_id(&self) -> Option<DbId> {
        self.category.as_ref().and_then(|c| c.id)
    }
}

/// DTO for the partial-merge update. Absent or null fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

/// Parse a due date. RFC 3339 instants keep their offset; ISO local
/// date-times without an offset (`2024-12-31T23:59:59`) are read as UTC.
pub fn parse_due_date(raw: &str) -> Result<Timestamp, CoreError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|local| local.and_utc())
        .map_err(|_| {
            CoreError::Validation(format!(
                "Invalid due date: '{raw}'. Expected an ISO-8601 date-time"
            ))
        })
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_due_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

/// What an update does to the task's category link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChange {
    /// No category in the patch: leave the link alone.
    Keep,
    /// Category object with a null id: remove the link.
    Clear,
    /// Category object with an id: resolve and link it.
    Assign(DbId),
}

impl UpdateTask {
    pub fn category_change(&self) -> CategoryChange {
        match &self.category {
            None => CategoryChange::Keep,
            Some(CategoryRef { id: None }) => CategoryChange::Clear,
            Some(CategoryRef { id: Some(id) }) => CategoryChange::Assign(*id),
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A task together with its resolved category, as returned over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskWithCategory {
    #[serde(flatten)]
    pub task: Task,
    pub category: Option<Category>,
}

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl TaskStats {
    pub fn total(&self) -> i64 {
        self.pending + self.in_progress + self.completed + self.cancelled
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a title supplied on create.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Task title is required".to_string()));
    }
    validate_title_length(title)
}

fn validate_title_length(title: &str) -> Result<(), CoreError> {
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Task title must be at most {MAX_TITLE_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate an optional description against the length bound.
pub fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    let len = description.map_or(0, |d| d.chars().count());
    if len > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Task description must be at most {MAX_DESCRIPTION_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate the fields of a create request.
pub fn validate_create(input: &CreateTask) -> Result<(), CoreError> {
    validate_title(&input.title)?;
    validate_description(input.description.as_deref())
}

/// Validate the fields of an update request. A blank title is not an error;
/// it is simply not applied.
pub fn validate_update(patch: &UpdateTask) -> Result<(), CoreError> {
    if let Some(title) = patch.title.as_deref() {
        validate_title_length(title)?;
    }
    validate_description(patch.description.as_deref())
}
