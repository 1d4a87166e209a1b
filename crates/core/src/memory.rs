//! In-memory store adapters.
//!
//! Thread-safe, `RwLock`-guarded maps with sequential ids. They honour the
//! same contracts as the PostgreSQL adapters, including the unique category
//! name, so the lifecycle services and the HTTP surface can be exercised
//! without a database.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::category::{duplicate_name_message, Category, CreateCategory};
use crate::error::CoreError;
use crate::store::{CategoryStore, StoreResult, TaskStore};
use crate::task::{NewTask, Task, TaskPriority, TaskStatus};
use crate::types::{DbId, Timestamp};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<DbId, T>,
    next_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> DbId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn read<T>(lock: &RwLock<Table<T>>) -> StoreResult<RwLockReadGuard<'_, Table<T>>> {
    lock.read()
        .map_err(|err| CoreError::Internal(format!("in-memory store poisoned: {err}")))
}

fn write<T>(lock: &RwLock<Table<T>>) -> StoreResult<RwLockWriteGuard<'_, Table<T>>> {
    lock.write()
        .map_err(|err| CoreError::Internal(format!("in-memory store poisoned: {err}")))
}

fn count_where<T>(table: &Table<T>, pred: impl Fn(&T) -> bool) -> i64 {
    table.rows.values().filter(|row| pred(row)).count() as i64
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// In-memory category store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryStore {
    table: Arc<RwLock<Table<Category>>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(read(&self.table)?.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let table = read(&self.table)?;
        Ok(table.rows.values().find(|c| c.name == name).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Category>> {
        Ok(read(&self.table)?.rows.values().cloned().collect())
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(read(&self.table)?.rows.values().any(|c| c.name == name))
    }

    async fn insert(&self, input: &CreateCategory) -> StoreResult<Category> {
        let mut table = write(&self.table)?;
        if table.rows.values().any(|c| c.name == input.name) {
            return Err(CoreError::Validation(duplicate_name_message(&input.name)));
        }
        let category = Category {
            id: table.allocate_id(),
            name: input.name.clone(),
            description: input.description.clone(),
        };
        table.rows.insert(category.id, category.clone());
        Ok(category)
    }

    async fn save(&self, category: &Category) -> StoreResult<Category> {
        let mut table = write(&self.table)?;
        if !table.rows.contains_key(&category.id) {
            return Err(CoreError::NotFound {
                entity: "Category",
                id: category.id,
            });
        }
        if table
            .rows
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(CoreError::Validation(duplicate_name_message(&category.name)));
        }
        table.rows.insert(category.id, category.clone());
        Ok(category.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> StoreResult<bool> {
        Ok(write(&self.table)?.rows.remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(read(&self.table)?.rows.len() as i64)
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// In-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    table: Arc<RwLock<Table<Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter(&self, pred: impl Fn(&Task) -> bool) -> StoreResult<Vec<Task>> {
        let table = read(&self.table)?;
        Ok(table.rows.values().filter(|t| pred(t)).cloned().collect())
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(read(&self.table)?.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Task>> {
        self.filter(|_| true)
    }

    async fn find_by_status(&self, status: TaskStatus) -> StoreResult<Vec<Task>> {
        self.filter(|t| t.status == status)
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> StoreResult<Vec<Task>> {
        self.filter(|t| t.priority == priority)
    }

    async fn find_by_category_id(&self, category_id: DbId) -> StoreResult<Vec<Task>> {
        self.filter(|t| t.category_id == Some(category_id))
    }

    async fn find_overdue(&self, now: Timestamp) -> StoreResult<Vec<Task>> {
        self.filter(|t| t.is_overdue(now))
    }

    async fn insert(&self, task: &NewTask) -> StoreResult<Task> {
        let mut table = write(&self.table)?;
        let stored = task.clone().into_task(table.allocate_id());
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, task: &Task) -> StoreResult<Task> {
        let mut table = write(&self.table)?;
        let existing = table.rows.get_mut(&task.id).ok_or(CoreError::NotFound {
            entity: "Task",
            id: task.id,
        })?;
        let created_at = existing.created_at;
        *existing = Task {
            created_at,
            ..task.clone()
        };
        Ok(existing.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> StoreResult<bool> {
        Ok(write(&self.table)?.rows.remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool> {
        Ok(read(&self.table)?.rows.contains_key(&id))
    }

    async fn count_by_status(&self, status: TaskStatus) -> StoreResult<i64> {
        Ok(count_where(&*read(&self.table)?, |t| t.status == status))
    }

    async fn count_by_category_id(&self, category_id: DbId) -> StoreResult<i64> {
        Ok(count_where(&*read(&self.table)?, |t| {
            t.category_id == Some(category_id)
        }))
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(read(&self.table)?.rows.len() as i64)
    }
}
