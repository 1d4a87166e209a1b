//! Category lifecycle: name uniqueness and the in-use deletion guard.

use std::sync::Arc;

use crate::category::{
    duplicate_name_message, validate_name, Category, CreateCategory, UpdateCategory,
};
use crate::error::CoreError;
use crate::store::{CategoryStore, TaskStore};
use crate::types::DbId;

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
    tasks: Arc<dyn TaskStore>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryStore>, tasks: Arc<dyn TaskStore>) -> Self {
        Self { categories, tasks }
    }

    pub async fn list(&self) -> Result<Vec<Category>, CoreError> {
        self.categories.find_all().await
    }

    pub async fn get(&self, id: DbId) -> Result<Option<Category>, CoreError> {
        self.categories.find_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Category>, CoreError> {
        self.categories.find_by_name(name).await
    }

    pub async fn count(&self) -> Result<i64, CoreError> {
        self.categories.count().await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] if the name is blank or already used.
    pub async fn create(&self, input: CreateCategory) -> Result<Category, CoreError> {
        validate_name(&input.name)?;
        if self.categories.exists_by_name(&input.name).await? {
            return Err(CoreError::Validation(duplicate_name_message(&input.name)));
        }
        let category = self.categories.insert(&input).await?;
        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Apply a partial update. Renaming to the current name is a no-op for
    /// the duplicate check.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the category does not exist,
    /// [`CoreError::Validation`] if the new name collides with another one.
    pub async fn update(&self, id: DbId, patch: UpdateCategory) -> Result<Category, CoreError> {
        let mut category = self.require(id).await?;

        if let Some(name) = patch.effective_name() {
            validate_name(name)?;
            if name != category.name && self.categories.exists_by_name(name).await? {
                return Err(CoreError::Validation(duplicate_name_message(name)));
            }
        }

        category.apply_update(patch);
        let saved = self.categories.save(&category).await?;
        tracing::info!(category_id = saved.id, "Category updated");
        Ok(saved)
    }

    /// Delete a category that no task references.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the category does not exist,
    /// [`CoreError::Validation`] carrying the task count if it is in use.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.require(id).await?;

        let task_count = self.tasks.count_by_category_id(id).await?;
        if task_count > 0 {
            tracing::warn!(category_id = id, task_count, "Category delete rejected, still in use");
            return Err(CoreError::Validation(format!(
                "Cannot delete category with id: {id}. It has {task_count} associated task(s). \
                 Remove or reassign tasks first."
            )));
        }

        if !self.categories.delete_by_id(id).await? {
            return Err(CoreError::NotFound {
                entity: "Category",
                id,
            });
        }
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    async fn require(&self, id: DbId) -> Result<Category, CoreError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Category",
                id,
            })
    }
}
