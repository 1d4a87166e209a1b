//! Category entity, request DTOs, and field validation.
//!
//! Categories are independent entities that tasks may reference by id.
//! A category name is unique across the store (case-sensitive exact match).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a category name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for creating a new category. The store assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// DTO for updating a category. Absent or null fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateCategory {
    /// The replacement name, if one was supplied and is not blank.
    pub fn effective_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

impl Category {
    /// Apply a patch whose name has already been checked for collisions.
    ///
    /// A blank name is ignored; a provided description (including an empty
    /// string) always overwrites.
    pub fn apply_update(&mut self, patch: UpdateCategory) {
        if let Some(name) = patch.effective_name() {
            self.name = name.to_string();
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}

/// Validate a category name for creation.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Category name is required".to_string()));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Category name must be at most {MAX_NAME_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Message reported when a name collides with an existing category.
pub fn duplicate_name_message(name: &str) -> String {
    format!("Category with name '{name}' already exists")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Category {
        Category {
            id: 1,
            name: "Work".to_string(),
            description: Some("Day job".to_string()),
        }
    }

    #[test]
    fn blank_name_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Home").is_ok());
    }

    #[test]
    fn overlong_name_rejected() {
        let name = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_name(&name).unwrap_err();
        assert!(err.to_string().contains("at most"));
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn blank_patch_name_is_ignored() {
        let mut category = sample();
        category.apply_update(UpdateCategory {
            name: Some("  ".to_string()),
            description: None,
        });
        assert_eq!(category.name, "Work");
        assert_eq!(category.description.as_deref(), Some("Day job"));
    }

    #[test]
    fn empty_description_overwrites() {
        let mut category = sample();
        category.apply_update(UpdateCategory {
            name: None,
            description: Some(String::new()),
        });
        assert_eq!(category.description.as_deref(), Some(""));
    }

    #[test]
    fn update_deserializes_missing_fields_as_none() {
        let patch: UpdateCategory = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
    }
}
