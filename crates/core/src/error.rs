use crate::types::DbId;

/// Boxed error raised by a store adapter.
pub type StoreSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[source] StoreSource),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap an adapter-level failure.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(err))
    }

    /// True when this is a `NotFound` for the given entity name.
    pub fn is_not_found_for(&self, name: &str) -> bool {
        matches!(self, Self::NotFound { entity, .. } if *entity == name)
    }
}
