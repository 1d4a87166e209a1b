use std::sync::Arc;

use taskboard_core::services::{CategoryService, TaskService};
use taskboard_core::store::{CategoryStore, TaskStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the services hold their stores behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub tasks: TaskService,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire both lifecycle services over the same pair of stores.
    pub fn new(
        category_store: Arc<dyn CategoryStore>,
        task_store: Arc<dyn TaskStore>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            categories: CategoryService::new(category_store.clone(), task_store.clone()),
            tasks: TaskService::new(task_store, category_store),
            config,
        }
    }
}
