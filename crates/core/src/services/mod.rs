//! Lifecycle services enforcing category and task business rules.
//!
//! Each service holds its store ports behind `Arc<dyn ...>` so it can be
//! cloned into request handlers and wired to either the PostgreSQL or the
//! in-memory adapters.

pub mod category;
pub mod task;

pub use category::CategoryService;
pub use task::TaskService;
