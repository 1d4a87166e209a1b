//! Row structs for the `categories` and `tasks` tables.
//!
//! Each submodule contains a `FromRow` struct matching the table columns and
//! its conversion into the corresponding `taskboard_core` entity.

pub mod category;
pub mod task;
