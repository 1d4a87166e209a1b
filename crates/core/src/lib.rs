//! Domain core for the taskboard backend.
//!
//! Holds the entity types, validation and derived-field rules, the store
//! ports the persistence layer implements, and the two lifecycle services
//! that enforce category and task business rules on top of those ports.

pub mod category;
pub mod error;
pub mod memory;
pub mod services;
pub mod store;
pub mod task;
pub mod types;
