//! Taskboard API server library.
//!
//! Exposes configuration, application state, error handling, handlers and
//! the route tree so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
