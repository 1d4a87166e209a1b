//! Translation of sqlx failures into domain errors.
//!
//! Constraint violations the schema enforces as a backstop become
//! [`CoreError::Validation`]; everything else is wrapped as a store failure.

use taskboard_core::error::CoreError;

/// PostgreSQL `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL `check_violation`.
pub const CHECK_VIOLATION: &str = "23514";

/// Unique constraint on `categories.name`.
pub const UQ_CATEGORIES_NAME: &str = "uq_categories_name";

/// If `err` is a database error with the given SQLSTATE, return the name of
/// the violated constraint.
pub fn violated_constraint(err: &sqlx::Error, sqlstate: &str) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(sqlstate) => {
            Some(db_err.constraint().unwrap_or("unknown").to_string())
        }
        _ => None,
    }
}

/// Map a sqlx error to a [`CoreError`].
pub fn into_core(err: sqlx::Error) -> CoreError {
    if let Some(constraint) = violated_constraint(&err, FOREIGN_KEY_VIOLATION) {
        return CoreError::Validation(format!(
            "Operation violates reference constraint: {constraint}"
        ));
    }
    if let Some(constraint) = violated_constraint(&err, CHECK_VIOLATION) {
        return CoreError::Validation(format!("Value violates check constraint: {constraint}"));
    }
    if let Some(constraint) = violated_constraint(&err, UNIQUE_VIOLATION) {
        return CoreError::Validation(format!(
            "Duplicate value violates unique constraint: {constraint}"
        ));
    }
    CoreError::store(err)
}
