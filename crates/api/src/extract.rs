//! Extractors whose rejections render as the JSON error body.

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// [`axum::extract::Path`] with rejections reported through [`AppError`],
/// so a malformed path segment (`/api/tasks/abc`) answers with
/// `{"error", "code"}` like every other failure.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
