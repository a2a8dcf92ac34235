//! Extractors whose rejections render through [`AppError`].
//!
//! axum's own `Json`, `Query` and `Path` answer malformed input with a
//! plain-text body; these wrappers turn the rejection into
//! [`AppError::BadRequest`] so every error carries the `{error, code}` JSON.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
