use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// `axum::Json` whose rejections render as `AppError::Validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` whose rejections render as `AppError::Validation`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);
