//! Body and query extractors that reject through [`AppError`].
//!
//! The stock `axum::Json` and `axum::extract::Query` rejections answer in
//! plain text, which would bypass the `{"error": ...}` envelope every other
//! failure uses. These wrappers delegate the actual extraction to the stock
//! types and route the rejection through `AppError` instead.

use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::error::AppError;

/// `axum::Json` whose rejection renders as the JSON error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// `axum::extract::Query` whose rejection renders as the JSON error
/// envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
