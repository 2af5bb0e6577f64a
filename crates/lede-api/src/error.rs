//! API error type and envelope-shaped [`axum::response::IntoResponse`]
//! implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use lede_core::validate::FieldError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Every variant renders as the
/// uniform `{success: false, message, errors?}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
  /// One or more field checks failed; nothing was mutated.
  #[error("validation failed")]
  Validation(Vec<FieldError>),

  #[error("a lead with this email already exists")]
  DuplicateEmail,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message, errors) = match self {
      ApiError::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        "Validation failed".to_owned(),
        Some(errors),
      ),
      ApiError::DuplicateEmail => (
        StatusCode::CONFLICT,
        "A lead with this email already exists".to_owned(),
        None,
      ),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m, None),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure reached the API boundary");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
      }
    };

    let mut body = json!({ "success": false, "message": message });
    if let Some(errors) = errors {
      body["errors"] = json!(errors);
    }
    (status, Json(body)).into_response()
  }
}
