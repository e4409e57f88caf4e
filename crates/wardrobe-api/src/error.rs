//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Failures are rendered as `{"success": false, "message": ..., "error":
//! <kind>}`. Authorization failures share the status and message of the
//! matching not-found failure.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use wardrobe_core::ErrorKind;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("password hashing failed: {0}")]
  Hashing(String),

  #[error(transparent)]
  Core(#[from] wardrobe_core::Error),
}

impl ApiError {
  /// Wrap a backend failure.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Core(wardrobe_core::Error::store(e))
  }
}

fn status_for(kind: ErrorKind) -> StatusCode {
  match kind {
    ErrorKind::Validation => StatusCode::BAD_REQUEST,
    ErrorKind::NotFound | ErrorKind::Authorization => StatusCode::NOT_FOUND,
    ErrorKind::Conflict => StatusCode::CONFLICT,
    ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Unauthorized => {
        let body = json!({
          "success": false,
          "message": "Authentication required",
          "error": "unauthorized",
        });
        let mut res = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"wardrobe\""),
        );
        res
      }
      ApiError::Hashing(msg) => {
        tracing::error!(error = %msg, "password hashing failed");
        let body = json!({
          "success": false,
          "message": "Internal server error",
          "error": ErrorKind::Internal,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
      }
      ApiError::Core(e) => {
        let kind = e.kind();
        if kind == ErrorKind::Internal {
          tracing::error!(error = %e, "request failed");
        } else {
          tracing::debug!(error = %e, ?kind, "request rejected");
        }
        let body = json!({
          "success": false,
          "message": e.public_message(),
          "error": kind,
        });
        (status_for(kind), Json(body)).into_response()
      }
    }
  }
}
