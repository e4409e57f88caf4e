//! The success envelope shared by every endpoint.

use axum::{
  Json,
  response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
  pub fn ok(message: impl Into<String>, data: T) -> Self {
    Self { success: true, message: message.into(), data: Some(data) }
  }
}

impl ApiResponse<()> {
  /// A success with nothing to return but the message.
  pub fn message(message: impl Into<String>) -> Self {
    Self { success: true, message: message.into(), data: None }
  }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
  fn into_response(self) -> Response { Json(self).into_response() }
}
