//! Handlers for `/notifications` endpoints.
//!
//! All routes are scoped to the authenticated account.

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use wardrobe_core::{
  Error,
  notification::{Inbox, NewNotification, NotificationKind},
  notify::Notifier,
  store::WardrobeStore,
};

use crate::{
  AppState,
  auth::CurrentAccount,
  error::ApiError,
  extract::{JsonBody, PathParam},
  response::ApiResponse,
};

/// `GET /notifications`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let notifications = state
    .store
    .list_notifications(account.account_id, state.config.notification_limit)
    .await
    .map_err(ApiError::store)?;
  let unread_count = state
    .store
    .unread_count(account.account_id)
    .await
    .map_err(ApiError::store)?;
  Ok(ApiResponse::ok(
    "Notifications retrieved successfully",
    Inbox { notifications, unread_count },
  ))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:   String,
  pub message: String,
  pub payload: Option<serde_json::Value>,
}

/// `POST /notifications`: an outfit suggestion for the caller.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let title = body.title.trim();
  let message = body.message.trim();
  if title.is_empty() || message.is_empty() {
    return Err(Error::Validation("title and message are required".into()).into());
  }

  let mut input = NewNotification::new(
    account.account_id,
    NotificationKind::OutfitSuggestion,
    title,
    message,
  );
  if let Some(payload) = body.payload {
    input = input.with_payload(payload);
  }
  let notification = Notifier::new(&*state.store).notify(input).await?;
  Ok((StatusCode::CREATED, ApiResponse::ok("Notification created", notification)))
}

/// `PUT /notifications/{id}/read`
pub async fn mark_read<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let found = state
    .store
    .mark_read(account.account_id, id)
    .await
    .map_err(ApiError::store)?;
  if !found {
    return Err(Error::NotificationNotFound(id).into());
  }
  Ok(ApiResponse::message("Notification marked as read"))
}

/// `PUT /notifications/read-all`
pub async fn mark_all_read<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let updated = state
    .store
    .mark_all_read(account.account_id)
    .await
    .map_err(ApiError::store)?;
  Ok(ApiResponse::ok("All notifications marked as read", json!({ "updated": updated })))
}

/// `DELETE /notifications/clear`
pub async fn clear<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let deleted = state
    .store
    .clear_notifications(account.account_id)
    .await
    .map_err(ApiError::store)?;
  Ok(ApiResponse::ok("All notifications cleared", json!({ "deleted": deleted })))
}
