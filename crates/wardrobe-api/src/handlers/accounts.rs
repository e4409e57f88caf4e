//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | Body: [`RegisterBody`]; returns 201 + account |
//! | `GET`  | `/auth/me` | The authenticated account |
//! | `GET`  | `/auth/profile` | Same as `/auth/me` |
//! | `PUT`  | `/auth/profile` | Body: [`AccountPatch`]; name and/or email |
//! | `PUT`  | `/auth/change-password` | Body: [`ChangePasswordBody`] |

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use wardrobe_core::{
  Error,
  account::{Account, AccountPatch, NewAccount, parse_email},
  store::WardrobeStore,
};

use crate::{
  AppState,
  auth::{CurrentAccount, hash_password, verify_password},
  error::ApiError,
  extract::JsonBody,
  response::ApiResponse,
};

pub const MIN_PASSWORD_LEN: usize = 6;

fn check_password_len(password: &str) -> Result<(), Error> {
  if password.chars().count() < MIN_PASSWORD_LEN {
    return Err(Error::Validation(format!(
      "Password must be at least {MIN_PASSWORD_LEN} characters"
    )));
  }
  Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
  pub name:             String,
  pub email:            String,
  pub password:         String,
  pub confirm_password: Option<String>,
}

/// `POST /auth/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let name = body.name.trim().to_owned();
  if name.is_empty() {
    return Err(Error::Validation("name is required".into()).into());
  }
  let email = parse_email(&body.email)?;
  check_password_len(&body.password)?;
  if body.confirm_password.as_ref().is_some_and(|c| *c != body.password) {
    return Err(Error::Validation("Passwords do not match".into()).into());
  }

  let existing = state.store.find_account_by_email(email.clone()).await.map_err(ApiError::store)?;
  if existing.is_some() {
    return Err(Error::EmailTaken.into());
  }

  let password_hash = hash_password(&body.password)?;
  let input = NewAccount { name, email: email.clone(), password_hash };
  let account = match state.store.create_account(input).await {
    Ok(account) => account,
    // Lost a race with a concurrent registration for the same email.
    Err(e) => {
      let winner = state.store.find_account_by_email(email).await.map_err(ApiError::store)?;
      if winner.is_some() {
        return Err(Error::EmailTaken.into());
      }
      return Err(ApiError::store(e));
    }
  };

  tracing::info!(account_id = %account.account_id, "account registered");
  Ok((StatusCode::CREATED, ApiResponse::ok("Account created successfully", account)))
}

/// `GET /auth/me`
pub async fn me(CurrentAccount(account): CurrentAccount) -> ApiResponse<Account> {
  ApiResponse::ok("Current account", account)
}

/// `PUT /auth/profile`
pub async fn update_profile<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  JsonBody(patch): JsonBody<AccountPatch>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let patch = patch.validated()?;
  if patch.is_empty() {
    return Err(Error::Validation("Nothing to update".into()).into());
  }

  if let Some(email) = &patch.email {
    let holder = state.store.find_account_by_email(email.clone()).await.map_err(ApiError::store)?;
    if holder.is_some_and(|other| other.account_id != account.account_id) {
      return Err(Error::EmailTaken.into());
    }
  }

  let email = patch.email.clone();
  let updated = match state.store.update_account(account.account_id, patch).await {
    Ok(updated) => updated.ok_or(Error::AccountNotFound(account.account_id))?,
    // Another account claimed the email after the check above.
    Err(e) => {
      let holder = match email {
        Some(email) => state.store.find_account_by_email(email).await.map_err(ApiError::store)?,
        None => None,
      };
      if holder.is_some_and(|other| other.account_id != account.account_id) {
        return Err(Error::EmailTaken.into());
      }
      return Err(ApiError::store(e));
    }
  };

  tracing::info!(account_id = %updated.account_id, "profile updated");
  Ok(ApiResponse::ok("Profile updated successfully", updated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordBody {
  pub current_password: String,
  pub new_password:     String,
  pub confirm_password: String,
}

/// `PUT /auth/change-password`
pub async fn change_password<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  JsonBody(body): JsonBody<ChangePasswordBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  if body.current_password.is_empty() || body.new_password.is_empty() {
    return Err(Error::Validation("All fields are required".into()).into());
  }
  if body.new_password != body.confirm_password {
    return Err(Error::Validation("New passwords do not match".into()).into());
  }
  check_password_len(&body.new_password)?;
  if !verify_password(&body.current_password, &account.password_hash) {
    return Err(Error::Validation("Current password is incorrect".into()).into());
  }

  let password_hash = hash_password(&body.new_password)?;
  let changed = state
    .store
    .set_password_hash(account.account_id, password_hash)
    .await
    .map_err(ApiError::store)?;
  if !changed {
    return Err(Error::AccountNotFound(account.account_id).into());
  }

  tracing::info!(account_id = %account.account_id, "password changed");
  Ok(ApiResponse::<()>::message("Password changed successfully"))
}
