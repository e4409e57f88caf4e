//! HTTP Basic-auth identity extractor and password hashing.
//!
//! Credentials are `email:password`. The email is normalised before lookup
//! and the password is verified against the account's stored argon2 PHC
//! string.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;
use wardrobe_core::{
  account::{Account, normalize_email},
  store::WardrobeStore,
};

use crate::{AppState, error::ApiError};

/// The authenticated caller.
pub struct CurrentAccount(pub Account);

/// Produce an argon2 PHC string for `password`.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| ApiError::Hashing(e.to_string()))
}

/// Whether `password` matches the PHC string `password_hash`.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(password_hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

/// Pull `(email, password)` out of a Basic `Authorization` header.
fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (email, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;
  Ok((normalize_email(email), password.to_owned()))
}

impl<S> FromRequestParts<AppState<S>> for CurrentAccount
where
  S: WardrobeStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let (email, password) = basic_credentials(&parts.headers)?;

    let account = state
      .store
      .find_account_by_email(email)
      .await
      .map_err(ApiError::store)?
      .ok_or(ApiError::Unauthorized)?;

    if !verify_password(&password, &account.password_hash) {
      return Err(ApiError::Unauthorized);
    }
    Ok(CurrentAccount(account))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("hunter22").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("hunter22", &hash));
    assert!(!verify_password("hunter23", &hash));
    assert!(!verify_password("hunter22", "not-a-phc-string"));
  }

  #[test]
  fn credentials_are_normalised() {
    let mut headers = HeaderMap::new();
    let encoded = B64.encode(" Ada@Example.com:pa:ss");
    headers.insert(
      axum::http::header::AUTHORIZATION,
      format!("Basic {encoded}").parse().unwrap(),
    );
    let (email, password) = basic_credentials(&headers).unwrap();
    assert_eq!(email, "ada@example.com");
    assert_eq!(password, "pa:ss");
  }

  #[test]
  fn malformed_headers_are_unauthorized() {
    let mut headers = HeaderMap::new();
    assert!(matches!(basic_credentials(&headers), Err(ApiError::Unauthorized)));

    headers.insert(axum::http::header::AUTHORIZATION, "Bearer abc".parse().unwrap());
    assert!(matches!(basic_credentials(&headers), Err(ApiError::Unauthorized)));

    headers.insert(axum::http::header::AUTHORIZATION, "Basic !!!".parse().unwrap());
    assert!(matches!(basic_credentials(&headers), Err(ApiError::Unauthorized)));
  }
}
