//! Body, path and query extractors whose rejections use the API error envelope.

use axum::{
  Json,
  extract::{FromRequest, FromRequestParts, Path, Query, Request},
  http::request::Parts,
};
use serde::de::DeserializeOwned;
use wardrobe_core::Error;

use crate::error::ApiError;

/// [`Json`] that reports malformed bodies as validation errors.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|rejection| Error::Validation(rejection.body_text()))?;
    Ok(Self(value))
  }
}

/// [`Query`] that reports unparseable parameters as validation errors.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Query(value) = Query::<T>::from_request_parts(parts, state)
      .await
      .map_err(|rejection| Error::Validation(rejection.body_text()))?;
    Ok(Self(value))
  }
}

/// [`Path`] that reports unparseable segments (a malformed id, say) as
/// validation errors.
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
  T: DeserializeOwned + Send,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Path(value) = Path::<T>::from_request_parts(parts, state)
      .await
      .map_err(|rejection| Error::Validation(rejection.body_text()))?;
    Ok(Self(value))
  }
}
