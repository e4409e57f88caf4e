//! Handlers for `/donations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/donations/send` | Body: [`SendBody`]; returns 201 + donation |
//! | `GET`  | `/donations` | `?type=sent\|received\|history\|pending` (default `history`) |
//! | `GET`  | `/donations/pending` | Same as `?type=pending` |
//! | `GET`  | `/donations/{id}` | Donor or recipient only |
//! | `POST`/`PUT` | `/donations/{id}/accept` | Recipient only |
//! | `POST`/`PUT` | `/donations/{id}/reject` | Recipient only |
//! | `POST`/`PUT` | `/donations/{id}/cancel` | Donor only |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use wardrobe_core::{
  donation::DonationListKind,
  store::WardrobeStore,
  workflow::TransitionOutcome,
};

use crate::{
  AppState,
  auth::CurrentAccount,
  error::ApiError,
  extract::{JsonBody, PathParam, QueryParams},
  response::ApiResponse,
};

// ─── Send ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBody {
  pub item_id:         Uuid,
  pub recipient_email: String,
  pub notes:           Option<String>,
}

/// `POST /donations/send`
pub async fn send<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(donor): CurrentAccount,
  JsonBody(body): JsonBody<SendBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let donation = state
    .workflow()
    .propose(&donor, body.item_id, &body.recipient_email, body.notes)
    .await?;
  Ok((StatusCode::CREATED, ApiResponse::ok("Donation sent successfully", donation)))
}

// ─── Queries ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(rename = "type", default)]
  pub kind: DonationListKind,
}

/// `GET /donations?type=...`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(viewer): CurrentAccount,
  QueryParams(params): QueryParams<ListParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let listing = state.workflow().list(&viewer, params.kind).await?;
  Ok(ApiResponse::ok("Donations retrieved successfully", listing))
}

/// `GET /donations/pending`
pub async fn pending<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(viewer): CurrentAccount,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let listing = state.workflow().list(&viewer, DonationListKind::Pending).await?;
  Ok(ApiResponse::ok("Pending donations retrieved successfully", listing))
}

/// `GET /donations/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(viewer): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let view = state.workflow().get(&viewer, id).await?;
  Ok(ApiResponse::ok("Donation retrieved successfully", view))
}

// ─── Transitions ──────────────────────────────────────────────────────────────

fn transition_response(verb: &str, outcome: TransitionOutcome) -> ApiResponse<TransitionOutcome> {
  let message = if outcome.item_synced {
    format!("Donation {verb} successfully")
  } else {
    format!("Donation {verb}; the item update is pending reconciliation")
  };
  ApiResponse::ok(message, outcome)
}

/// `POST|PUT /donations/{id}/accept`
pub async fn accept<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(recipient): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let outcome = state.workflow().accept(&recipient, id).await?;
  Ok(transition_response("accepted", outcome))
}

/// `POST|PUT /donations/{id}/reject`
pub async fn reject<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(recipient): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let outcome = state.workflow().reject(&recipient, id).await?;
  Ok(transition_response("rejected", outcome))
}

/// `POST|PUT /donations/{id}/cancel`
pub async fn cancel<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(donor): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let outcome = state.workflow().cancel(&donor, id).await?;
  Ok(transition_response("cancelled", outcome))
}
