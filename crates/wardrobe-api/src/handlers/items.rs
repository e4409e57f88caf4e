//! Handlers for `/wardrobe` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/wardrobe/items` | Filters: `category`, `audience`, `color`, `status`, `sort`, `page`, `limit` |
//! | `POST`   | `/wardrobe/items` | Body: [`NewItem`]; returns 201 + item |
//! | `GET`    | `/wardrobe/items/{id}` | Owner only |
//! | `PUT`    | `/wardrobe/items/{id}` | Body: [`ItemPatch`] |
//! | `DELETE` | `/wardrobe/items/{id}` | Refused while a donation is pending |
//! | `PATCH`  | `/wardrobe/items/{id}/status` | Body: `{"status":"active"\|"inactive"}` |
//! | `GET`    | `/wardrobe/dashboard-stats` | [`Dashboard`](wardrobe_core::wardrobe::Dashboard) |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use wardrobe_core::{
  item::{Audience, Category, DEFAULT_PAGE_SIZE, ItemPatch, ItemQuery, ItemSort, ItemStatus, NewItem},
  store::WardrobeStore,
  wardrobe::Wardrobe,
};

use crate::{
  AppState,
  auth::CurrentAccount,
  error::ApiError,
  extract::{JsonBody, PathParam, QueryParams},
  response::ApiResponse,
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub category: Option<Category>,
  pub audience: Option<Audience>,
  pub color:    Option<String>,
  pub status:   Option<ItemStatus>,
  #[serde(default)]
  pub sort:     ItemSort,
  pub page:     Option<u32>,
  pub limit:    Option<u32>,
}

/// `GET /wardrobe/items`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  QueryParams(params): QueryParams<ListParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let query = ItemQuery {
    owner_id: account.account_id,
    category: params.category,
    audience: params.audience,
    color:    params.color,
    status:   params.status,
    sort:     params.sort,
    page:     params.page.unwrap_or(1),
    limit:    params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
  };
  let listing = Wardrobe::new(&*state.store).list(query).await?;
  Ok(ApiResponse::ok("Items retrieved successfully", listing))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /wardrobe/items`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  JsonBody(body): JsonBody<NewItem>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let item = Wardrobe::new(&*state.store).add(account.account_id, body).await?;
  Ok((StatusCode::CREATED, ApiResponse::ok("Item added successfully", item)))
}

// ─── Single item ─────────────────────────────────────────────────────────────

/// `GET /wardrobe/items/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let item = Wardrobe::new(&*state.store).get(account.account_id, id).await?;
  Ok(ApiResponse::ok("Item retrieved successfully", item))
}

/// `PUT /wardrobe/items/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
  JsonBody(patch): JsonBody<ItemPatch>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let item = Wardrobe::new(&*state.store)
    .update(account.account_id, id, patch)
    .await?;
  Ok(ApiResponse::ok("Item updated successfully", item))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: ItemStatus,
}

/// `PATCH /wardrobe/items/{id}/status`
pub async fn set_status<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
  JsonBody(body): JsonBody<StatusBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let item = Wardrobe::new(&*state.store)
    .set_status(account.account_id, id, body.status)
    .await?;
  Ok(ApiResponse::ok("Item status updated", item))
}

/// `DELETE /wardrobe/items/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  Wardrobe::new(&*state.store).delete(account.account_id, id).await?;
  Ok(ApiResponse::message("Item deleted successfully"))
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

/// `GET /wardrobe/dashboard-stats`
pub async fn dashboard<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
) -> Result<impl IntoResponse, ApiError>
where
  S: WardrobeStore + Clone + 'static,
{
  let dashboard = Wardrobe::new(&*state.store).dashboard(account.account_id).await?;
  Ok(ApiResponse::ok("Dashboard stats retrieved successfully", dashboard))
}
