//! End-to-end tests driving the router with `tower::ServiceExt::oneshot`.

use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version, password_hash::SaltString};
use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use wardrobe_core::{
  account::{Account, NewAccount},
  store::WardrobeStore,
};
use wardrobe_store_sqlite::SqliteStore;

use super::*;

const PASSWORD: &str = "secret-pw";

async fn make_state(config: ServerConfig) -> AppState<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  AppState::new(store, config)
}

/// Seed an account directly, hashed with minimal argon2 cost so that
/// per-request verification stays fast.
async fn seed(state: &AppState<SqliteStore>, name: &str, email: &str) -> Account {
  let params = Params::new(8, 1, 1, None).unwrap();
  let salt = SaltString::generate(&mut OsRng);
  let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    .hash_password(PASSWORD.as_bytes(), &salt)
    .unwrap()
    .to_string();
  state
    .store
    .create_account(NewAccount { name: name.into(), email: email.into(), password_hash })
    .await
    .unwrap()
}

fn basic(email: &str) -> String {
  format!("Basic {}", B64.encode(format!("{email}:{PASSWORD}")))
}

async fn call(
  state: &AppState<SqliteStore>,
  method: &str,
  uri: &str,
  auth: Option<&str>,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(email) = auth {
    builder = builder.header(header::AUTHORIZATION, basic(email));
  }
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = router(state.clone())
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  (status, json)
}

async fn add_item(state: &AppState<SqliteStore>, email: &str, name: &str) -> String {
  let (status, body) = call(
    state,
    "POST",
    "/wardrobe/items",
    Some(email),
    Some(json!({
      "name": name,
      "category": "Jacket",
      "audience": "Kids (Girl)",
      "color": "Navy",
      "imageUrl": "/uploads/images/jacket.png",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  body["data"]["itemId"].as_str().unwrap().to_string()
}

// ── Accounts ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_authenticate() {
  let state = make_state(ServerConfig::default()).await;
  let (status, body) = call(
    &state,
    "POST",
    "/auth/register",
    None,
    Some(json!({
      "name": "Ada",
      "email": "Ada@Example.com",
      "password": PASSWORD,
      "confirmPassword": PASSWORD,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  assert_eq!(body["success"], true);
  assert_eq!(body["data"]["email"], "ada@example.com");
  assert!(body["data"].get("passwordHash").is_none());

  let (status, body) = call(&state, "GET", "/auth/me", Some("ada@example.com"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["name"], "Ada");

  let (status, body) = call(
    &state,
    "POST",
    "/auth/register",
    None,
    Some(json!({ "name": "Other", "email": "ada@example.com", "password": PASSWORD })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn register_validates_input() {
  let state = make_state(ServerConfig::default()).await;
  let cases = [
    json!({ "name": "Ada", "email": "ada@example.com", "password": "short" }),
    json!({ "name": "Ada", "email": "ada@example.com", "password": PASSWORD, "confirmPassword": "nope" }),
    json!({ "name": " ", "email": "ada@example.com", "password": PASSWORD }),
    json!({ "name": "Ada", "email": "ada-at-example", "password": PASSWORD }),
    json!({ "name": "Ada" }),
  ];
  for case in cases {
    let (status, body) = call(&state, "POST", "/auth/register", None, Some(case.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "validation");
  }
}

#[tokio::test]
async fn unauthenticated_requests_return_401() {
  let state = make_state(ServerConfig::default()).await;
  seed(&state, "Ada", "ada@example.com").await;

  let (status, body) = call(&state, "GET", "/wardrobe/items", None, None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["success"], false);

  let bad = Request::builder()
    .uri("/donations")
    .header(
      header::AUTHORIZATION,
      format!("Basic {}", B64.encode("ada@example.com:wrong")),
    )
    .body(Body::empty())
    .unwrap();
  let resp = router(state.clone()).oneshot(bad).await.unwrap();
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn profile_update_keeps_unresolved_donations_visible() {
  let config = ServerConfig { allow_unregistered_recipients: true, ..ServerConfig::default() };
  let state = make_state(config).await;
  seed(&state, "Bob", "bob@example.com").await;
  let item_id = add_item(&state, "bob@example.com", "Wool Scarf").await;

  // Sent before Nia has an account, so the recipient stays unresolved.
  let (status, body) = call(
    &state,
    "POST",
    "/donations/send",
    Some("bob@example.com"),
    Some(json!({ "itemId": item_id, "recipientEmail": "nia@example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  assert!(body["data"]["recipientId"].is_null());
  seed(&state, "Nia", "nia@example.com").await;

  let (status, body) = call(
    &state,
    "PUT",
    "/auth/profile",
    Some("nia@example.com"),
    Some(json!({ "email": "bob@example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["error"], "conflict");

  let (status, body) = call(
    &state,
    "PUT",
    "/auth/profile",
    Some("nia@example.com"),
    Some(json!({ "name": " Nia K ", "email": "Nia.K@Example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["data"]["name"], "Nia K");
  assert_eq!(body["data"]["email"], "nia.k@example.com");

  let (status, _) = call(&state, "GET", "/auth/me", Some("nia@example.com"), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  let (_, body) = call(&state, "GET", "/donations/pending", Some("nia.k@example.com"), None).await;
  let pending = body["data"]["donations"].as_array().unwrap();
  assert_eq!(pending.len(), 1);
  assert_eq!(pending[0]["direction"], "received");

  let (status, body) =
    call(&state, "PUT", "/auth/profile", Some("nia.k@example.com"), Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn change_password_requires_the_current_one() {
  let state = make_state(ServerConfig::default()).await;
  seed(&state, "Ada", "ada@example.com").await;
  let ada = Some("ada@example.com");

  let change = |current: &str, new: &str, confirm: &str| {
    json!({ "currentPassword": current, "newPassword": new, "confirmPassword": confirm })
  };
  let cases = [
    (change("wrong-pw", "fresh-pw", "fresh-pw"), "Current password is incorrect"),
    (change(PASSWORD, "fresh-pw", "other-pw"), "New passwords do not match"),
    (change(PASSWORD, "tiny", "tiny"), "Password must be at least 6 characters"),
  ];
  for (body, message) in cases {
    let (status, resp) = call(&state, "PUT", "/auth/change-password", ada, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], message);
  }

  let (status, body) = call(
    &state,
    "PUT",
    "/auth/change-password",
    ada,
    Some(change(PASSWORD, "fresh-pw", "fresh-pw")),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["message"], "Password changed successfully");

  let (status, _) = call(&state, "GET", "/auth/me", ada, None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  let req = Request::builder()
    .uri("/auth/me")
    .header(header::AUTHORIZATION, format!("Basic {}", B64.encode("ada@example.com:fresh-pw")))
    .body(Body::empty())
    .unwrap();
  let resp = router(state.clone()).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
}

// ── Wardrobe ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn item_lifecycle() {
  let state = make_state(ServerConfig::default()).await;
  seed(&state, "Ada", "ada@example.com").await;
  let ada = Some("ada@example.com");
  let id = add_item(&state, "ada@example.com", "Rain Jacket").await;
  add_item(&state, "ada@example.com", "Parka").await;

  let (status, body) = call(&state, "GET", "/wardrobe/items?limit=1&sort=name", ada, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["items"][0]["name"], "Parka");
  assert_eq!(body["data"]["pagination"]["totalPages"], 2);
  assert_eq!(body["data"]["pagination"]["hasNext"], true);
  assert_eq!(body["data"]["stats"]["activeRate"], 100);

  let (status, body) = call(
    &state,
    "PATCH",
    &format!("/wardrobe/items/{id}/status"),
    ada,
    Some(json!({ "status": "inactive" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["status"], "inactive");

  let (status, body) = call(
    &state,
    "PUT",
    &format!("/wardrobe/items/{id}"),
    ada,
    Some(json!({ "color": "Olive" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["color"], "Olive");
  assert_eq!(body["data"]["audience"], "Kids (Girl)");

  let (status, body) = call(&state, "GET", "/wardrobe/dashboard-stats", ada, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["stats"]["inactive"], 1);
  assert_eq!(body["data"]["categories"][0]["count"], 2);

  let (status, _) = call(&state, "DELETE", &format!("/wardrobe/items/{id}"), ada, None).await;
  assert_eq!(status, StatusCode::OK);
  let (status, body) = call(&state, "GET", &format!("/wardrobe/items/{id}"), ada, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn bad_list_parameters_are_validation_errors() {
  let state = make_state(ServerConfig::default()).await;
  seed(&state, "Ada", "ada@example.com").await;
  let ada = Some("ada@example.com");

  for uri in ["/wardrobe/items?page=0", "/wardrobe/items?limit=500", "/wardrobe/items?category=Hat"] {
    let (status, body) = call(&state, "GET", uri, ada, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert_eq!(body["error"], "validation");
  }

  let (status, _) = call(&state, "GET", "/donations?type=everything", ada, None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Donations ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn donation_accept_round_trip() {
  let state = make_state(ServerConfig::default()).await;
  let ada = seed(&state, "Ada", "ada@example.com").await;
  let bob = seed(&state, "Bob", "bob@example.com").await;
  let item_id = add_item(&state, "ada@example.com", "Rain Jacket").await;

  let (status, body) = call(
    &state,
    "POST",
    "/donations/send",
    Some("ada@example.com"),
    Some(json!({ "itemId": item_id, "recipientEmail": "BOB@example.com", "notes": "warm" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  assert_eq!(body["data"]["status"], "pending");
  let donation_id = body["data"]["donationId"].as_str().unwrap().to_string();

  let (_, body) =
    call(&state, "GET", &format!("/wardrobe/items/{item_id}"), Some("ada@example.com"), None).await;
  assert_eq!(body["data"]["status"], "donated");

  let (_, body) = call(&state, "GET", "/donations?type=received", Some("bob@example.com"), None).await;
  assert_eq!(body["data"]["donations"][0]["donationId"], donation_id);
  assert_eq!(body["data"]["donations"][0]["direction"], "received");
  assert_eq!(body["data"]["stats"]["pending"], 1);

  let (status, body) = call(
    &state,
    "POST",
    &format!("/donations/{donation_id}/accept"),
    Some("bob@example.com"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["data"]["donation"]["status"], "completed");
  assert_eq!(body["data"]["itemSynced"], true);

  let (_, body) =
    call(&state, "GET", &format!("/wardrobe/items/{item_id}"), Some("bob@example.com"), None).await;
  assert_eq!(body["data"]["ownerId"], bob.account_id.to_string());
  assert_eq!(body["data"]["status"], "active");

  let (status, body) = call(
    &state,
    "PUT",
    &format!("/donations/{donation_id}/accept"),
    Some("bob@example.com"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["error"], "conflict");

  let (_, body) = call(&state, "GET", "/notifications", Some("ada@example.com"), None).await;
  assert_eq!(body["data"]["notifications"][0]["kind"], "donation_accepted");
  assert_eq!(body["data"]["notifications"][0]["accountId"], ada.account_id.to_string());
}

#[tokio::test]
async fn donation_errors_use_the_envelope() {
  let state = make_state(ServerConfig::default()).await;
  seed(&state, "Ada", "ada@example.com").await;
  seed(&state, "Bob", "bob@example.com").await;
  seed(&state, "Cy", "cy@example.com").await;
  let item_id = add_item(&state, "ada@example.com", "Rain Jacket").await;

  let (status, body) = call(
    &state,
    "POST",
    "/donations/send",
    Some("ada@example.com"),
    Some(json!({ "itemId": item_id, "recipientEmail": "ada@example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "You cannot donate an item to yourself");

  let (status, body) = call(
    &state,
    "POST",
    "/donations/send",
    Some("ada@example.com"),
    Some(json!({ "itemId": item_id, "recipientEmail": "ghost@example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "not_found");

  let (_, body) = call(
    &state,
    "POST",
    "/donations/send",
    Some("ada@example.com"),
    Some(json!({ "itemId": item_id, "recipientEmail": "bob@example.com" })),
  )
  .await;
  let donation_id = body["data"]["donationId"].as_str().unwrap().to_string();

  // A third party sees the same thing as for a missing donation.
  let (status, body) =
    call(&state, "POST", &format!("/donations/{donation_id}/accept"), Some("cy@example.com"), None)
      .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Donation not found");
  let (status, _) =
    call(&state, "GET", &format!("/donations/{donation_id}"), Some("cy@example.com"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, body) =
    call(&state, "DELETE", &format!("/wardrobe/items/{item_id}"), Some("ada@example.com"), None)
      .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["success"], false);

  let (status, body) =
    call(&state, "PUT", &format!("/donations/{donation_id}/cancel"), Some("ada@example.com"), None)
      .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["donation"]["status"], "cancelled");
}

#[tokio::test]
async fn malformed_ids_use_the_envelope() {
  let state = make_state(ServerConfig::default()).await;
  seed(&state, "Ada", "ada@example.com").await;
  let ada = Some("ada@example.com");

  for (method, uri) in [
    ("POST", "/donations/not-a-uuid/accept"),
    ("PUT", "/donations/not-a-uuid/cancel"),
    ("GET", "/donations/42"),
    ("GET", "/wardrobe/items/not-a-uuid"),
    ("DELETE", "/wardrobe/items/not-a-uuid"),
    ("PUT", "/notifications/not-a-uuid/read"),
  ] {
    let (status, body) = call(&state, method, uri, ada, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
    assert_eq!(body["success"], false, "{method} {uri}");
    assert_eq!(body["error"], "validation", "{method} {uri}");
  }
}

#[tokio::test]
async fn unregistered_recipients_when_allowed() {
  let config = ServerConfig { allow_unregistered_recipients: true, ..ServerConfig::default() };
  let state = make_state(config).await;
  seed(&state, "Ada", "ada@example.com").await;
  let item_id = add_item(&state, "ada@example.com", "Rain Jacket").await;

  let (status, body) = call(
    &state,
    "POST",
    "/donations/send",
    Some("ada@example.com"),
    Some(json!({ "itemId": item_id, "recipientEmail": "nia@example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  assert!(body["data"]["recipientId"].is_null());
  let donation_id = body["data"]["donationId"].as_str().unwrap().to_string();

  seed(&state, "Nia", "nia@example.com").await;
  let (status, body) =
    call(&state, "POST", &format!("/donations/{donation_id}/reject"), Some("nia@example.com"), None)
      .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["data"]["donation"]["status"], "rejected");
  assert!(body["data"]["donation"]["recipientId"].is_string());
}

// ── Notifications ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn notification_inbox() {
  let state = make_state(ServerConfig::default()).await;
  seed(&state, "Ada", "ada@example.com").await;
  seed(&state, "Bob", "bob@example.com").await;
  let ada = Some("ada@example.com");

  let (status, body) = call(
    &state,
    "POST",
    "/notifications",
    ada,
    Some(json!({
      "title": "Today's outfit",
      "message": "Navy tee with beige chinos",
      "payload": { "matchScore": "Perfect" },
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  assert_eq!(body["data"]["kind"], "outfit_suggestion");
  let id = body["data"]["notificationId"].as_str().unwrap().to_string();

  let (_, body) = call(&state, "GET", "/notifications", ada, None).await;
  assert_eq!(body["data"]["unreadCount"], 1);

  let (status, _) =
    call(&state, "PUT", &format!("/notifications/{id}/read"), Some("bob@example.com"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = call(&state, "PUT", &format!("/notifications/{id}/read"), ada, None).await;
  assert_eq!(status, StatusCode::OK);

  let (_, body) = call(&state, "PUT", "/notifications/read-all", ada, None).await;
  assert_eq!(body["data"]["updated"], 0);

  let (_, body) = call(&state, "DELETE", "/notifications/clear", ada, None).await;
  assert_eq!(body["data"]["deleted"], 1);
  let (_, body) = call(&state, "GET", "/notifications", ada, None).await;
  assert_eq!(body["data"]["notifications"].as_array().unwrap().len(), 0);
}
