//! Registered user accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A registered account. The password hash is stored alongside but never
/// serialised.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
  pub account_id:    Uuid,
  pub name:          String,
  /// Always lower-case; see [`normalize_email`].
  pub email:         String,
  #[serde(skip)]
  pub password_hash: String,
  pub created_at:    DateTime<Utc>,
}

/// Input for [`WardrobeStore::create_account`](crate::store::WardrobeStore::create_account).
#[derive(Debug, Clone)]
pub struct NewAccount {
  pub name:          String,
  pub email:         String,
  /// argon2 PHC string; hashing is the caller's concern.
  pub password_hash: String,
}

/// Profile changes requested by the account holder. `None` leaves a field
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPatch {
  pub name:  Option<String>,
  pub email: Option<String>,
}

impl AccountPatch {
  /// Trim the name, normalise the email, and reject blanks. Empty strings
  /// count as "not provided".
  pub fn validated(self) -> Result<Self> {
    let name = self.name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty());
    let email = match self.email.filter(|e| !e.trim().is_empty()) {
      Some(raw) => Some(parse_email(&raw)?),
      None => None,
    };
    Ok(Self { name, email })
  }

  pub fn is_empty(&self) -> bool { self.name.is_none() && self.email.is_none() }
}

/// Trim and lower-case an email address.
pub fn normalize_email(raw: &str) -> String { raw.trim().to_lowercase() }

/// Normalise `raw` and reject obviously malformed addresses.
///
/// Shallow check: one `@`, a non-empty local part and a dotted domain.
pub fn parse_email(raw: &str) -> Result<String> {
  let email = normalize_email(raw);
  if email.is_empty() {
    return Err(Error::Validation("Email is required".into()));
  }
  let valid = match email.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
    }
    None => false,
  };
  if !valid {
    return Err(Error::Validation("Email address is not valid".into()));
  }
  Ok(email)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalizes_case_and_whitespace() {
    assert_eq!(parse_email("  Bob@Example.COM ").unwrap(), "bob@example.com");
  }

  #[test]
  fn rejects_malformed() {
    for bad in ["", "bob", "@example.com", "bob@", "bob@example", "a b@example.com", "a@b@c.com"] {
      assert!(matches!(parse_email(bad), Err(Error::Validation(_))), "{bad:?}");
    }
  }

  #[test]
  fn patch_treats_blanks_as_absent() {
    let patch = AccountPatch { name: Some("  ".into()), email: Some("".into()) }
      .validated()
      .unwrap();
    assert!(patch.is_empty());

    let patch = AccountPatch { name: Some(" Ada L ".into()), email: Some(" ADA@x.org".into()) }
      .validated()
      .unwrap();
    assert_eq!(patch.name.as_deref(), Some("Ada L"));
    assert_eq!(patch.email.as_deref(), Some("ada@x.org"));

    let bad = AccountPatch { name: None, email: Some("nope".into()) }.validated();
    assert!(matches!(bad, Err(Error::Validation(_))));
  }

  #[test]
  fn password_hash_is_not_serialised() {
    let account = Account {
      account_id:    Uuid::new_v4(),
      name:          "Ada".into(),
      email:         "ada@example.com".into(),
      password_hash: "$argon2id$secret".into(),
      created_at:    Utc::now(),
    };
    let json = serde_json::to_string(&account).unwrap();
    assert!(!json.contains("argon2"));
    assert!(json.contains("accountId"));
  }
}
