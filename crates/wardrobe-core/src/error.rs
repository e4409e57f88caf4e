//! Error types for `wardrobe-core`.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::donation::DonationStatus;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("account not found: {0}")]
  AccountNotFound(Uuid),

  #[error("email already registered")]
  EmailTaken,

  #[error("item not found: {0}")]
  ItemNotFound(Uuid),

  #[error("item {0} is not owned by the caller")]
  NotItemOwner(Uuid),

  #[error("item {0} is locked by a pending donation")]
  ItemLocked(Uuid),

  #[error("cannot donate an item to yourself")]
  SelfDonation,

  #[error("no account registered for {0:?}")]
  RecipientNotFound(String),

  #[error("donation not found: {0}")]
  DonationNotFound(Uuid),

  #[error("caller is not the recipient of donation {0}")]
  NotRecipient(Uuid),

  #[error("caller is not the donor of donation {0}")]
  NotDonor(Uuid),

  #[error("donation {id} is {status}, not pending")]
  DonationNotPending { id: Uuid, status: DonationStatus },

  #[error("notification not found: {0}")]
  NotificationNotFound(Uuid),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  Validation,
  NotFound,
  Authorization,
  Conflict,
  Internal,
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_) | Self::SelfDonation => ErrorKind::Validation,
      Self::AccountNotFound(_)
      | Self::ItemNotFound(_)
      | Self::RecipientNotFound(_)
      | Self::DonationNotFound(_)
      | Self::NotificationNotFound(_) => ErrorKind::NotFound,
      Self::NotItemOwner(_) | Self::NotRecipient(_) | Self::NotDonor(_) => {
        ErrorKind::Authorization
      }
      Self::EmailTaken | Self::ItemLocked(_) | Self::DonationNotPending { .. } => {
        ErrorKind::Conflict
      }
      Self::Serialization(_) | Self::Store(_) => ErrorKind::Internal,
    }
  }

  /// A message safe to show to the caller.
  ///
  /// Never includes identifiers. Authorization failures read exactly like the
  /// matching not-found failure so a caller cannot tell whether another
  /// user's record exists.
  pub fn public_message(&self) -> String {
    match self {
      Self::Validation(msg) => msg.clone(),
      Self::AccountNotFound(_) => "Account not found".into(),
      Self::EmailTaken => "An account with this email already exists".into(),
      Self::ItemNotFound(_) | Self::NotItemOwner(_) => "Item not found".into(),
      Self::ItemLocked(_) => {
        "Item is part of a pending donation and cannot be changed".into()
      }
      Self::SelfDonation => "You cannot donate an item to yourself".into(),
      Self::RecipientNotFound(_) => "No account is registered with that email".into(),
      Self::DonationNotFound(_) | Self::NotRecipient(_) | Self::NotDonor(_) => {
        "Donation not found".into()
      }
      Self::DonationNotPending { status, .. } => {
        format!("Donation is already {status} and can no longer be changed")
      }
      Self::NotificationNotFound(_) => "Notification not found".into(),
      Self::Serialization(_) | Self::Store(_) => "Internal server error".into(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
