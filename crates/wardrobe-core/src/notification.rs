//! Notification records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
  DonationSent,
  DonationReceived,
  DonationAccepted,
  DonationRejected,
  DonationCancelled,
  OutfitSuggestion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  pub notification_id:  Uuid,
  pub account_id:       Uuid,
  pub title:            String,
  pub message:          String,
  pub kind:             NotificationKind,
  pub related_donation: Option<Uuid>,
  /// Free-form structured data, e.g. the outfit in a suggestion.
  pub payload:          Option<serde_json::Value>,
  pub read:             bool,
  pub created_at:       DateTime<Utc>,
}

/// Input for [`WardrobeStore::push_notification`](crate::store::WardrobeStore::push_notification).
#[derive(Debug, Clone)]
pub struct NewNotification {
  pub account_id:       Uuid,
  pub title:            String,
  pub message:          String,
  pub kind:             NotificationKind,
  pub related_donation: Option<Uuid>,
  pub payload:          Option<serde_json::Value>,
}

impl NewNotification {
  pub fn new(
    account_id: Uuid,
    kind: NotificationKind,
    title: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self {
      account_id,
      title: title.into(),
      message: message.into(),
      kind,
      related_donation: None,
      payload: None,
    }
  }

  pub fn about(mut self, donation_id: Uuid) -> Self {
    self.related_donation = Some(donation_id);
    self
  }

  pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
    self.payload = Some(payload);
    self
  }
}

/// A user's notifications together with the unread count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbox {
  pub notifications: Vec<Notification>,
  pub unread_count:  u64,
}
