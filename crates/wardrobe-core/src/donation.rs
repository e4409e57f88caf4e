//! Donations: proposals to hand one item from a donor to a recipient.
//!
//! A donation is a single record regardless of who looks at it. Whether it
//! is "sent" or "received" is computed per query by [`Donation::direction_for`]
//! and never stored.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  account::Account,
  item::{Category, ClothingItem},
};

/// Lifecycle state of a donation. Every state other than `Pending` is
/// terminal; a record in a terminal state is immutable history.
///
/// Acceptance moves a donation straight to `Completed`. Older clients that
/// send `"accepted"` are read as `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
  Pending,
  #[serde(alias = "accepted")]
  Completed,
  Rejected,
  Cancelled,
}

impl DonationStatus {
  pub fn is_terminal(self) -> bool { !matches!(self, Self::Pending) }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Completed => "completed",
      Self::Rejected => "rejected",
      Self::Cancelled => "cancelled",
    }
  }
}

impl fmt::Display for DonationStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
  pub donation_id:     Uuid,
  pub donor_id:        Uuid,
  /// Normalised lower-case.
  pub recipient_email: String,
  /// Resolved at proposal time when the email belongs to an account, or on
  /// the recipient's first accept/reject otherwise.
  pub recipient_id:    Option<Uuid>,
  pub item_id:         Uuid,
  // Snapshot of the item at proposal time so history survives later edits.
  pub item_name:       String,
  pub item_category:   Category,
  pub item_color:      String,
  pub notes:           String,
  pub status:          DonationStatus,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl Donation {
  /// Whether `account` may accept or reject this donation.
  pub fn is_addressed_to(&self, account: &Account) -> bool {
    match self.recipient_id {
      Some(id) => id == account.account_id,
      None => self.recipient_email == account.email,
    }
  }

  pub fn direction_for(&self, account_id: Uuid) -> Direction {
    if self.donor_id == account_id {
      Direction::Sent
    } else {
      Direction::Received
    }
  }
}

/// Input for [`WardrobeStore::record_donation`](crate::store::WardrobeStore::record_donation).
/// Status, identity and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewDonation {
  pub donor_id:        Uuid,
  pub recipient_email: String,
  pub recipient_id:    Option<Uuid>,
  pub item_id:         Uuid,
  pub item_name:       String,
  pub item_category:   Category,
  pub item_color:      String,
  pub notes:           String,
}

impl NewDonation {
  pub fn snapshot(
    item: &ClothingItem,
    recipient_email: String,
    recipient_id: Option<Uuid>,
    notes: String,
  ) -> Self {
    Self {
      donor_id: item.owner_id,
      recipient_email,
      recipient_id,
      item_id: item.item_id,
      item_name: item.name.clone(),
      item_category: item.category,
      item_color: item.color.clone(),
      notes,
    }
  }
}

// ─── Views ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Sent,
  Received,
}

/// Which donations to list for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationListKind {
  Sent,
  Received,
  #[default]
  History,
  /// Pending donations in either direction.
  Pending,
}

/// A donation tagged with its direction relative to the viewer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
  #[serde(flatten)]
  pub donation:  Donation,
  pub direction: Direction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DonationStats {
  pub sent:     u64,
  pub received: u64,
  /// Pending donations in either direction.
  pub pending:  u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonationListing {
  pub donations: Vec<DonationView>,
  pub stats:     DonationStats,
}
