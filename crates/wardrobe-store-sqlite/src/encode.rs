//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`
//! suffix) so that lexical order in SQL matches chronological order. UUIDs
//! are stored as hyphenated lowercase strings. Enums use their wire names.

use chrono::{DateTime, SecondsFormat, Utc};
use wardrobe_core::{
  account::Account,
  donation::{Donation, DonationStatus},
  item::{Audience, Category, ClothingItem, ItemStatus},
  notification::{Notification, NotificationKind},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn unknown(column: &'static str, value: &str) -> Error {
  Error::UnknownValue { column, value: value.to_owned() }
}

// ─── Category ─────────────────────────────────────────────────────────────────

pub fn encode_category(c: Category) -> &'static str {
  match c {
    Category::Top => "Top",
    Category::Bottom => "Bottom",
    Category::Dress => "Dress",
    Category::Jacket => "Jacket",
    Category::Shoes => "Shoes",
    Category::Accessories => "Accessories",
    Category::Bag => "Bag",
    Category::Outerwear => "Outerwear",
  }
}

pub fn decode_category(s: &str) -> Result<Category> {
  match s {
    "Top" => Ok(Category::Top),
    "Bottom" => Ok(Category::Bottom),
    "Dress" => Ok(Category::Dress),
    "Jacket" => Ok(Category::Jacket),
    "Shoes" => Ok(Category::Shoes),
    "Accessories" => Ok(Category::Accessories),
    "Bag" => Ok(Category::Bag),
    "Outerwear" => Ok(Category::Outerwear),
    other => Err(unknown("category", other)),
  }
}

// ─── Audience ─────────────────────────────────────────────────────────────────

pub fn encode_audience(a: Audience) -> &'static str {
  match a {
    Audience::Men => "Men",
    Audience::Women => "Women",
    Audience::Unisex => "Unisex",
    Audience::KidsBoy => "Kids (Boy)",
    Audience::KidsGirl => "Kids (Girl)",
  }
}

pub fn decode_audience(s: &str) -> Result<Audience> {
  match s {
    "Men" => Ok(Audience::Men),
    "Women" => Ok(Audience::Women),
    "Unisex" => Ok(Audience::Unisex),
    "Kids (Boy)" => Ok(Audience::KidsBoy),
    "Kids (Girl)" => Ok(Audience::KidsGirl),
    other => Err(unknown("audience", other)),
  }
}

// ─── Statuses ─────────────────────────────────────────────────────────────────

pub fn encode_item_status(s: ItemStatus) -> &'static str {
  match s {
    ItemStatus::Active => "active",
    ItemStatus::Inactive => "inactive",
    ItemStatus::Donated => "donated",
  }
}

pub fn decode_item_status(s: &str) -> Result<ItemStatus> {
  match s {
    "active" => Ok(ItemStatus::Active),
    "inactive" => Ok(ItemStatus::Inactive),
    "donated" => Ok(ItemStatus::Donated),
    other => Err(unknown("item status", other)),
  }
}

pub fn decode_donation_status(s: &str) -> Result<DonationStatus> {
  match s {
    "pending" => Ok(DonationStatus::Pending),
    // Rows written before accept collapsed into a single state.
    "completed" | "accepted" => Ok(DonationStatus::Completed),
    "rejected" => Ok(DonationStatus::Rejected),
    "cancelled" => Ok(DonationStatus::Cancelled),
    other => Err(unknown("donation status", other)),
  }
}

// ─── NotificationKind ─────────────────────────────────────────────────────────

pub fn encode_notification_kind(k: NotificationKind) -> &'static str {
  match k {
    NotificationKind::DonationSent => "donation_sent",
    NotificationKind::DonationReceived => "donation_received",
    NotificationKind::DonationAccepted => "donation_accepted",
    NotificationKind::DonationRejected => "donation_rejected",
    NotificationKind::DonationCancelled => "donation_cancelled",
    NotificationKind::OutfitSuggestion => "outfit_suggestion",
  }
}

pub fn decode_notification_kind(s: &str) -> Result<NotificationKind> {
  match s {
    "donation_sent" => Ok(NotificationKind::DonationSent),
    "donation_received" => Ok(NotificationKind::DonationReceived),
    "donation_accepted" => Ok(NotificationKind::DonationAccepted),
    "donation_rejected" => Ok(NotificationKind::DonationRejected),
    "donation_cancelled" => Ok(NotificationKind::DonationCancelled),
    "outfit_suggestion" => Ok(NotificationKind::OutfitSuggestion),
    other => Err(unknown("notification kind", other)),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const ACCOUNT_COLUMNS: &str = "account_id, name, email, password_hash, created_at";

/// Raw strings read directly from an `accounts` row.
pub struct RawAccount {
  pub account_id:    String,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
  pub created_at:    String,
}

impl RawAccount {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      account_id:    row.get(0)?,
      name:          row.get(1)?,
      email:         row.get(2)?,
      password_hash: row.get(3)?,
      created_at:    row.get(4)?,
    })
  }

  pub fn into_account(self) -> Result<Account> {
    Ok(Account {
      account_id:    decode_uuid(&self.account_id)?,
      name:          self.name,
      email:         self.email,
      password_hash: self.password_hash,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

pub const ITEM_COLUMNS: &str = "item_id, owner_id, name, category, audience, color, image_url, \
                                status, created_at, updated_at, last_worn, needs_reconciliation";

/// Raw strings read directly from an `items` row.
pub struct RawItem {
  pub item_id:              String,
  pub owner_id:             String,
  pub name:                 String,
  pub category:             String,
  pub audience:             String,
  pub color:                String,
  pub image_url:            String,
  pub status:               String,
  pub created_at:           String,
  pub updated_at:           String,
  pub last_worn:            Option<String>,
  pub needs_reconciliation: bool,
}

impl RawItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      item_id:              row.get(0)?,
      owner_id:             row.get(1)?,
      name:                 row.get(2)?,
      category:             row.get(3)?,
      audience:             row.get(4)?,
      color:                row.get(5)?,
      image_url:            row.get(6)?,
      status:               row.get(7)?,
      created_at:           row.get(8)?,
      updated_at:           row.get(9)?,
      last_worn:            row.get(10)?,
      needs_reconciliation: row.get(11)?,
    })
  }

  pub fn into_item(self) -> Result<ClothingItem> {
    Ok(ClothingItem {
      item_id:              decode_uuid(&self.item_id)?,
      owner_id:             decode_uuid(&self.owner_id)?,
      name:                 self.name,
      category:             decode_category(&self.category)?,
      audience:             decode_audience(&self.audience)?,
      color:                self.color,
      image_url:            self.image_url,
      status:               decode_item_status(&self.status)?,
      created_at:           decode_dt(&self.created_at)?,
      updated_at:           decode_dt(&self.updated_at)?,
      last_worn:            self.last_worn.as_deref().map(decode_dt).transpose()?,
      needs_reconciliation: self.needs_reconciliation,
    })
  }
}

pub const DONATION_COLUMNS: &str = "donation_id, donor_id, recipient_email, recipient_id, \
                                    item_id, item_name, item_category, item_color, notes, \
                                    status, created_at, updated_at";

/// Raw strings read directly from a `donations` row.
pub struct RawDonation {
  pub donation_id:     String,
  pub donor_id:        String,
  pub recipient_email: String,
  pub recipient_id:    Option<String>,
  pub item_id:         String,
  pub item_name:       String,
  pub item_category:   String,
  pub item_color:      String,
  pub notes:           String,
  pub status:          String,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawDonation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      donation_id:     row.get(0)?,
      donor_id:        row.get(1)?,
      recipient_email: row.get(2)?,
      recipient_id:    row.get(3)?,
      item_id:         row.get(4)?,
      item_name:       row.get(5)?,
      item_category:   row.get(6)?,
      item_color:      row.get(7)?,
      notes:           row.get(8)?,
      status:          row.get(9)?,
      created_at:      row.get(10)?,
      updated_at:      row.get(11)?,
    })
  }

  pub fn into_donation(self) -> Result<Donation> {
    Ok(Donation {
      donation_id:     decode_uuid(&self.donation_id)?,
      donor_id:        decode_uuid(&self.donor_id)?,
      recipient_email: self.recipient_email,
      recipient_id:    self.recipient_id.as_deref().map(decode_uuid).transpose()?,
      item_id:         decode_uuid(&self.item_id)?,
      item_name:       self.item_name,
      item_category:   decode_category(&self.item_category)?,
      item_color:      self.item_color,
      notes:           self.notes,
      status:          decode_donation_status(&self.status)?,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

pub const NOTIFICATION_COLUMNS: &str = "notification_id, account_id, title, message, kind, \
                                        related_donation, payload, read, created_at";

/// Raw strings read directly from a `notifications` row.
pub struct RawNotification {
  pub notification_id:  String,
  pub account_id:       String,
  pub title:            String,
  pub message:          String,
  pub kind:             String,
  pub related_donation: Option<String>,
  pub payload:          Option<String>,
  pub read:             bool,
  pub created_at:       String,
}

impl RawNotification {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      notification_id:  row.get(0)?,
      account_id:       row.get(1)?,
      title:            row.get(2)?,
      message:          row.get(3)?,
      kind:             row.get(4)?,
      related_donation: row.get(5)?,
      payload:          row.get(6)?,
      read:             row.get(7)?,
      created_at:       row.get(8)?,
    })
  }

  pub fn into_notification(self) -> Result<Notification> {
    Ok(Notification {
      notification_id:  decode_uuid(&self.notification_id)?,
      account_id:       decode_uuid(&self.account_id)?,
      title:            self.title,
      message:          self.message,
      kind:             decode_notification_kind(&self.kind)?,
      related_donation: self.related_donation.as_deref().map(decode_uuid).transpose()?,
      payload:          self.payload.as_deref().map(serde_json::from_str).transpose()?,
      read:             self.read,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}
