//! Clothing items, the things that live in a wardrobe and get donated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
  Top,
  Bottom,
  Dress,
  Jacket,
  Shoes,
  Accessories,
  Bag,
  Outerwear,
}

/// Who the item is cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
  Men,
  Women,
  Unisex,
  #[serde(rename = "Kids (Boy)", alias = "Kids-Boy")]
  KidsBoy,
  #[serde(rename = "Kids (Girl)", alias = "Kids-Girl")]
  KidsGirl,
}

/// Availability of an item.
///
/// `Donated` is the lock marker: it is set exactly while a donation
/// referencing the item is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
  #[default]
  Active,
  Inactive,
  Donated,
}

impl ItemStatus {
  pub fn is_locked(self) -> bool { matches!(self, Self::Donated) }
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
  pub item_id:              Uuid,
  pub owner_id:             Uuid,
  pub name:                 String,
  pub category:             Category,
  pub audience:             Audience,
  pub color:                String,
  pub image_url:            String,
  pub status:               ItemStatus,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
  pub last_worn:            Option<DateTime<Utc>>,
  /// Set when a donation transition could not update this item; cleared by
  /// the reconciliation pass.
  pub needs_reconciliation: bool,
}

/// Input for [`WardrobeStore::add_item`](crate::store::WardrobeStore::add_item).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
  pub name:      String,
  pub category:  Category,
  pub audience:  Audience,
  pub color:     String,
  pub image_url: String,
}

impl NewItem {
  /// Trim text fields and reject blanks.
  pub fn validated(mut self) -> Result<Self> {
    self.name = required("name", &self.name)?;
    self.color = required("color", &self.color)?;
    self.image_url = required("imageUrl", &self.image_url)?;
    Ok(self)
  }
}

/// Partial update applied by the owner. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
  pub name:      Option<String>,
  pub category:  Option<Category>,
  pub audience:  Option<Audience>,
  pub color:     Option<String>,
  pub image_url: Option<String>,
  pub status:    Option<ItemStatus>,
  pub last_worn: Option<DateTime<Utc>>,
}

impl ItemPatch {
  pub fn status_only(status: ItemStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }

  pub fn validated(mut self) -> Result<Self> {
    if let Some(name) = &self.name {
      self.name = Some(required("name", name)?);
    }
    if let Some(color) = &self.color {
      self.color = Some(required("color", color)?);
    }
    if let Some(url) = &self.image_url {
      self.image_url = Some(required("imageUrl", url)?);
    }
    if self.status.is_some_and(ItemStatus::is_locked) {
      return Err(Error::Validation(
        "Status can only be set to active or inactive".into(),
      ));
    }
    Ok(self)
  }
}

fn required(field: &str, value: &str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::Validation(format!("{field} is required")));
  }
  Ok(trimmed.to_owned())
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSort {
  #[default]
  Newest,
  Oldest,
  Name,
}

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filters for [`WardrobeStore::list_items`](crate::store::WardrobeStore::list_items).
#[derive(Debug, Clone)]
pub struct ItemQuery {
  pub owner_id: Uuid,
  pub category: Option<Category>,
  pub audience: Option<Audience>,
  /// Case-insensitive substring match.
  pub color:    Option<String>,
  pub status:   Option<ItemStatus>,
  pub sort:     ItemSort,
  /// 1-based.
  pub page:     u32,
  pub limit:    u32,
}

impl ItemQuery {
  pub fn for_owner(owner_id: Uuid) -> Self {
    Self {
      owner_id,
      category: None,
      audience: None,
      color: None,
      status: None,
      sort: ItemSort::Newest,
      page: 1,
      limit: DEFAULT_PAGE_SIZE,
    }
  }

  pub fn offset(&self) -> u64 { u64::from(self.page.saturating_sub(1)) * u64::from(self.limit) }
}

/// One page of items plus the unpaginated match count.
#[derive(Debug, Clone, Serialize)]
pub struct ItemPage {
  pub items: Vec<ClothingItem>,
  pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
  pub total:       u64,
  pub active:      u64,
  pub inactive:    u64,
  pub donated:     u64,
  /// Percentage of items that are active, rounded.
  pub active_rate: u8,
}

impl ItemStats {
  pub fn from_counts(active: u64, inactive: u64, donated: u64) -> Self {
    let total = active + inactive + donated;
    let active_rate = if total == 0 {
      0
    } else {
      ((active as f64 / total as f64) * 100.0).round() as u8
    };
    Self { total, active, inactive, donated, active_rate }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
  pub category: Category,
  pub count:    u64,
}
