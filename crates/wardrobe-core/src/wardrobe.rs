//! Owner-facing item operations.
//!
//! Every operation is scoped to the calling account. Items owned by someone
//! else are reported exactly like missing ones. Status changes are refused
//! while the item is locked by a pending donation.

use serde::Serialize;
use uuid::Uuid;

use crate::{
  donation::DonationStatus,
  item::{
    CategoryCount, ClothingItem, ItemPatch, ItemQuery, ItemSort, ItemStats, ItemStatus, NewItem,
    MAX_PAGE_SIZE,
  },
  store::WardrobeStore,
  Error, Result,
};

const RECENT_ITEMS: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub current_page: u32,
  pub total_pages:  u64,
  pub total_items:  u64,
  pub has_next:     bool,
  pub has_prev:     bool,
}

impl Pagination {
  pub fn new(page: u32, limit: u32, total: u64) -> Self {
    let limit = u64::from(limit.max(1));
    Self {
      current_page: page,
      total_pages:  total.div_ceil(limit),
      total_items:  total,
      has_next:     u64::from(page) * limit < total,
      has_prev:     page > 1,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListing {
  pub items:      Vec<ClothingItem>,
  pub stats:      ItemStats,
  pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
  pub stats:             ItemStats,
  /// Pending donations the owner has sent.
  pub pending_donations: u64,
  pub recent_items:      Vec<ClothingItem>,
  pub categories:        Vec<CategoryCount>,
}

pub struct Wardrobe<'a, S> {
  store: &'a S,
}

impl<'a, S: WardrobeStore> Wardrobe<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  pub async fn add(&self, owner_id: Uuid, input: NewItem) -> Result<ClothingItem> {
    let input = input.validated()?;
    let item = self.store.add_item(owner_id, input).await.map_err(Error::store)?;
    tracing::debug!(item_id = %item.item_id, %owner_id, "item added");
    Ok(item)
  }

  pub async fn list(&self, mut query: ItemQuery) -> Result<ItemListing> {
    if query.page == 0 {
      return Err(Error::Validation("page must be at least 1".into()));
    }
    if query.limit == 0 || query.limit > MAX_PAGE_SIZE {
      return Err(Error::Validation(format!("limit must be between 1 and {MAX_PAGE_SIZE}")));
    }
    query.color = query.color.map(|c| c.trim().to_owned()).filter(|c| !c.is_empty());

    let (page, limit, owner_id) = (query.page, query.limit, query.owner_id);
    let found = self.store.list_items(query).await.map_err(Error::store)?;
    let stats = self.store.item_stats(owner_id).await.map_err(Error::store)?;
    Ok(ItemListing {
      pagination: Pagination::new(page, limit, found.total),
      items: found.items,
      stats,
    })
  }

  pub async fn get(&self, owner_id: Uuid, item_id: Uuid) -> Result<ClothingItem> {
    let item = self
      .store
      .get_item(item_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ItemNotFound(item_id))?;
    if item.owner_id != owner_id {
      return Err(Error::NotItemOwner(item_id));
    }
    Ok(item)
  }

  pub async fn update(&self, owner_id: Uuid, item_id: Uuid, patch: ItemPatch) -> Result<ClothingItem> {
    let patch = patch.validated()?;
    let item = self.get(owner_id, item_id).await?;
    if patch.status.is_some() && item.status.is_locked() {
      return Err(Error::ItemLocked(item_id));
    }

    match self
      .store
      .update_item(item_id, owner_id, patch)
      .await
      .map_err(Error::store)?
    {
      Some(updated) => Ok(updated),
      // Lost a race with a proposal or a transfer.
      None => match self.store.get_item(item_id).await.map_err(Error::store)? {
        Some(current) if current.owner_id == owner_id => Err(Error::ItemLocked(item_id)),
        _ => Err(Error::ItemNotFound(item_id)),
      },
    }
  }

  /// Toggle an item between `active` and `inactive`.
  pub async fn set_status(
    &self,
    owner_id: Uuid,
    item_id: Uuid,
    status: ItemStatus,
  ) -> Result<ClothingItem> {
    self.update(owner_id, item_id, ItemPatch::status_only(status)).await
  }

  /// Delete an item. Locked items cannot be deleted; resolve or cancel the
  /// donation first.
  pub async fn delete(&self, owner_id: Uuid, item_id: Uuid) -> Result<()> {
    let item = self.get(owner_id, item_id).await?;
    if item.status.is_locked() {
      return Err(Error::ItemLocked(item_id));
    }
    if !self.store.delete_item(item_id, owner_id).await.map_err(Error::store)? {
      return Err(Error::ItemLocked(item_id));
    }
    tracing::debug!(%item_id, %owner_id, "item deleted");
    Ok(())
  }

  pub async fn dashboard(&self, owner_id: Uuid) -> Result<Dashboard> {
    let stats = self.store.item_stats(owner_id).await.map_err(Error::store)?;
    let pending_donations = self
      .store
      .donations_sent(owner_id)
      .await
      .map_err(Error::store)?
      .iter()
      .filter(|d| d.status == DonationStatus::Pending)
      .count() as u64;

    let mut recent = ItemQuery::for_owner(owner_id);
    recent.sort = ItemSort::Newest;
    recent.limit = RECENT_ITEMS;
    let recent_items = self.store.list_items(recent).await.map_err(Error::store)?.items;

    let categories = self.store.category_counts(owner_id).await.map_err(Error::store)?;
    Ok(Dashboard { stats, pending_donations, recent_items, categories })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pagination_flags() {
    let p = Pagination::new(1, 20, 45);
    assert_eq!(p.total_pages, 3);
    assert!(p.has_next);
    assert!(!p.has_prev);

    let last = Pagination::new(3, 20, 45);
    assert!(!last.has_next);
    assert!(last.has_prev);

    assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
  }
}
