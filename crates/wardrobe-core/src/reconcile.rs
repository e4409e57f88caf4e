//! Repair drift between donations and the items they reference.
//!
//! A donation transition writes the donation first and the item second. If
//! the second write does not land, the item is flagged. This pass re-derives
//! what the item should look like from the latest donation referencing it
//! and fixes whatever does not match.

use serde::Serialize;
use uuid::Uuid;

use crate::{
  donation::DonationStatus,
  item::{ClothingItem, ItemStatus},
  store::WardrobeStore,
  Error, Result,
};

/// A compare-and-set overwrite of an item's owner and status.
///
/// Applies only while the item still has `observed_owner` and
/// `observed_status` and the latest donation referencing it is still
/// `latest_donation` (id and status). Clears the reconciliation flag when it
/// applies.
#[derive(Debug, Clone)]
pub struct ItemRepair {
  pub item_id:         Uuid,
  pub observed_owner:  Uuid,
  pub observed_status: ItemStatus,
  pub latest_donation: Option<(Uuid, DonationStatus)>,
  pub owner_id:        Uuid,
  pub status:          ItemStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reconciled {
  Consistent,
  Repaired { owner_id: Uuid, status: ItemStatus },
  /// The item or its latest donation changed while the pass was deciding.
  /// The item stays flagged for the next pass.
  Deferred,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
  pub examined: usize,
  pub repaired: usize,
  /// Items left flagged because they changed underneath the pass.
  pub deferred: usize,
  /// Items that disappeared between listing and repair.
  pub missing:  usize,
}

pub struct Reconciler<'a, S> {
  store: &'a S,
}

impl<'a, S: WardrobeStore> Reconciler<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  pub async fn reconcile_item(&self, item_id: Uuid) -> Result<Reconciled> {
    let item = self
      .store
      .get_item(item_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ItemNotFound(item_id))?;
    self.reconcile(&item).await
  }

  /// Run [`reconcile_item`](Self::reconcile_item) over every flagged item.
  pub async fn reconcile_flagged(&self) -> Result<ReconcileReport> {
    let flagged = self.store.flagged_items().await.map_err(Error::store)?;
    let mut report = ReconcileReport { examined: flagged.len(), ..Default::default() };

    for item in flagged {
      match self.reconcile(&item).await {
        Ok(Reconciled::Repaired { .. }) => report.repaired += 1,
        Ok(Reconciled::Deferred) => report.deferred += 1,
        Ok(Reconciled::Consistent) => {}
        Err(Error::ItemNotFound(_)) => report.missing += 1,
        Err(e) => return Err(e),
      }
    }

    tracing::info!(
      examined = report.examined,
      repaired = report.repaired,
      deferred = report.deferred,
      missing = report.missing,
      "reconciliation pass finished",
    );
    Ok(report)
  }

  async fn reconcile(&self, item: &ClothingItem) -> Result<Reconciled> {
    let latest = self
      .store
      .latest_donation_for_item(item.item_id)
      .await
      .map_err(Error::store)?;

    let unlocked = |status: ItemStatus| {
      if status.is_locked() { ItemStatus::Active } else { status }
    };

    let (owner_id, status) = match &latest {
      Some(d) if d.status == DonationStatus::Pending => (d.donor_id, ItemStatus::Donated),
      Some(d) if d.status == DonationStatus::Completed => {
        (d.recipient_id.unwrap_or(item.owner_id), unlocked(item.status))
      }
      Some(d) => (d.donor_id, unlocked(item.status)),
      None => (item.owner_id, unlocked(item.status)),
    };

    let consistent = owner_id == item.owner_id && status == item.status;
    if consistent && !item.needs_reconciliation {
      return Ok(Reconciled::Consistent);
    }

    let repair = ItemRepair {
      item_id: item.item_id,
      observed_owner: item.owner_id,
      observed_status: item.status,
      latest_donation: latest.as_ref().map(|d| (d.donation_id, d.status)),
      owner_id,
      status,
    };
    let applied = self.store.repair_item(repair).await.map_err(Error::store)?;

    if !applied {
      // Either the item is gone or someone moved it since we read it.
      let still_there = self
        .store
        .set_reconciliation_flag(item.item_id, true)
        .await
        .map_err(Error::store)?;
      if !still_there {
        return Err(Error::ItemNotFound(item.item_id));
      }
      tracing::info!(item_id = %item.item_id, "item changed during reconciliation, deferring");
      return Ok(Reconciled::Deferred);
    }

    if consistent {
      return Ok(Reconciled::Consistent);
    }

    tracing::warn!(
      item_id = %item.item_id,
      from_owner = %item.owner_id,
      to_owner = %owner_id,
      from_status = ?item.status,
      to_status = ?status,
      "repaired item state",
    );
    Ok(Reconciled::Repaired { owner_id, status })
  }
}
