//! The `WardrobeStore` trait.
//!
//! Implemented by storage backends (e.g. `wardrobe-store-sqlite`). The
//! workflow engine and the HTTP layer depend on this abstraction, not on any
//! concrete backend.
//!
//! No method spans more than one record kind in a single atomic step. Every
//! method that guards a state change (`try_lock_item`, `settle_donation`, ...)
//! must check the guard and apply the change as one indivisible operation and
//! report whether it applied; callers never read-then-write.

use std::future::Future;

use uuid::Uuid;

use crate::{
  account::{Account, AccountPatch, NewAccount},
  donation::{Donation, DonationStatus, NewDonation},
  item::{CategoryCount, ClothingItem, ItemPage, ItemPatch, ItemQuery, ItemStats, NewItem},
  notification::{NewNotification, Notification},
  reconcile::ItemRepair,
};

/// Abstraction over an OurWardrobe storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait WardrobeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Accounts ──────────────────────────────────────────────────────────

  /// Persist a new account. Fails if the (normalised) email is taken.
  fn create_account(
    &self,
    input: NewAccount,
  ) -> impl Future<Output = Result<Account, Self::Error>> + Send + '_;

  fn get_account(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + '_;

  /// Look up an account by normalised email.
  fn find_account_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + '_;

  /// Apply `patch` to the account. A changed email first binds every
  /// unresolved donation addressed to the old email to this account, so the
  /// account keeps seeing them. Fails if the new email belongs to another
  /// account. Returns `None` if the account does not exist.
  fn update_account(
    &self,
    id: Uuid,
    patch: AccountPatch,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + '_;

  /// Replace the stored password hash. Returns `false` if the account does
  /// not exist.
  fn set_password_hash(
    &self,
    id: Uuid,
    password_hash: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Items ─────────────────────────────────────────────────────────────

  fn add_item(
    &self,
    owner_id: Uuid,
    input: NewItem,
  ) -> impl Future<Output = Result<ClothingItem, Self::Error>> + Send + '_;

  /// Retrieve an item regardless of owner. Returns `None` if not found.
  fn get_item(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ClothingItem>, Self::Error>> + Send + '_;

  fn list_items(
    &self,
    query: ItemQuery,
  ) -> impl Future<Output = Result<ItemPage, Self::Error>> + Send + '_;

  fn item_stats(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<ItemStats, Self::Error>> + Send + '_;

  /// Item counts per category, largest first.
  fn category_counts(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<CategoryCount>, Self::Error>> + Send + '_;

  /// Apply `patch` if the item exists and belongs to `owner_id`. When the
  /// patch changes status, the update only applies if the item is not
  /// locked. Returns `None` if nothing was updated.
  fn update_item(
    &self,
    id: Uuid,
    owner_id: Uuid,
    patch: ItemPatch,
  ) -> impl Future<Output = Result<Option<ClothingItem>, Self::Error>> + Send + '_;

  /// Delete an unlocked item owned by `owner_id`. Returns `false` if nothing
  /// was deleted.
  fn delete_item(
    &self,
    id: Uuid,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Item locking ──────────────────────────────────────────────────────

  /// Set the item to `donated` iff it belongs to `owner_id` and is not
  /// already `donated`. Returns whether the lock was taken.
  fn try_lock_item(
    &self,
    id: Uuid,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Set a `donated` item owned by `owner_id` back to `active`.
  fn release_item(
    &self,
    id: Uuid,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Reassign a `donated` item owned by `from` to `to` and make it `active`.
  fn transfer_item(
    &self,
    id: Uuid,
    from: Uuid,
    to: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Apply `repair` iff the item and its latest donation still match what
  /// the repair observed, clearing the reconciliation flag. Returns whether
  /// it applied. Only the reconciliation pass uses this.
  fn repair_item(
    &self,
    repair: ItemRepair,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn set_reconciliation_flag(
    &self,
    id: Uuid,
    flagged: bool,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn flagged_items(
    &self,
  ) -> impl Future<Output = Result<Vec<ClothingItem>, Self::Error>> + Send + '_;

  // ── Donations ─────────────────────────────────────────────────────────

  /// Persist a new `pending` donation. Identity and timestamps are assigned
  /// by the store.
  fn record_donation(
    &self,
    input: NewDonation,
  ) -> impl Future<Output = Result<Donation, Self::Error>> + Send + '_;

  fn get_donation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Donation>, Self::Error>> + Send + '_;

  /// Move a donation from `pending` to `status`, filling in `recipient_id`
  /// if it is still unresolved. Returns the updated record, or `None` if the
  /// donation does not exist or was no longer pending.
  fn settle_donation(
    &self,
    id: Uuid,
    status: DonationStatus,
    recipient_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Option<Donation>, Self::Error>> + Send + '_;

  /// All donations with `donor_id` as donor, newest first.
  fn donations_sent(
    &self,
    donor_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Donation>, Self::Error>> + Send + '_;

  /// All donations resolved to `account_id`, plus unresolved ones addressed
  /// to `email`, newest first.
  fn donations_received(
    &self,
    account_id: Uuid,
    email: String,
  ) -> impl Future<Output = Result<Vec<Donation>, Self::Error>> + Send + '_;

  /// The most recently created donation referencing `item_id`.
  fn latest_donation_for_item(
    &self,
    item_id: Uuid,
  ) -> impl Future<Output = Result<Option<Donation>, Self::Error>> + Send + '_;

  // ── Notifications ─────────────────────────────────────────────────────

  fn push_notification(
    &self,
    input: NewNotification,
  ) -> impl Future<Output = Result<Notification, Self::Error>> + Send + '_;

  /// Newest first, at most `limit`.
  fn list_notifications(
    &self,
    account_id: Uuid,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Notification>, Self::Error>> + Send + '_;

  fn unread_count(
    &self,
    account_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Mark one notification read if it belongs to `account_id`.
  fn mark_read(
    &self,
    account_id: Uuid,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Returns the number of notifications changed.
  fn mark_all_read(
    &self,
    account_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Returns the number of notifications deleted.
  fn clear_notifications(
    &self,
    account_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
