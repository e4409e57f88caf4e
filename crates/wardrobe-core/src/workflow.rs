//! The donation workflow engine.
//!
//! Owns every donation state transition and the item-status side effect that
//! goes with it:
//!
//! ```text
//!   (none) ── propose ──► pending ── accept ──► completed
//!                           │ └──── reject ──► rejected
//!                           └────── cancel ──► cancelled
//! ```
//!
//! The donation record and the item record are updated in two steps. The
//! donation is always written first because it is the authoritative state.
//! If the paired item update then fails, the transition still succeeds, the
//! item is flagged for [`reconcile`](crate::reconcile) and the outcome says
//! so through [`TransitionOutcome::item_synced`].

use serde::Serialize;
use uuid::Uuid;

use crate::{
  account::{Account, parse_email},
  donation::{
    Direction, Donation, DonationListKind, DonationListing, DonationStats, DonationStatus,
    DonationView, NewDonation,
  },
  notification::NotificationKind,
  notify::Notifier,
  store::WardrobeStore,
  Error, Result,
};

/// What to do when a donation is addressed to an email with no account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipientPolicy {
  /// Reject the proposal with [`Error::RecipientNotFound`].
  #[default]
  MustExist,
  /// Store the donation unresolved; whoever registers with the email can act
  /// on it later.
  AllowUnregistered,
}

impl RecipientPolicy {
  pub fn from_flag(allow_unregistered: bool) -> Self {
    if allow_unregistered {
      Self::AllowUnregistered
    } else {
      Self::MustExist
    }
  }
}

/// Result of accept, reject and cancel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutcome {
  pub donation:    Donation,
  /// `false` when the paired item update did not apply and the item has
  /// been flagged for reconciliation.
  pub item_synced: bool,
}

pub struct DonationWorkflow<'a, S> {
  store:  &'a S,
  policy: RecipientPolicy,
}

impl<'a, S: WardrobeStore> DonationWorkflow<'a, S> {
  pub fn new(store: &'a S, policy: RecipientPolicy) -> Self { Self { store, policy } }

  fn notifier(&self) -> Notifier<'a, S> { Notifier::new(self.store) }

  // ── Propose ───────────────────────────────────────────────────────────

  /// Offer `item_id` to `recipient_email` on behalf of `donor`.
  pub async fn propose(
    &self,
    donor: &Account,
    item_id: Uuid,
    recipient_email: &str,
    notes: Option<String>,
  ) -> Result<Donation> {
    let recipient_email = parse_email(recipient_email)?;

    let item = self
      .store
      .get_item(item_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ItemNotFound(item_id))?;
    if item.owner_id != donor.account_id {
      return Err(Error::NotItemOwner(item_id));
    }
    if item.status.is_locked() {
      return Err(Error::ItemLocked(item_id));
    }
    if recipient_email == donor.email {
      return Err(Error::SelfDonation);
    }

    let recipient = self
      .store
      .find_account_by_email(recipient_email.clone())
      .await
      .map_err(Error::store)?;
    let recipient_id = match (recipient, self.policy) {
      (Some(account), _) if account.account_id == donor.account_id => {
        return Err(Error::SelfDonation);
      }
      (Some(account), _) => Some(account.account_id),
      (None, RecipientPolicy::AllowUnregistered) => None,
      (None, RecipientPolicy::MustExist) => {
        return Err(Error::RecipientNotFound(recipient_email));
      }
    };

    // The lock is the serialisation point: of two concurrent proposals for
    // the same item only one can flip it.
    let locked = self
      .store
      .try_lock_item(item_id, donor.account_id)
      .await
      .map_err(Error::store)?;
    if !locked {
      return Err(self.lock_failure(item_id, donor.account_id).await?);
    }

    let notes = notes.map(|n| n.trim().to_owned()).unwrap_or_default();
    let input = NewDonation::snapshot(&item, recipient_email, recipient_id, notes);
    let donation = match self.store.record_donation(input).await {
      Ok(d) => d,
      Err(e) => {
        // Undo the lock so the item is not stranded.
        if let Err(release_err) = self.store.release_item(item_id, donor.account_id).await {
          tracing::error!(
            %item_id,
            error = %release_err,
            "failed to release item after donation insert failed",
          );
          self.flag(item_id).await;
        }
        return Err(Error::store(e));
      }
    };

    tracing::info!(
      donation_id = %donation.donation_id,
      %item_id,
      donor = %donor.account_id,
      resolved = donation.recipient_id.is_some(),
      "donation proposed",
    );

    self.notifier().donation_proposed(&donation, &donor.name).await;
    Ok(donation)
  }

  /// Explain why `try_lock_item` refused, from a fresh read.
  async fn lock_failure(&self, item_id: Uuid, donor_id: Uuid) -> Result<Error> {
    let current = self.store.get_item(item_id).await.map_err(Error::store)?;
    Ok(match current {
      None => Error::ItemNotFound(item_id),
      Some(item) if item.owner_id != donor_id => Error::NotItemOwner(item_id),
      Some(_) => Error::ItemLocked(item_id),
    })
  }

  // ── Recipient actions ─────────────────────────────────────────────────

  /// Accept a pending donation: it becomes `completed` and the item moves
  /// to `recipient`.
  pub async fn accept(&self, recipient: &Account, donation_id: Uuid) -> Result<TransitionOutcome> {
    let donation = self.load_for_recipient(recipient, donation_id).await?;

    // Ownership cannot be transferred for an item that no longer exists;
    // refuse before anything is written.
    if self.store.get_item(donation.item_id).await.map_err(Error::store)?.is_none() {
      return Err(Error::ItemNotFound(donation.item_id));
    }

    let settled = self
      .settle(&donation, DonationStatus::Completed, Some(recipient.account_id))
      .await?;

    let step = self
      .store
      .transfer_item(settled.item_id, settled.donor_id, recipient.account_id)
      .await;
    let item_synced = self.check_item_step(&settled, step).await?;

    tracing::info!(
      donation_id = %settled.donation_id,
      item_id = %settled.item_id,
      recipient = %recipient.account_id,
      item_synced,
      "donation accepted",
    );

    self
      .notifier()
      .donation_resolved(
        &settled,
        settled.donor_id,
        NotificationKind::DonationAccepted,
        &recipient.name,
      )
      .await;
    Ok(TransitionOutcome { donation: settled, item_synced })
  }

  /// Decline a pending donation: the item stays with the donor and is
  /// unlocked.
  pub async fn reject(&self, recipient: &Account, donation_id: Uuid) -> Result<TransitionOutcome> {
    let donation = self.load_for_recipient(recipient, donation_id).await?;
    let settled = self
      .settle(&donation, DonationStatus::Rejected, Some(recipient.account_id))
      .await?;

    let step = self.store.release_item(settled.item_id, settled.donor_id).await;
    let item_synced = self.check_item_step(&settled, step).await?;

    tracing::info!(
      donation_id = %settled.donation_id,
      item_id = %settled.item_id,
      item_synced,
      "donation rejected",
    );

    self
      .notifier()
      .donation_resolved(
        &settled,
        settled.donor_id,
        NotificationKind::DonationRejected,
        &recipient.name,
      )
      .await;
    Ok(TransitionOutcome { donation: settled, item_synced })
  }

  // ── Donor actions ─────────────────────────────────────────────────────

  /// Withdraw a pending donation and unlock the item.
  pub async fn cancel(&self, donor: &Account, donation_id: Uuid) -> Result<TransitionOutcome> {
    let donation = self.load(donation_id).await?;
    if donation.donor_id != donor.account_id {
      return Err(Error::NotDonor(donation_id));
    }
    if donation.status.is_terminal() {
      return Err(Error::DonationNotPending { id: donation_id, status: donation.status });
    }

    let settled = self.settle(&donation, DonationStatus::Cancelled, None).await?;

    let step = self.store.release_item(settled.item_id, settled.donor_id).await;
    let item_synced = self.check_item_step(&settled, step).await?;

    tracing::info!(
      donation_id = %settled.donation_id,
      item_id = %settled.item_id,
      item_synced,
      "donation cancelled",
    );

    if let Some(recipient_id) = settled.recipient_id {
      self
        .notifier()
        .donation_resolved(&settled, recipient_id, NotificationKind::DonationCancelled, &donor.name)
        .await;
    }
    Ok(TransitionOutcome { donation: settled, item_synced })
  }

  // ── Queries ───────────────────────────────────────────────────────────

  /// List donations for `viewer`, each tagged with its direction, together
  /// with dashboard counts.
  pub async fn list(&self, viewer: &Account, kind: DonationListKind) -> Result<DonationListing> {
    let sent = self
      .store
      .donations_sent(viewer.account_id)
      .await
      .map_err(Error::store)?;
    let received = self
      .store
      .donations_received(viewer.account_id, viewer.email.clone())
      .await
      .map_err(Error::store)?;

    let stats = DonationStats {
      sent:     sent.len() as u64,
      received: received.len() as u64,
      pending:  sent
        .iter()
        .chain(received.iter())
        .filter(|d| d.status == DonationStatus::Pending)
        .count() as u64,
    };

    let selected = match kind {
      DonationListKind::Sent => sent,
      DonationListKind::Received => received,
      DonationListKind::History => merge_newest_first(sent, received),
      DonationListKind::Pending => merge_newest_first(sent, received)
        .into_iter()
        .filter(|d| d.status == DonationStatus::Pending)
        .collect(),
    };

    let donations = selected
      .into_iter()
      .map(|donation| DonationView {
        direction: donation.direction_for(viewer.account_id),
        donation,
      })
      .collect();

    Ok(DonationListing { donations, stats })
  }

  /// A single donation visible to `viewer` as donor or recipient.
  pub async fn get(&self, viewer: &Account, donation_id: Uuid) -> Result<DonationView> {
    let donation = self.load(donation_id).await?;
    let direction = if donation.donor_id == viewer.account_id {
      Direction::Sent
    } else if donation.is_addressed_to(viewer) {
      Direction::Received
    } else {
      return Err(Error::DonationNotFound(donation_id));
    };
    Ok(DonationView { donation, direction })
  }

  // ── Helpers ───────────────────────────────────────────────────────────

  async fn load(&self, donation_id: Uuid) -> Result<Donation> {
    self
      .store
      .get_donation(donation_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::DonationNotFound(donation_id))
  }

  async fn load_for_recipient(&self, recipient: &Account, donation_id: Uuid) -> Result<Donation> {
    let donation = self.load(donation_id).await?;
    if !donation.is_addressed_to(recipient) {
      return Err(Error::NotRecipient(donation_id));
    }
    if donation.status.is_terminal() {
      return Err(Error::DonationNotPending { id: donation_id, status: donation.status });
    }
    Ok(donation)
  }

  /// Apply the conditional `pending -> status` update. A lost race surfaces
  /// as [`Error::DonationNotPending`] with the winner's status.
  async fn settle(
    &self,
    donation: &Donation,
    status: DonationStatus,
    recipient_id: Option<Uuid>,
  ) -> Result<Donation> {
    let id = donation.donation_id;
    if let Some(settled) = self
      .store
      .settle_donation(id, status, recipient_id)
      .await
      .map_err(Error::store)?
    {
      return Ok(settled);
    }
    match self.store.get_donation(id).await.map_err(Error::store)? {
      Some(current) => Err(Error::DonationNotPending { id, status: current.status }),
      None => Err(Error::DonationNotFound(id)),
    }
  }

  /// Interpret the result of the item half of a transition. Anything other
  /// than a clean apply is logged and the item flagged; the donation
  /// transition itself stands.
  async fn check_item_step(
    &self,
    donation: &Donation,
    step: Result<bool, S::Error>,
  ) -> Result<bool> {
    let item_id = donation.item_id;
    match step {
      Ok(true) => Ok(true),
      Ok(false) => {
        let current = self.store.get_item(item_id).await.map_err(Error::store)?;
        match current {
          None => {
            tracing::warn!(
              donation_id = %donation.donation_id,
              %item_id,
              "item referenced by donation no longer exists",
            );
            Ok(true)
          }
          Some(item) => {
            tracing::error!(
              donation_id = %donation.donation_id,
              %item_id,
              owner = %item.owner_id,
              status = ?item.status,
              "item not in expected state after donation transition",
            );
            self.flag(item_id).await;
            Ok(false)
          }
        }
      }
      Err(e) => {
        tracing::error!(
          donation_id = %donation.donation_id,
          %item_id,
          error = %e,
          "item update failed after donation transition",
        );
        self.flag(item_id).await;
        Ok(false)
      }
    }
  }

  async fn flag(&self, item_id: Uuid) {
    match self.store.set_reconciliation_flag(item_id, true).await {
      Ok(true) => {}
      Ok(false) => tracing::warn!(%item_id, "could not flag missing item for reconciliation"),
      Err(e) => tracing::error!(%item_id, error = %e, "could not flag item for reconciliation"),
    }
  }
}

/// Union of two newest-first lists, newest first, without duplicates.
fn merge_newest_first(sent: Vec<Donation>, received: Vec<Donation>) -> Vec<Donation> {
  let mut all = sent;
  for d in received {
    if !all.iter().any(|s| s.donation_id == d.donation_id) {
      all.push(d);
    }
  }
  all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  all
}
