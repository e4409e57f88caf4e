//! Best-effort notification emission.
//!
//! A failed notification never fails the operation that triggered it; the
//! failure is logged and dropped.

use uuid::Uuid;

use crate::{
  donation::Donation,
  notification::{NewNotification, Notification, NotificationKind},
  store::WardrobeStore,
  Error, Result,
};

/// Creates notifications on behalf of the workflow and of external jobs.
pub struct Notifier<'a, S> {
  store: &'a S,
}

impl<'a, S: WardrobeStore> Notifier<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  /// Create a notification, propagating failures. This is the entry point
  /// for scheduled jobs such as the daily outfit suggestion.
  pub async fn notify(&self, input: NewNotification) -> Result<Notification> {
    self.store.push_notification(input).await.map_err(Error::store)
  }

  /// Create a notification, logging and discarding any failure.
  pub async fn notify_best_effort(&self, input: NewNotification) {
    let account_id = input.account_id;
    let kind = input.kind;
    if let Err(e) = self.notify(input).await {
      tracing::warn!(%account_id, ?kind, error = %e, "notification delivery failed");
    }
  }

  pub(crate) async fn donation_proposed(&self, donation: &Donation, donor_name: &str) {
    self
      .notify_best_effort(
        NewNotification::new(
          donation.donor_id,
          NotificationKind::DonationSent,
          "Donation Sent",
          format!(
            "You offered \"{}\" to {}",
            donation.item_name, donation.recipient_email
          ),
        )
        .about(donation.donation_id),
      )
      .await;

    if let Some(recipient) = donation.recipient_id {
      self
        .notify_best_effort(
          NewNotification::new(
            recipient,
            NotificationKind::DonationReceived,
            "New Donation!",
            format!("{donor_name} wants to give you \"{}\"", donation.item_name),
          )
          .about(donation.donation_id),
        )
        .await;
    }
  }

  pub(crate) async fn donation_resolved(
    &self,
    donation: &Donation,
    target: Uuid,
    kind: NotificationKind,
    actor_name: &str,
  ) {
    let (title, verb) = match kind {
      NotificationKind::DonationAccepted => ("Donation Accepted!", "accepted"),
      NotificationKind::DonationRejected => ("Donation Declined", "declined"),
      NotificationKind::DonationCancelled => ("Donation Cancelled", "cancelled"),
      _ => ("Donation Update", "updated"),
    };
    self
      .notify_best_effort(
        NewNotification::new(
          target,
          kind,
          title,
          format!("{actor_name} {verb} the donation of \"{}\"", donation.item_name),
        )
        .about(donation.donation_id),
      )
      .await;
  }
}
