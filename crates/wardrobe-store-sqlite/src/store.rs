//! [`SqliteStore`], the SQLite implementation of [`WardrobeStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, params_from_iter, types::Value};
use uuid::Uuid;

use wardrobe_core::{
  account::{Account, AccountPatch, NewAccount},
  donation::{Donation, DonationStatus, NewDonation},
  item::{
    CategoryCount, ClothingItem, ItemPage, ItemPatch, ItemQuery, ItemSort, ItemStats, ItemStatus,
    NewItem,
  },
  notification::{NewNotification, Notification},
  reconcile::ItemRepair,
  store::WardrobeStore,
};

use crate::{
  encode::{
    ACCOUNT_COLUMNS, DONATION_COLUMNS, ITEM_COLUMNS, NOTIFICATION_COLUMNS, RawAccount,
    RawDonation, RawItem, RawNotification, decode_category, decode_item_status, encode_audience,
    encode_category, encode_dt, encode_item_status, encode_notification_kind, encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A wardrobe store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run one statement and return the number of rows it changed.
  async fn execute(&self, sql: &'static str, params: Vec<Value>) -> Result<usize> {
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, params_from_iter(params.iter()))?))
      .await?;
    Ok(changed)
  }

  async fn count(&self, sql: &'static str, params: Vec<Value>) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(sql, params_from_iter(params.iter()), |r| r.get(0))?))
      .await?;
    Ok(n as u64)
  }

  async fn query_donations(&self, sql: String, params: Vec<Value>) -> Result<Vec<Donation>> {
    let raws: Vec<RawDonation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params.iter()), RawDonation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDonation::into_donation).collect()
  }

  async fn query_items(&self, sql: String, params: Vec<Value>) -> Result<Vec<ClothingItem>> {
    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params.iter()), RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }

  async fn fetch_account(&self, column: &'static str, key: String) -> Result<Option<Account>> {
    let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = ?1");
    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![key], RawAccount::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAccount::into_account).transpose()
  }
}

enum AccountUpdate {
  Missing,
  EmailTaken,
  Updated,
}

fn text(s: impl Into<String>) -> Value { Value::Text(s.into()) }

fn id_val(id: Uuid) -> Value { Value::Text(encode_uuid(id)) }

fn now() -> Value { Value::Text(encode_dt(Utc::now())) }

// ─── WardrobeStore impl ──────────────────────────────────────────────────────

impl WardrobeStore for SqliteStore {
  type Error = Error;

  // ── Accounts ──────────────────────────────────────────────────────────────

  async fn create_account(&self, input: NewAccount) -> Result<Account> {
    let account = Account {
      account_id:    Uuid::new_v4(),
      name:          input.name,
      email:         input.email,
      password_hash: input.password_hash,
      created_at:    Utc::now(),
    };

    let id_str   = encode_uuid(account.account_id);
    let name     = account.name.clone();
    let email    = account.email.clone();
    let hash     = account.password_hash.clone();
    let at_str   = encode_dt(account.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        match conn.execute(
          "INSERT INTO accounts (account_id, name, email, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, email, hash, at_str],
        ) {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      return Err(Error::EmailTaken(account.email));
    }
    Ok(account)
  }

  async fn get_account(&self, id: Uuid) -> Result<Option<Account>> {
    self.fetch_account("account_id", encode_uuid(id)).await
  }

  async fn find_account_by_email(&self, email: String) -> Result<Option<Account>> {
    self.fetch_account("email", email).await
  }

  async fn update_account(&self, id: Uuid, patch: AccountPatch) -> Result<Option<Account>> {
    let id_str = encode_uuid(id);
    let new_email = patch.email.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let old_email: Option<String> = tx
          .query_row(
            "SELECT email FROM accounts WHERE account_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;
        let Some(old_email) = old_email else {
          return Ok(AccountUpdate::Missing);
        };

        if patch.email.as_ref().is_some_and(|e| *e != old_email) {
          tx.execute(
            "UPDATE donations SET recipient_id = ?1
             WHERE recipient_id IS NULL AND recipient_email = ?2",
            rusqlite::params![id_str, old_email],
          )?;
        }

        match tx.execute(
          "UPDATE accounts SET name = COALESCE(?1, name), email = COALESCE(?2, email)
           WHERE account_id = ?3",
          rusqlite::params![patch.name, patch.email, id_str],
        ) {
          Ok(_) => {}
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
          {
            // Dropping `tx` rolls back the donation rebinding too.
            return Ok(AccountUpdate::EmailTaken);
          }
          Err(e) => return Err(e.into()),
        }
        tx.commit()?;
        Ok(AccountUpdate::Updated)
      })
      .await?;

    match outcome {
      AccountUpdate::Missing => Ok(None),
      AccountUpdate::EmailTaken => Err(Error::EmailTaken(new_email.unwrap_or_default())),
      AccountUpdate::Updated => self.get_account(id).await,
    }
  }

  async fn set_password_hash(&self, id: Uuid, password_hash: String) -> Result<bool> {
    let n = self
      .execute(
        "UPDATE accounts SET password_hash = ?1 WHERE account_id = ?2",
        vec![text(password_hash), id_val(id)],
      )
      .await?;
    Ok(n == 1)
  }

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn add_item(&self, owner_id: Uuid, input: NewItem) -> Result<ClothingItem> {
    let at = Utc::now();
    let item = ClothingItem {
      item_id:              Uuid::new_v4(),
      owner_id,
      name:                 input.name,
      category:             input.category,
      audience:             input.audience,
      color:                input.color,
      image_url:            input.image_url,
      status:               ItemStatus::Active,
      created_at:           at,
      updated_at:           at,
      last_worn:            None,
      needs_reconciliation: false,
    };

    let params = vec![
      id_val(item.item_id),
      id_val(item.owner_id),
      text(item.name.clone()),
      text(encode_category(item.category)),
      text(encode_audience(item.audience)),
      text(item.color.clone()),
      text(item.image_url.clone()),
      text(encode_item_status(item.status)),
      text(encode_dt(at)),
    ];

    self
      .execute(
        "INSERT INTO items (
           item_id, owner_id, name, category, audience, color, image_url,
           status, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params,
      )
      .await?;

    Ok(item)
  }

  async fn get_item(&self, id: Uuid) -> Result<Option<ClothingItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1");
    Ok(self.query_items(sql, vec![id_val(id)]).await?.into_iter().next())
  }

  async fn list_items(&self, query: ItemQuery) -> Result<ItemPage> {
    // Build WHERE clause dynamically.
    let mut conds: Vec<&'static str> = vec!["owner_id = ?"];
    let mut params: Vec<Value> = vec![id_val(query.owner_id)];
    if let Some(c) = query.category {
      conds.push("category = ?");
      params.push(text(encode_category(c)));
    }
    if let Some(a) = query.audience {
      conds.push("audience = ?");
      params.push(text(encode_audience(a)));
    }
    if let Some(color) = &query.color {
      conds.push("instr(lower(color), ?) > 0");
      params.push(text(color.to_lowercase()));
    }
    if let Some(s) = query.status {
      conds.push("status = ?");
      params.push(text(encode_item_status(s)));
    }
    let where_clause = conds.join(" AND ");

    let order = match query.sort {
      ItemSort::Newest => "created_at DESC, rowid DESC",
      ItemSort::Oldest => "created_at ASC, rowid ASC",
      ItemSort::Name => "name COLLATE NOCASE ASC, created_at DESC",
    };

    let count_sql = format!("SELECT COUNT(*) FROM items WHERE {where_clause}");
    let count_params = params.clone();
    let total: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&count_sql, params_from_iter(count_params.iter()), |r| r.get(0))?)
      })
      .await?;

    let sql = format!(
      "SELECT {ITEM_COLUMNS} FROM items WHERE {where_clause} ORDER BY {order} LIMIT ? OFFSET ?"
    );
    params.push(Value::Integer(i64::from(query.limit)));
    params.push(Value::Integer(query.offset() as i64));
    let items = self.query_items(sql, params).await?;

    Ok(ItemPage { items, total: total as u64 })
  }

  async fn item_stats(&self, owner_id: Uuid) -> Result<ItemStats> {
    let owner = encode_uuid(owner_id);
    let rows: Vec<(String, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT status, COUNT(*) FROM items WHERE owner_id = ?1 GROUP BY status")?;
        let rows = stmt
          .query_map(rusqlite::params![owner], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let (mut active, mut inactive, mut donated) = (0, 0, 0);
    for (status, n) in rows {
      match decode_item_status(&status)? {
        ItemStatus::Active => active = n as u64,
        ItemStatus::Inactive => inactive = n as u64,
        ItemStatus::Donated => donated = n as u64,
      }
    }
    Ok(ItemStats::from_counts(active, inactive, donated))
  }

  async fn category_counts(&self, owner_id: Uuid) -> Result<Vec<CategoryCount>> {
    let owner = encode_uuid(owner_id);
    let rows: Vec<(String, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT category, COUNT(*) AS n FROM items WHERE owner_id = ?1
           GROUP BY category ORDER BY n DESC, category ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(c, n)| Ok(CategoryCount { category: decode_category(&c)?, count: n as u64 }))
      .collect()
  }

  async fn update_item(
    &self,
    id:       Uuid,
    owner_id: Uuid,
    patch:    ItemPatch,
  ) -> Result<Option<ClothingItem>> {
    let mut sets: Vec<&'static str> = vec!["updated_at = ?"];
    let mut params: Vec<Value> = vec![now()];
    if let Some(name) = patch.name {
      sets.push("name = ?");
      params.push(text(name));
    }
    if let Some(c) = patch.category {
      sets.push("category = ?");
      params.push(text(encode_category(c)));
    }
    if let Some(a) = patch.audience {
      sets.push("audience = ?");
      params.push(text(encode_audience(a)));
    }
    if let Some(color) = patch.color {
      sets.push("color = ?");
      params.push(text(color));
    }
    if let Some(url) = patch.image_url {
      sets.push("image_url = ?");
      params.push(text(url));
    }
    if let Some(s) = patch.status {
      sets.push("status = ?");
      params.push(text(encode_item_status(s)));
    }
    if let Some(worn) = patch.last_worn {
      sets.push("last_worn = ?");
      params.push(text(encode_dt(worn)));
    }

    // A status change must not overwrite the donation lock.
    let guard = if patch.status.is_some() { " AND status != 'donated'" } else { "" };
    let sql = format!(
      "UPDATE items SET {} WHERE item_id = ? AND owner_id = ?{guard}",
      sets.join(", ")
    );
    params.push(id_val(id));
    params.push(id_val(owner_id));

    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, params_from_iter(params.iter()))?))
      .await?;
    if changed == 0 {
      return Ok(None);
    }
    self.get_item(id).await
  }

  async fn delete_item(&self, id: Uuid, owner_id: Uuid) -> Result<bool> {
    let n = self
      .execute(
        "DELETE FROM items WHERE item_id = ?1 AND owner_id = ?2 AND status != 'donated'",
        vec![id_val(id), id_val(owner_id)],
      )
      .await?;
    Ok(n == 1)
  }

  // ── Item locking ──────────────────────────────────────────────────────────

  async fn try_lock_item(&self, id: Uuid, owner_id: Uuid) -> Result<bool> {
    let n = self
      .execute(
        "UPDATE items SET status = 'donated', updated_at = ?1
         WHERE item_id = ?2 AND owner_id = ?3 AND status != 'donated'",
        vec![now(), id_val(id), id_val(owner_id)],
      )
      .await?;
    Ok(n == 1)
  }

  async fn release_item(&self, id: Uuid, owner_id: Uuid) -> Result<bool> {
    let n = self
      .execute(
        "UPDATE items SET status = 'active', updated_at = ?1
         WHERE item_id = ?2 AND owner_id = ?3 AND status = 'donated'",
        vec![now(), id_val(id), id_val(owner_id)],
      )
      .await?;
    Ok(n == 1)
  }

  async fn transfer_item(&self, id: Uuid, from: Uuid, to: Uuid) -> Result<bool> {
    let n = self
      .execute(
        "UPDATE items SET owner_id = ?1, status = 'active', updated_at = ?2
         WHERE item_id = ?3 AND owner_id = ?4 AND status = 'donated'",
        vec![id_val(to), now(), id_val(id), id_val(from)],
      )
      .await?;
    Ok(n == 1)
  }

  async fn repair_item(&self, repair: ItemRepair) -> Result<bool> {
    // '' stands for "no donation references this item".
    let latest = repair
      .latest_donation
      .map(|(id, status)| format!("{}:{}", encode_uuid(id), status.as_str()))
      .unwrap_or_default();
    let n = self
      .execute(
        "UPDATE items SET owner_id = ?1, status = ?2, needs_reconciliation = 0, updated_at = ?3
         WHERE item_id = ?4 AND owner_id = ?5 AND status = ?6
           AND COALESCE(
             (SELECT donation_id || ':' ||
                     CASE status WHEN 'accepted' THEN 'completed' ELSE status END
              FROM donations WHERE item_id = ?4
              ORDER BY created_at DESC, rowid DESC LIMIT 1),
             ''
           ) = ?7",
        vec![
          id_val(repair.owner_id),
          text(encode_item_status(repair.status)),
          now(),
          id_val(repair.item_id),
          id_val(repair.observed_owner),
          text(encode_item_status(repair.observed_status)),
          text(latest),
        ],
      )
      .await?;
    Ok(n == 1)
  }

  async fn set_reconciliation_flag(&self, id: Uuid, flagged: bool) -> Result<bool> {
    let n = self
      .execute(
        "UPDATE items SET needs_reconciliation = ?1 WHERE item_id = ?2",
        vec![Value::Integer(i64::from(flagged)), id_val(id)],
      )
      .await?;
    Ok(n == 1)
  }

  async fn flagged_items(&self) -> Result<Vec<ClothingItem>> {
    let sql = format!(
      "SELECT {ITEM_COLUMNS} FROM items WHERE needs_reconciliation = 1 ORDER BY updated_at ASC"
    );
    self.query_items(sql, vec![]).await
  }

  // ── Donations ─────────────────────────────────────────────────────────────

  async fn record_donation(&self, input: NewDonation) -> Result<Donation> {
    let at = Utc::now();
    let donation = Donation {
      donation_id:     Uuid::new_v4(),
      donor_id:        input.donor_id,
      recipient_email: input.recipient_email,
      recipient_id:    input.recipient_id,
      item_id:         input.item_id,
      item_name:       input.item_name,
      item_category:   input.item_category,
      item_color:      input.item_color,
      notes:           input.notes,
      status:          DonationStatus::Pending,
      created_at:      at,
      updated_at:      at,
    };

    let params = vec![
      id_val(donation.donation_id),
      id_val(donation.donor_id),
      text(donation.recipient_email.clone()),
      donation.recipient_id.map(id_val).unwrap_or(Value::Null),
      id_val(donation.item_id),
      text(donation.item_name.clone()),
      text(encode_category(donation.item_category)),
      text(donation.item_color.clone()),
      text(donation.notes.clone()),
      text(donation.status.as_str()),
      text(encode_dt(at)),
    ];

    self
      .execute(
        "INSERT INTO donations (
           donation_id, donor_id, recipient_email, recipient_id, item_id,
           item_name, item_category, item_color, notes, status, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
        params,
      )
      .await?;

    Ok(donation)
  }

  async fn get_donation(&self, id: Uuid) -> Result<Option<Donation>> {
    let sql = format!("SELECT {DONATION_COLUMNS} FROM donations WHERE donation_id = ?1");
    Ok(self.query_donations(sql, vec![id_val(id)]).await?.into_iter().next())
  }

  async fn settle_donation(
    &self,
    id:           Uuid,
    status:       DonationStatus,
    recipient_id: Option<Uuid>,
  ) -> Result<Option<Donation>> {
    let id_str        = encode_uuid(id);
    let status_str    = status.as_str();
    let recipient_str = recipient_id.map(encode_uuid);
    let at_str        = encode_dt(Utc::now());
    let select_sql    = format!("SELECT {DONATION_COLUMNS} FROM donations WHERE donation_id = ?1");

    let raw: Option<RawDonation> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE donations
           SET status = ?1, recipient_id = COALESCE(recipient_id, ?2), updated_at = ?3
           WHERE donation_id = ?4 AND status = 'pending'",
          rusqlite::params![status_str, recipient_str, at_str, id_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(
          conn
            .query_row(&select_sql, rusqlite::params![id_str], RawDonation::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDonation::into_donation).transpose()
  }

  async fn donations_sent(&self, donor_id: Uuid) -> Result<Vec<Donation>> {
    let sql = format!(
      "SELECT {DONATION_COLUMNS} FROM donations WHERE donor_id = ?1
       ORDER BY created_at DESC, rowid DESC"
    );
    self.query_donations(sql, vec![id_val(donor_id)]).await
  }

  async fn donations_received(&self, account_id: Uuid, email: String) -> Result<Vec<Donation>> {
    let sql = format!(
      "SELECT {DONATION_COLUMNS} FROM donations
       WHERE recipient_id = ?1 OR (recipient_id IS NULL AND recipient_email = ?2)
       ORDER BY created_at DESC, rowid DESC"
    );
    self.query_donations(sql, vec![id_val(account_id), text(email)]).await
  }

  async fn latest_donation_for_item(&self, item_id: Uuid) -> Result<Option<Donation>> {
    let sql = format!(
      "SELECT {DONATION_COLUMNS} FROM donations WHERE item_id = ?1
       ORDER BY created_at DESC, rowid DESC LIMIT 1"
    );
    Ok(self.query_donations(sql, vec![id_val(item_id)]).await?.into_iter().next())
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn push_notification(&self, input: NewNotification) -> Result<Notification> {
    let notification = Notification {
      notification_id:  Uuid::new_v4(),
      account_id:       input.account_id,
      title:            input.title,
      message:          input.message,
      kind:             input.kind,
      related_donation: input.related_donation,
      payload:          input.payload,
      read:             false,
      created_at:       Utc::now(),
    };

    let payload = notification
      .payload
      .as_ref()
      .map(serde_json::to_string)
      .transpose()?;

    let params = vec![
      id_val(notification.notification_id),
      id_val(notification.account_id),
      text(notification.title.clone()),
      text(notification.message.clone()),
      text(encode_notification_kind(notification.kind)),
      notification.related_donation.map(id_val).unwrap_or(Value::Null),
      payload.map(Value::Text).unwrap_or(Value::Null),
      text(encode_dt(notification.created_at)),
    ];

    self
      .execute(
        "INSERT INTO notifications (
           notification_id, account_id, title, message, kind,
           related_donation, payload, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params,
      )
      .await?;

    Ok(notification)
  }

  async fn list_notifications(&self, account_id: Uuid, limit: usize) -> Result<Vec<Notification>> {
    let account = encode_uuid(account_id);
    let limit = limit as i64;
    let sql = format!(
      "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE account_id = ?1
       ORDER BY created_at DESC, rowid DESC LIMIT ?2"
    );

    let raws: Vec<RawNotification> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![account, limit], RawNotification::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNotification::into_notification).collect()
  }

  async fn unread_count(&self, account_id: Uuid) -> Result<u64> {
    self
      .count(
        "SELECT COUNT(*) FROM notifications WHERE account_id = ?1 AND read = 0",
        vec![id_val(account_id)],
      )
      .await
  }

  async fn mark_read(&self, account_id: Uuid, id: Uuid) -> Result<bool> {
    let n = self
      .execute(
        "UPDATE notifications SET read = 1 WHERE notification_id = ?1 AND account_id = ?2",
        vec![id_val(id), id_val(account_id)],
      )
      .await?;
    Ok(n == 1)
  }

  async fn mark_all_read(&self, account_id: Uuid) -> Result<u64> {
    let n = self
      .execute(
        "UPDATE notifications SET read = 1 WHERE account_id = ?1 AND read = 0",
        vec![id_val(account_id)],
      )
      .await?;
    Ok(n as u64)
  }

  async fn clear_notifications(&self, account_id: Uuid) -> Result<u64> {
    let n = self
      .execute("DELETE FROM notifications WHERE account_id = ?1", vec![id_val(account_id)])
      .await?;
    Ok(n as u64)
  }
}
