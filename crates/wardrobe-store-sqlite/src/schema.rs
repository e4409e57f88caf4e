//! SQL schema for the OurWardrobe SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.
//!
//! Cross-record references are plain columns without foreign keys: an item
//! may be deleted while donations still point at it, and readers treat such
//! dangling references as "not found".

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS accounts (
    account_id    TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,  -- lower-case
    password_hash TEXT NOT NULL,         -- argon2 PHC string
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS items (
    item_id              TEXT PRIMARY KEY,
    owner_id             TEXT NOT NULL,
    name                 TEXT NOT NULL,
    category             TEXT NOT NULL,
    audience             TEXT NOT NULL,
    color                TEXT NOT NULL,
    image_url            TEXT NOT NULL,
    status               TEXT NOT NULL DEFAULT 'active',  -- 'active' | 'inactive' | 'donated'
    created_at           TEXT NOT NULL,
    updated_at           TEXT NOT NULL,
    last_worn            TEXT,
    needs_reconciliation INTEGER NOT NULL DEFAULT 0
);

-- Donations are never deleted; terminal rows are history.
CREATE TABLE IF NOT EXISTS donations (
    donation_id     TEXT PRIMARY KEY,
    donor_id        TEXT NOT NULL,
    recipient_email TEXT NOT NULL,
    recipient_id    TEXT,
    item_id         TEXT NOT NULL,
    item_name       TEXT NOT NULL,
    item_category   TEXT NOT NULL,
    item_color      TEXT NOT NULL,
    notes           TEXT NOT NULL DEFAULT '',
    status          TEXT NOT NULL DEFAULT 'pending',
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

-- At most one pending donation per item, whatever the item row says.
CREATE UNIQUE INDEX IF NOT EXISTS donations_one_pending_per_item
    ON donations(item_id) WHERE status = 'pending';

CREATE TABLE IF NOT EXISTS notifications (
    notification_id  TEXT PRIMARY KEY,
    account_id       TEXT NOT NULL,
    title            TEXT NOT NULL,
    message          TEXT NOT NULL,
    kind             TEXT NOT NULL,
    related_donation TEXT,
    payload          TEXT,              -- JSON or NULL
    read             INTEGER NOT NULL DEFAULT 0,
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS items_owner_idx          ON items(owner_id, status);
CREATE INDEX IF NOT EXISTS items_flagged_idx        ON items(needs_reconciliation);
CREATE INDEX IF NOT EXISTS donations_donor_idx      ON donations(donor_id, created_at);
CREATE INDEX IF NOT EXISTS donations_recipient_idx  ON donations(recipient_id, created_at);
CREATE INDEX IF NOT EXISTS donations_email_idx      ON donations(recipient_email, created_at);
CREATE INDEX IF NOT EXISTS donations_item_idx       ON donations(item_id, created_at);
CREATE INDEX IF NOT EXISTS notifications_account_idx ON notifications(account_id, created_at);

PRAGMA user_version = 1;
";
