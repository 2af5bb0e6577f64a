//! SQL schema for the Lede SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS leads (
    lead_id    TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL,   -- stored trimmed and lowercased
    phone      TEXT NOT NULL,   -- exactly 10 digits
    company    TEXT,
    message    TEXT,
    source     TEXT NOT NULL DEFAULT 'Website',
    status     TEXT NOT NULL DEFAULT 'New',
    created_at TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- One row per lowercased email; backs the duplicate check under races.
CREATE UNIQUE INDEX IF NOT EXISTS leads_email_idx   ON leads(email);
CREATE INDEX IF NOT EXISTS        leads_created_idx ON leads(created_at);
CREATE INDEX IF NOT EXISTS        leads_status_idx  ON leads(status);

PRAGMA user_version = 1;
";
