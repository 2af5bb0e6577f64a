//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, and the two enums as their wire strings (`"Social Media"` keeps
//! its space).

use chrono::{DateTime, Utc};
use lede_core::lead::{Lead, LeadSource, LeadStatus};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_status(status: LeadStatus) -> &'static str { status.as_str() }

pub fn decode_status(s: &str) -> Result<LeadStatus> { Ok(s.parse()?) }

pub fn encode_source(source: LeadSource) -> &'static str { source.as_str() }

pub fn decode_source(s: &str) -> Result<LeadSource> { Ok(s.parse()?) }

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `leads` row.
pub struct RawLead {
  pub lead_id:    String,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub company:    Option<String>,
  pub message:    Option<String>,
  pub source:     String,
  pub status:     String,
  pub created_at: String,
}

impl RawLead {
  /// Column order must match the `SELECT` list in `store.rs`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      lead_id:    row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      company:    row.get(4)?,
      message:    row.get(5)?,
      source:     row.get(6)?,
      status:     row.get(7)?,
      created_at: row.get(8)?,
    })
  }

  pub fn into_lead(self) -> Result<Lead> {
    Ok(Lead {
      lead_id:    decode_uuid(&self.lead_id)?,
      name:       self.name,
      email:      self.email,
      phone:      self.phone,
      company:    self.company,
      message:    self.message,
      source:     decode_source(&self.source)?,
      status:     decode_status(&self.status)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
