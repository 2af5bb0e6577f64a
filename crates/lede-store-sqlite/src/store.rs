//! [`SqliteStore`] — the SQLite implementation of [`LeadStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use lede_core::{
  lead::{Lead, LeadStatus, NewLead},
  store::{LeadPage, LeadQuery, LeadStore, SortKey},
};

use crate::{
  Error, Result,
  encode::{RawLead, encode_dt, encode_source, encode_status, encode_uuid},
  error::is_unique_violation,
  schema::SCHEMA,
};

/// The `leads` columns, in the order [`RawLead::from_row`] expects.
pub(crate) const LEAD_COLUMNS: &str =
  "lead_id, name, email, phone, company, message, source, status, created_at";

/// The `ORDER BY` body for a [`SortKey`]; a closed mapping, so sort input
/// never reaches the SQL string.
fn sort_clause(sort: SortKey) -> &'static str {
  match sort {
    SortKey::CreatedAtDesc => "created_at DESC",
    SortKey::CreatedAtAsc => "created_at ASC",
    SortKey::NameAsc => "name ASC",
    SortKey::NameDesc => "name DESC",
    SortKey::EmailAsc => "email ASC",
    SortKey::EmailDesc => "email DESC",
    SortKey::StatusAsc => "status ASC",
    SortKey::StatusDesc => "status DESC",
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
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

  /// Fetch a single lead by an exact match on `column`.
  ///
  /// `column` is always a literal column name supplied by this module.
  async fn get_by(&self, column: &'static str, value: String) -> Result<Option<Lead>> {
    let raw: Option<RawLead> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE {column} = ?1"),
              rusqlite::params![value],
              RawLead::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLead::into_lead).transpose()
  }
}

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for SqliteStore {
  type Error = Error;

  async fn create_lead(&self, input: NewLead) -> Result<Lead> {
    let lead = Lead {
      lead_id:    Uuid::new_v4(),
      name:       input.name,
      email:      input.email,
      phone:      input.phone,
      company:    input.company,
      message:    input.message,
      source:     input.source,
      status:     LeadStatus::default(),
      created_at: Utc::now(),
    };

    let id_str     = encode_uuid(lead.lead_id);
    let at_str     = encode_dt(lead.created_at);
    let source_str = encode_source(lead.source).to_owned();
    let status_str = encode_status(lead.status).to_owned();
    let name       = lead.name.clone();
    let email      = lead.email.clone();
    let phone      = lead.phone.clone();
    let company    = lead.company.clone();
    let message    = lead.message.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO leads (
             lead_id, name, email, phone, company, message,
             source, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str, name, email, phone, company, message,
            source_str, status_str, at_str,
          ],
        )?;
        Ok(())
      })
      .await;

    match inserted {
      Ok(()) => Ok(lead),
      Err(e) if is_unique_violation(&e) => {
        Err(Error::DuplicateEmail(lead.email))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<Lead>> {
    self.get_by("email", email.to_owned()).await
  }

  async fn list_leads(&self, query: &LeadQuery) -> Result<LeadPage> {
    let status_str = query.status.map(encode_status).map(str::to_owned);
    let limit      = i64::from(query.limit.max(1));
    let offset     = i64::from(query.page.max(1) - 1) * limit;
    let order      = sort_clause(query.sort);

    let (raws, total): (Vec<RawLead>, i64) = self
      .conn
      .call(move |conn| {
        let (total, rows) = if let Some(status) = status_str {
          let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM leads WHERE status = ?1",
            rusqlite::params![status],
            |r| r.get(0),
          )?;
          let mut stmt = conn.prepare(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads WHERE status = ?1
             ORDER BY {order} LIMIT ?2 OFFSET ?3"
          ))?;
          let rows = stmt
            .query_map(
              rusqlite::params![status, limit, offset],
              RawLead::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          (total, rows)
        } else {
          let total: i64 =
            conn.query_row("SELECT COUNT(*) FROM leads", [], |r| r.get(0))?;
          let mut stmt = conn.prepare(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads
             ORDER BY {order} LIMIT ?1 OFFSET ?2"
          ))?;
          let rows = stmt
            .query_map(rusqlite::params![limit, offset], RawLead::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          (total, rows)
        };
        Ok((rows, total))
      })
      .await?;

    let leads = raws
      .into_iter()
      .map(RawLead::into_lead)
      .collect::<Result<Vec<_>>>()?;

    Ok(LeadPage { leads, total: total as u64 })
  }

  async fn get_lead(&self, id: Uuid) -> Result<Option<Lead>> {
    self.get_by("lead_id", encode_uuid(id)).await
  }

  async fn update_status(
    &self,
    id: Uuid,
    status: LeadStatus,
  ) -> Result<Option<Lead>> {
    let id_str     = encode_uuid(id);
    let status_str = encode_status(status).to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE leads SET status = ?1 WHERE lead_id = ?2",
          rusqlite::params![status_str, id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_lead(id).await
  }

  async fn delete_lead(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM leads WHERE lead_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
