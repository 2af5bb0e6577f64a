//! The `LeadStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `lede-store-sqlite`).
//! Higher layers (`lede-api`) depend on this abstraction, not on any
//! concrete backend.

use std::{future::Future, str::FromStr};

use uuid::Uuid;

use crate::{
  Error,
  lead::{Lead, LeadStatus, NewLead},
};

// ─── Sort key ────────────────────────────────────────────────────────────────

/// A closed set of list orderings, parsed from the wire strings
/// `"createdAt"`, `"-createdAt"`, `"name"`, … — a leading `-` means
/// descending. Never interpolated raw into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
  /// Newest first — the default ordering.
  #[default]
  CreatedAtDesc,
  CreatedAtAsc,
  NameAsc,
  NameDesc,
  EmailAsc,
  EmailDesc,
  StatusAsc,
  StatusDesc,
}

impl FromStr for SortKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "createdAt" => Ok(Self::CreatedAtAsc),
      "-createdAt" => Ok(Self::CreatedAtDesc),
      "name" => Ok(Self::NameAsc),
      "-name" => Ok(Self::NameDesc),
      "email" => Ok(Self::EmailAsc),
      "-email" => Ok(Self::EmailDesc),
      "status" => Ok(Self::StatusAsc),
      "-status" => Ok(Self::StatusDesc),
      other => Err(Error::UnknownSortKey(other.to_owned())),
    }
  }
}

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`LeadStore::list_leads`]. `page` is 1-based.
#[derive(Debug, Clone)]
pub struct LeadQuery {
  pub status: Option<LeadStatus>,
  pub page:   u32,
  pub limit:  u32,
  pub sort:   SortKey,
}

impl Default for LeadQuery {
  fn default() -> Self {
    Self { status: None, page: 1, limit: 10, sort: SortKey::default() }
  }
}

/// One page of results plus the total count matching the filter (across all
/// pages, not just this one).
#[derive(Debug, Clone)]
pub struct LeadPage {
  pub leads: Vec<Lead>,
  pub total: u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a lead store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LeadStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a new lead, assigning `lead_id`, `created_at`, and the default
  /// status. Fails with the backend's duplicate-email error if a record
  /// with the same (lowercased) email already exists — the storage-level
  /// unique constraint is the race-safe backstop behind
  /// [`LeadStore::find_by_email`].
  fn create_lead(
    &self,
    input: NewLead,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;

  /// Look up a lead by its stored (lowercased) email address.
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + 'a;

  /// Return the requested page of leads, optionally filtered by status,
  /// plus the total matching count. A page past the end yields an empty
  /// page with the count intact.
  fn list_leads<'a>(
    &'a self,
    query: &'a LeadQuery,
  ) -> impl Future<Output = Result<LeadPage, Self::Error>> + Send + 'a;

  /// Retrieve a lead by id. Returns `None` if not found.
  fn get_lead(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;

  /// Set the status field — nothing else — and return the updated record.
  /// Returns `None` (and mutates nothing) if the id is unknown.
  fn update_status(
    &self,
    id: Uuid,
    status: LeadStatus,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;

  /// Hard-delete a lead. Returns `false` if the id was not present.
  fn delete_lead(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sort_keys_parse_with_direction_prefix() {
    assert_eq!("-createdAt".parse::<SortKey>().unwrap(), SortKey::CreatedAtDesc);
    assert_eq!("createdAt".parse::<SortKey>().unwrap(), SortKey::CreatedAtAsc);
    assert_eq!("-name".parse::<SortKey>().unwrap(), SortKey::NameDesc);
    assert!("priority".parse::<SortKey>().is_err());
  }
}
