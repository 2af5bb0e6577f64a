//! The uniform response envelope shared by every API operation.
//!
//! Success and failure travel in the same shape:
//! `{success, data?, message?, errors?, pagination?}`. The server builds
//! envelopes; clients decode them and unwrap the inner payload.

use serde::{Deserialize, Serialize};

use crate::validate::FieldError;

// ─── Pagination ──────────────────────────────────────────────────────────────

/// Summary attached to list responses: `pages = ceil(total / limit)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
  pub total: u64,
  pub page:  u32,
  pub pages: u64,
}

impl Pagination {
  pub fn new(total: u64, page: u32, limit: u32) -> Self {
    Self { total, page, pages: total.div_ceil(u64::from(limit.max(1))) }
  }
}

// ─── Envelope ────────────────────────────────────────────────────────────────

/// The wrapper around every response body. Absent fields are omitted from
/// the serialized form rather than sent as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
  pub success:    bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data:       Option<T>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub errors:     Option<Vec<FieldError>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
  /// A success envelope carrying `data`.
  pub fn data(data: T) -> Self {
    Self {
      success:    true,
      data:       Some(data),
      message:    None,
      errors:     None,
      pagination: None,
    }
  }

  /// A success envelope with no payload (e.g. a delete confirmation).
  pub fn message(message: impl Into<String>) -> Self {
    Self {
      success:    true,
      data:       None,
      message:    Some(message.into()),
      errors:     None,
      pagination: None,
    }
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = Some(message.into());
    self
  }

  pub fn with_pagination(mut self, pagination: Pagination) -> Self {
    self.pagination = Some(pagination);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pages_is_ceiling_of_total_over_limit() {
    assert_eq!(Pagination::new(25, 1, 10).pages, 3);
    assert_eq!(Pagination::new(30, 1, 10).pages, 3);
    assert_eq!(Pagination::new(0, 1, 10).pages, 0);
    assert_eq!(Pagination::new(1, 1, 10).pages, 1);
  }

  #[test]
  fn absent_fields_are_omitted() {
    let env = Envelope::data(1u32);
    let json = serde_json::to_string(&env).unwrap();
    assert_eq!(json, r#"{"success":true,"data":1}"#);
  }

  #[test]
  fn message_only_envelope_has_no_data_key() {
    let env: Envelope<u32> = Envelope::message("done");
    let json = serde_json::to_string(&env).unwrap();
    assert_eq!(json, r#"{"success":true,"message":"done"}"#);
  }
}
