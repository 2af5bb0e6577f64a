//! Lead — the sole entity of the store.
//!
//! A lead is a prospective-customer contact record submitted through the
//! capture form. Only its status ever changes after creation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Source ──────────────────────────────────────────────────────────────────

/// The origin channel through which a lead was acquired. Set at creation
/// only; never mutated afterwards.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum LeadSource {
  #[default]
  Website,
  #[serde(rename = "Social Media")]
  SocialMedia,
  Referral,
  Direct,
  Other,
}

impl LeadSource {
  pub const ALL: [LeadSource; 5] = [
    LeadSource::Website,
    LeadSource::SocialMedia,
    LeadSource::Referral,
    LeadSource::Direct,
    LeadSource::Other,
  ];

  /// The wire and database representation. Must match the serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Website => "Website",
      Self::SocialMedia => "Social Media",
      Self::Referral => "Referral",
      Self::Direct => "Direct",
      Self::Other => "Other",
    }
  }
}

impl FromStr for LeadSource {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Website" => Ok(Self::Website),
      "Social Media" => Ok(Self::SocialMedia),
      "Referral" => Ok(Self::Referral),
      "Direct" => Ok(Self::Direct),
      "Other" => Ok(Self::Other),
      other => Err(Error::UnknownSource(other.to_owned())),
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// The lead's pipeline stage. Any value may follow any other — there is no
/// transition state machine.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum LeadStatus {
  #[default]
  New,
  Contacted,
  Qualified,
  Lost,
  Converted,
}

impl LeadStatus {
  pub const ALL: [LeadStatus; 5] = [
    LeadStatus::New,
    LeadStatus::Contacted,
    LeadStatus::Qualified,
    LeadStatus::Lost,
    LeadStatus::Converted,
  ];

  /// The wire and database representation. Must match the serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::New => "New",
      Self::Contacted => "Contacted",
      Self::Qualified => "Qualified",
      Self::Lost => "Lost",
      Self::Converted => "Converted",
    }
  }

  /// The next stage in display order, wrapping around. Used by clients that
  /// cycle a lead's status in place.
  pub fn next(&self) -> LeadStatus {
    let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
    Self::ALL[(idx + 1) % Self::ALL.len()]
  }
}

impl FromStr for LeadStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "New" => Ok(Self::New),
      "Contacted" => Ok(Self::Contacted),
      "Qualified" => Ok(Self::Qualified),
      "Lost" => Ok(Self::Lost),
      "Converted" => Ok(Self::Converted),
      other => Err(Error::UnknownStatus(other.to_owned())),
    }
  }
}

// ─── Lead ────────────────────────────────────────────────────────────────────

/// A persisted lead record. `lead_id` and `created_at` are store-assigned
/// and immutable; `status` is the only field mutated after creation.
///
/// Wire keys are camelCase (`leadId`, `createdAt`) to match the published
/// HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
  pub lead_id:    Uuid,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub company:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message:    Option<String>,
  pub source:     LeadSource,
  pub status:     LeadStatus,
  pub created_at: DateTime<Utc>,
}

// ─── NewLead ─────────────────────────────────────────────────────────────────

/// Validated, normalized input to [`crate::store::LeadStore::create_lead`].
///
/// Produced only by [`crate::validate::LeadDraft::validate`], so every
/// instance carries a trimmed name, a lowercased email, and a digits-only
/// phone. `lead_id`, `created_at`, and the default status are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewLead {
  pub name:    String,
  pub email:   String,
  pub phone:   String,
  pub company: Option<String>,
  pub message: Option<String>,
  pub source:  LeadSource,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn source_serde_uses_spaced_name() {
    let json = serde_json::to_string(&LeadSource::SocialMedia).unwrap();
    assert_eq!(json, "\"Social Media\"");
    let back: LeadSource = serde_json::from_str("\"Social Media\"").unwrap();
    assert_eq!(back, LeadSource::SocialMedia);
  }

  #[test]
  fn status_round_trips_through_strings() {
    for status in LeadStatus::ALL {
      assert_eq!(status.as_str().parse::<LeadStatus>().unwrap(), status);
    }
  }

  #[test]
  fn unknown_status_is_rejected() {
    assert!("Archived".parse::<LeadStatus>().is_err());
  }

  #[test]
  fn status_cycle_wraps() {
    assert_eq!(LeadStatus::New.next(), LeadStatus::Contacted);
    assert_eq!(LeadStatus::Converted.next(), LeadStatus::New);
  }
}
