//! The validation layer — pure field checks and whole-draft validation.
//!
//! The same rules run on both sides of the wire: clients validate a draft
//! before submitting (a failure blocks the request entirely), and the API
//! re-validates as the authority.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lead::{LeadSource, NewLead};

/// Email syntax check: `local@domain.tld` with word characters and single
/// interior dots or dashes.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
    .expect("email pattern compiles")
});

// ─── Field checks ────────────────────────────────────────────────────────────

/// True iff the trimmed name is 2–50 characters long.
pub fn valid_name(name: &str) -> bool {
  let len = name.trim().chars().count();
  (2..=50).contains(&len)
}

/// True iff the trimmed value matches the email pattern.
pub fn valid_email(email: &str) -> bool { EMAIL_RE.is_match(email.trim()) }

/// True iff exactly 10 digits remain after stripping non-digit characters.
/// "(123) 456-7890" is valid; "12345" is not.
pub fn valid_phone(phone: &str) -> bool { digits_of(phone).len() == 10 }

/// True if absent (empty after trimming), else trimmed length ≤ 100.
pub fn valid_company(company: &str) -> bool {
  let len = company.trim().chars().count();
  len == 0 || len <= 100
}

/// True if absent (empty after trimming), else trimmed length ≤ 500.
pub fn valid_message(message: &str) -> bool {
  let len = message.trim().chars().count();
  len == 0 || len <= 500
}

/// True iff `source` is a member of the source enum.
pub fn valid_source(source: &str) -> bool {
  source.parse::<LeadSource>().is_ok()
}

/// True iff `status` is a member of the status enum.
pub fn valid_status(status: &str) -> bool {
  status.parse::<crate::lead::LeadStatus>().is_ok()
}

/// The digit characters of `s`, in order.
fn digits_of(s: &str) -> String {
  s.chars().filter(char::is_ascii_digit).collect()
}

// ─── FieldError ──────────────────────────────────────────────────────────────

/// A single failed field check, as surfaced in the API envelope's `errors`
/// list and next to form fields in clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: &str, message: &str) -> Self {
    Self { field: field.to_owned(), message: message.to_owned() }
  }
}

// ─── LeadDraft ───────────────────────────────────────────────────────────────

/// The raw submitted record, before any check has run. This is both the
/// `POST /leads` request body and the client-side form state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadDraft {
  #[serde(default)]
  pub name:    String,
  #[serde(default)]
  pub email:   String,
  #[serde(default)]
  pub phone:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub company: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source:  Option<String>,
}

impl LeadDraft {
  /// Apply every field check to the whole draft.
  ///
  /// Returns the normalized [`NewLead`] — trimmed name, lowercased email,
  /// digits-only phone, whitespace-only optionals collapsed to `None`,
  /// missing source defaulted to Website — or one [`FieldError`] per
  /// failing field.
  pub fn validate(&self) -> Result<NewLead, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = self.name.trim();
    if name.is_empty() {
      errors.push(FieldError::new("name", "Name is required"));
    } else if !valid_name(&self.name) {
      errors.push(FieldError::new(
        "name",
        "Name must be between 2 and 50 characters",
      ));
    }

    let email = self.email.trim().to_lowercase();
    if email.is_empty() {
      errors.push(FieldError::new("email", "Email is required"));
    } else if !valid_email(&self.email) {
      errors.push(FieldError::new("email", "Please provide a valid email"));
    }

    let phone = digits_of(&self.phone);
    if self.phone.trim().is_empty() {
      errors.push(FieldError::new("phone", "Phone number is required"));
    } else if phone.len() != 10 {
      errors.push(FieldError::new(
        "phone",
        "Please provide a valid 10-digit phone number",
      ));
    }

    if let Some(company) = &self.company
      && !valid_company(company)
    {
      errors.push(FieldError::new(
        "company",
        "Company name cannot exceed 100 characters",
      ));
    }

    if let Some(message) = &self.message
      && !valid_message(message)
    {
      errors.push(FieldError::new(
        "message",
        "Message cannot exceed 500 characters",
      ));
    }

    let source = match self.source.as_deref().map(str::trim) {
      None | Some("") => LeadSource::default(),
      Some(s) if valid_source(s) => s.parse().unwrap_or_default(),
      Some(_) => {
        errors.push(FieldError::new("source", "Invalid source"));
        LeadSource::default()
      }
    };

    if !errors.is_empty() {
      return Err(errors);
    }

    Ok(NewLead {
      name: name.to_owned(),
      email,
      phone,
      company: normalize_optional(self.company.as_deref()),
      message: normalize_optional(self.message.as_deref()),
      source,
    })
  }
}

/// Trim an optional field; whitespace-only values become `None`.
fn normalize_optional(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> LeadDraft {
    LeadDraft {
      name:    "Ada Lovelace".into(),
      email:   "Ada@Example.com".into(),
      phone:   "(123) 456-7890".into(),
      company: Some("Analytical Engines Ltd".into()),
      message: Some("Interested in a demo.".into()),
      source:  Some("Referral".into()),
    }
  }

  // ── Field checks ──────────────────────────────────────────────────────────

  #[test]
  fn phone_accepts_iff_ten_digits_remain() {
    assert!(valid_phone("(123) 456-7890"));
    assert!(valid_phone("1234567890"));
    assert!(valid_phone("123-456-7890"));
    assert!(!valid_phone("12345"));
    assert!(!valid_phone("12345678901"));
    assert!(!valid_phone("phone me"));
  }

  #[test]
  fn name_bounds_are_inclusive() {
    assert!(!valid_name("A"));
    assert!(valid_name("Al"));
    assert!(valid_name(&"x".repeat(50)));
    assert!(!valid_name(&"x".repeat(51)));
    // Trimming happens before the length check.
    assert!(!valid_name("  A  "));
  }

  #[test]
  fn email_pattern_matches_plain_addresses() {
    assert!(valid_email("ada@example.com"));
    assert!(valid_email("ada.lovelace@mail.example.co"));
    assert!(!valid_email("ada@example"));
    assert!(!valid_email("not-an-email"));
    assert!(!valid_email("@example.com"));
  }

  #[test]
  fn optional_fields_accept_absence() {
    assert!(valid_company(""));
    assert!(valid_company("  "));
    assert!(valid_company(&"c".repeat(100)));
    assert!(!valid_company(&"c".repeat(101)));
    assert!(valid_message(""));
    assert!(valid_message(&"m".repeat(500)));
    assert!(!valid_message(&"m".repeat(501)));
  }

  #[test]
  fn enum_membership_checks() {
    assert!(valid_source("Social Media"));
    assert!(!valid_source("Carrier Pigeon"));
    assert!(valid_status("Converted"));
    assert!(!valid_status("Archived"));
  }

  // ── Whole-draft validation ────────────────────────────────────────────────

  #[test]
  fn valid_draft_normalizes() {
    let new_lead = draft().validate().unwrap();
    assert_eq!(new_lead.name, "Ada Lovelace");
    assert_eq!(new_lead.email, "ada@example.com");
    assert_eq!(new_lead.phone, "1234567890");
    assert_eq!(new_lead.company.as_deref(), Some("Analytical Engines Ltd"));
    assert_eq!(new_lead.source, LeadSource::Referral);
  }

  #[test]
  fn missing_source_defaults_to_website() {
    let mut d = draft();
    d.source = None;
    assert_eq!(d.validate().unwrap().source, LeadSource::Website);
  }

  #[test]
  fn whitespace_optionals_collapse_to_none() {
    let mut d = draft();
    d.company = Some("   ".into());
    d.message = Some("".into());
    let new_lead = d.validate().unwrap();
    assert!(new_lead.company.is_none());
    assert!(new_lead.message.is_none());
  }

  #[test]
  fn each_failing_field_gets_one_error() {
    let d = LeadDraft {
      name:    "A".into(),
      email:   "nope".into(),
      phone:   "12345".into(),
      company: None,
      message: None,
      source:  Some("Billboard".into()),
    };
    let errors = d.validate().unwrap_err();
    let fields: Vec<&str> =
      errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["name", "email", "phone", "source"]);
  }

  #[test]
  fn empty_required_fields_report_required_messages() {
    let errors = LeadDraft::default().validate().unwrap_err();
    assert!(
      errors
        .iter()
        .any(|e| e.field == "name" && e.message == "Name is required")
    );
    assert!(
      errors
        .iter()
        .any(|e| e.field == "phone"
          && e.message == "Phone number is required")
    );
  }

  #[test]
  fn no_store_input_is_produced_on_failure() {
    let mut d = draft();
    d.email = "bad".into();
    assert!(d.validate().is_err());
  }
}
