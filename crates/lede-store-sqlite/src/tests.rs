//! Integration tests for `SqliteStore` against an in-memory database.

use lede_core::{
  lead::{LeadSource, LeadStatus, NewLead},
  store::{LeadQuery, LeadStore, SortKey},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn new_lead(email: &str) -> NewLead {
  NewLead {
    name:    "Ada Lovelace".into(),
    email:   email.into(),
    phone:   "1234567890".into(),
    company: None,
    message: None,
    source:  LeadSource::Website,
  }
}

async fn total(s: &SqliteStore) -> u64 {
  s.list_leads(&LeadQuery::default()).await.unwrap().total
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_timestamp_and_default_status() {
  let s = store().await;

  let lead = s.create_lead(new_lead("ada@example.com")).await.unwrap();
  assert_eq!(lead.status, LeadStatus::New);
  assert_eq!(lead.email, "ada@example.com");

  let fetched = s.get_lead(lead.lead_id).await.unwrap().unwrap();
  assert_eq!(fetched.lead_id, lead.lead_id);
  assert_eq!(fetched.created_at, lead.created_at);
}

#[tokio::test]
async fn create_and_get_round_trips_all_fields() {
  let s = store().await;

  let mut input = new_lead("ada@example.com");
  input.company = Some("Analytical Engines Ltd".into());
  input.message = Some("Interested in a demo.".into());
  input.source = LeadSource::Referral;

  let lead = s.create_lead(input).await.unwrap();
  let fetched = s.get_lead(lead.lead_id).await.unwrap().unwrap();

  assert_eq!(fetched.name, "Ada Lovelace");
  assert_eq!(fetched.phone, "1234567890");
  assert_eq!(fetched.company.as_deref(), Some("Analytical Engines Ltd"));
  assert_eq!(fetched.message.as_deref(), Some("Interested in a demo."));
  assert_eq!(fetched.source, LeadSource::Referral);
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_count_unchanged() {
  let s = store().await;
  s.create_lead(new_lead("ada@example.com")).await.unwrap();
  assert_eq!(total(&s).await, 1);

  let err = s.create_lead(new_lead("ada@example.com")).await.unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateEmail(_)));
  assert_eq!(total(&s).await, 1);
}

#[tokio::test]
async fn find_by_email_matches_stored_email() {
  let s = store().await;
  let lead = s.create_lead(new_lead("ada@example.com")).await.unwrap();

  let found = s.find_by_email("ada@example.com").await.unwrap().unwrap();
  assert_eq!(found.lead_id, lead.lead_id);

  assert!(s.find_by_email("none@example.com").await.unwrap().is_none());
}

// ─── Get ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_lead(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── List ────────────────────────────────────────────────────────────────────

async fn seed(s: &SqliteStore, n: usize) {
  for i in 0..n {
    s.create_lead(new_lead(&format!("lead{i}@example.com")))
      .await
      .unwrap();
  }
}

#[tokio::test]
async fn list_defaults_to_newest_first() {
  let s = store().await;
  seed(&s, 3).await;

  let page = s.list_leads(&LeadQuery::default()).await.unwrap();
  assert_eq!(page.total, 3);
  assert_eq!(page.leads[0].email, "lead2@example.com");
  assert_eq!(page.leads[2].email, "lead0@example.com");
}

#[tokio::test]
async fn list_pages_and_reports_total_across_pages() {
  let s = store().await;
  seed(&s, 25).await;

  let q = LeadQuery { page: 3, ..Default::default() };
  let page = s.list_leads(&q).await.unwrap();
  assert_eq!(page.total, 25);
  assert_eq!(page.leads.len(), 5);
}

#[tokio::test]
async fn list_past_the_end_is_empty_with_total_intact() {
  let s = store().await;
  seed(&s, 25).await;

  let q = LeadQuery { page: 4, ..Default::default() };
  let page = s.list_leads(&q).await.unwrap();
  assert!(page.leads.is_empty());
  assert_eq!(page.total, 25);
}

#[tokio::test]
async fn list_filters_by_status() {
  let s = store().await;
  seed(&s, 3).await;

  let qualified = s
    .list_leads(&LeadQuery::default())
    .await
    .unwrap()
    .leads[0]
    .lead_id;
  s.update_status(qualified, LeadStatus::Qualified)
    .await
    .unwrap();

  let q = LeadQuery { status: Some(LeadStatus::Qualified), ..Default::default() };
  let page = s.list_leads(&q).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.leads[0].lead_id, qualified);

  let q = LeadQuery { status: Some(LeadStatus::New), ..Default::default() };
  assert_eq!(s.list_leads(&q).await.unwrap().total, 2);
}

#[tokio::test]
async fn list_sorts_by_name_ascending() {
  let s = store().await;
  for (name, email) in [
    ("charlie", "c@example.com"),
    ("alpha", "a@example.com"),
    ("bravo", "b@example.com"),
  ] {
    let mut input = new_lead(email);
    input.name = name.into();
    s.create_lead(input).await.unwrap();
  }

  let q = LeadQuery { sort: SortKey::NameAsc, ..Default::default() };
  let names: Vec<_> = s
    .list_leads(&q)
    .await
    .unwrap()
    .leads
    .into_iter()
    .map(|l| l.name)
    .collect();
  assert_eq!(names, ["alpha", "bravo", "charlie"]);
}

// ─── Status update ───────────────────────────────────────────────────────────

#[tokio::test]
async fn update_status_changes_only_the_status() {
  let s = store().await;
  let lead = s.create_lead(new_lead("ada@example.com")).await.unwrap();

  let updated = s
    .update_status(lead.lead_id, LeadStatus::Contacted)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.status, LeadStatus::Contacted);
  assert_eq!(updated.name, lead.name);
  assert_eq!(updated.email, lead.email);
  assert_eq!(updated.created_at, lead.created_at);
}

#[tokio::test]
async fn update_status_unknown_id_returns_none_and_mutates_nothing() {
  let s = store().await;
  s.create_lead(new_lead("ada@example.com")).await.unwrap();

  let result = s
    .update_status(Uuid::new_v4(), LeadStatus::Lost)
    .await
    .unwrap();
  assert!(result.is_none());

  let page = s.list_leads(&LeadQuery::default()).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.leads[0].status, LeadStatus::New);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_the_row() {
  let s = store().await;
  let lead = s.create_lead(new_lead("ada@example.com")).await.unwrap();

  assert!(s.delete_lead(lead.lead_id).await.unwrap());
  assert!(s.get_lead(lead.lead_id).await.unwrap().is_none());
  assert_eq!(total(&s).await, 0);
}

#[tokio::test]
async fn delete_unknown_returns_false() {
  let s = store().await;
  assert!(!s.delete_lead(Uuid::new_v4()).await.unwrap());
}
