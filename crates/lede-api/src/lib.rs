//! JSON REST API for Lede.
//!
//! Exposes an axum [`Router`] backed by any [`lede_core::store::LeadStore`].
//! Every response — success or failure — is the uniform envelope
//! `{success, data?, message?, errors?, pagination?}`. TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lede_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod leads;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, patch},
};
use lede_core::store::LeadStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `LEDE_*` environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 4000 }

fn default_store_path() -> PathBuf { PathBuf::from("lede.db") }

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: LeadStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/leads", get(leads::list::<S>).post(leads::create::<S>))
    .route(
      "/leads/{id}",
      get(leads::get_one::<S>).delete(leads::delete_one::<S>),
    )
    .route("/leads/{id}/status", patch(leads::update_status::<S>))
    .with_state(store)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
  };
  use lede_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::api_router;

  async fn make_router() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  /// Fire one request at the router and decode the JSON body (Null when
  /// the body is empty).
  async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn draft(email: &str) -> Value {
    json!({
      "name": "Ada Lovelace",
      "email": email,
      "phone": "(123) 456-7890",
      "company": "Analytical Engines Ltd",
      "message": "Interested in a demo.",
      "source": "Referral",
    })
  }

  async fn create(router: &Router, email: &str) -> Value {
    let (status, body) =
      request(router, "POST", "/leads", Some(draft(email))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
  }

  async fn list_total(router: &Router) -> u64 {
    let (_, body) = request(router, "GET", "/leads", None).await;
    body["pagination"]["total"].as_u64().unwrap()
  }

  // ── Create ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_valid_returns_201_with_normalized_record() {
    let router = make_router().await;
    let body = create(&router, "Ada@Example.com").await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Lead created successfully"));

    let data = &body["data"];
    assert!(data["leadId"].as_str().is_some());
    assert!(data["createdAt"].as_str().is_some());
    assert_eq!(data["status"], json!("New"));
    // Email is lowercased, phone reduced to its ten digits.
    assert_eq!(data["email"], json!("ada@example.com"));
    assert_eq!(data["phone"], json!("1234567890"));
    assert_eq!(data["source"], json!("Referral"));
  }

  #[tokio::test]
  async fn create_invalid_fields_returns_400_and_no_mutation() {
    let router = make_router().await;

    let bad = json!({
      "name": "A",
      "email": "nope",
      "phone": "12345",
    });
    let (status, body) = request(&router, "POST", "/leads", Some(bad)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let fields: Vec<&str> = body["errors"]
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["field"].as_str().unwrap())
      .collect();
    assert_eq!(fields, ["name", "email", "phone"]);

    assert_eq!(list_total(&router).await, 0);
  }

  #[tokio::test]
  async fn create_duplicate_email_returns_409_and_count_unchanged() {
    let router = make_router().await;
    create(&router, "ada@example.com").await;

    // A case-differing duplicate still conflicts.
    let (status, body) =
      request(&router, "POST", "/leads", Some(draft("ADA@example.com"))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
      body["message"],
      json!("A lead with this email already exists")
    );
    assert_eq!(list_total(&router).await, 1);
  }

  // ── List ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_reports_ceiling_page_count() {
    let router = make_router().await;
    for i in 0..25 {
      create(&router, &format!("lead{i}@example.com")).await;
    }

    let (status, body) =
      request(&router, "GET", "/leads?limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(
      body["pagination"],
      json!({ "total": 25, "page": 1, "pages": 3 })
    );
  }

  #[tokio::test]
  async fn list_past_the_end_is_empty_with_pagination_intact() {
    let router = make_router().await;
    for i in 0..25 {
      create(&router, &format!("lead{i}@example.com")).await;
    }

    let (status, body) =
      request(&router, "GET", "/leads?page=4&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(
      body["pagination"],
      json!({ "total": 25, "page": 4, "pages": 3 })
    );
  }

  #[tokio::test]
  async fn list_filters_by_status() {
    let router = make_router().await;
    let created = create(&router, "ada@example.com").await;
    create(&router, "grace@example.com").await;

    let id = created["data"]["leadId"].as_str().unwrap().to_owned();
    request(
      &router,
      "PATCH",
      &format!("/leads/{id}/status"),
      Some(json!({ "status": "Qualified" })),
    )
    .await;

    let (_, body) =
      request(&router, "GET", "/leads?status=Qualified", None).await;
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["data"][0]["leadId"].as_str().unwrap(), id);
  }

  #[tokio::test]
  async fn list_rejects_unknown_status_filter() {
    let router = make_router().await;
    let (status, body) =
      request(&router, "GET", "/leads?status=Archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
  }

  #[tokio::test]
  async fn list_sorts_by_wire_sort_key() {
    let router = make_router().await;
    for email in ["c@example.com", "a@example.com", "b@example.com"] {
      create(&router, email).await;
    }

    let (_, body) =
      request(&router, "GET", "/leads?sortBy=email", None).await;
    let emails: Vec<&str> = body["data"]
      .as_array()
      .unwrap()
      .iter()
      .map(|l| l["email"].as_str().unwrap())
      .collect();
    assert_eq!(emails, ["a@example.com", "b@example.com", "c@example.com"]);
  }

  // ── Get one ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_by_id_round_trips_submitted_fields() {
    let router = make_router().await;
    let created = create(&router, "ada@example.com").await;
    let id = created["data"]["leadId"].as_str().unwrap();

    let (status, body) =
      request(&router, "GET", &format!("/leads/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["name"], json!("Ada Lovelace"));
    assert_eq!(data["email"], json!("ada@example.com"));
    assert_eq!(data["phone"], json!("1234567890"));
    assert_eq!(data["company"], json!("Analytical Engines Ltd"));
    assert_eq!(data["message"], json!("Interested in a demo."));
    assert_eq!(data["source"], json!("Referral"));
    // Server-assigned fields survive the round trip.
    assert_eq!(data["leadId"], created["data"]["leadId"]);
    assert_eq!(data["createdAt"], created["data"]["createdAt"]);
    assert_eq!(data["status"], json!("New"));
  }

  #[tokio::test]
  async fn get_unknown_id_returns_404() {
    let router = make_router().await;
    let (status, body) = request(
      &router,
      "GET",
      "/leads/00000000-0000-0000-0000-000000000000",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Lead not found"));
  }

  // ── Update status ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_status_returns_updated_record() {
    let router = make_router().await;
    let created = create(&router, "ada@example.com").await;
    let id = created["data"]["leadId"].as_str().unwrap();

    let (status, body) = request(
      &router,
      "PATCH",
      &format!("/leads/{id}/status"),
      Some(json!({ "status": "Contacted" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Lead status updated successfully"));
    assert_eq!(body["data"]["status"], json!("Contacted"));
  }

  #[tokio::test]
  async fn update_status_rejects_values_outside_the_enum() {
    let router = make_router().await;
    let created = create(&router, "ada@example.com").await;
    let id = created["data"]["leadId"].as_str().unwrap();

    let (status, body) = request(
      &router,
      "PATCH",
      &format!("/leads/{id}/status"),
      Some(json!({ "status": "Archived" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], json!("status"));

    // Rejected before any store mutation.
    let (_, fetched) =
      request(&router, "GET", &format!("/leads/{id}"), None).await;
    assert_eq!(fetched["data"]["status"], json!("New"));
  }

  #[tokio::test]
  async fn update_status_unknown_id_returns_404() {
    let router = make_router().await;
    let (status, _) = request(
      &router,
      "PATCH",
      "/leads/00000000-0000-0000-0000-000000000000/status",
      Some(json!({ "status": "Lost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Delete ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_confirms_without_data_then_get_returns_404() {
    let router = make_router().await;
    let created = create(&router, "ada@example.com").await;
    let id = created["data"]["leadId"].as_str().unwrap();

    let (status, body) =
      request(&router, "DELETE", &format!("/leads/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Lead deleted successfully"));
    assert!(body.get("data").is_none());

    let (status, _) =
      request(&router, "GET", &format!("/leads/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_unknown_id_returns_404() {
    let router = make_router().await;
    let (status, _) = request(
      &router,
      "DELETE",
      "/leads/00000000-0000-0000-0000-000000000000",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
