//! Handlers for `/leads` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST`   | `/leads` | Body: [`LeadDraft`]; 201 + created lead, 400 + field errors, 409 on duplicate email |
//! | `GET`    | `/leads` | `?page=&limit=&status=&sortBy=`; paginated envelope |
//! | `GET`    | `/leads/:id` | Single lead or 404 |
//! | `PATCH`  | `/leads/:id/status` | Body: `{"status":"..."}`; 400 on unknown value, 404 on unknown id |
//! | `DELETE` | `/leads/:id` | Confirmation envelope or 404 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use lede_core::{
  envelope::{Envelope, Pagination},
  lead::{Lead, LeadStatus},
  store::{LeadQuery, LeadStore},
  validate::{FieldError, LeadDraft},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /leads` — the draft is re-validated here even when a client
/// already did, and the email existence check runs before the insert. The
/// store's unique index still rejects a duplicate that races past the
/// check.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(draft): Json<LeadDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = draft.validate().map_err(ApiError::Validation)?;

  let existing = store
    .find_by_email(&input.email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if existing.is_some() {
    return Err(ApiError::DuplicateEmail);
  }

  let lead = store
    .create_lead(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((
    StatusCode::CREATED,
    Json(Envelope::data(lead).with_message("Lead created successfully")),
  ))
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// 1-based page number; defaults to 1.
  pub page:    Option<u32>,
  /// Page size; defaults to 10.
  pub limit:   Option<u32>,
  /// Restrict to a single status when provided.
  pub status:  Option<String>,
  /// Sort key, e.g. `-createdAt` (the default) or `name`. Unknown keys
  /// fall back to the default.
  #[serde(rename = "sortBy")]
  pub sort_by: Option<String>,
}

/// `GET /leads?page=&limit=&status=&sortBy=`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Envelope<Vec<Lead>>>, ApiError>
where
  S: LeadStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let status = params
    .status
    .as_deref()
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.parse::<LeadStatus>().map_err(|_| {
        ApiError::Validation(vec![FieldError::new("status", "Invalid status")])
      })
    })
    .transpose()?;

  let query = LeadQuery {
    status,
    page: params.page.unwrap_or(1).max(1),
    limit: params.limit.unwrap_or(10).max(1),
    sort: params
      .sort_by
      .as_deref()
      .and_then(|s| s.parse().ok())
      .unwrap_or_default(),
  };

  let page = store
    .list_leads(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let pagination = Pagination::new(page.total, query.page, query.limit);
  Ok(Json(Envelope::data(page.leads).with_pagination(pagination)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /leads/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Lead>>, ApiError>
where
  S: LeadStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let lead = store
    .get_lead(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Lead not found".to_owned()))?;
  Ok(Json(Envelope::data(lead)))
}

// ─── Update status ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  #[serde(default)]
  pub status: String,
}

/// `PATCH /leads/:id/status` — the new value is checked against the status
/// enum before any store call; only the status field is written.
pub async fn update_status<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<StatusBody>,
) -> Result<Json<Envelope<Lead>>, ApiError>
where
  S: LeadStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Ok(status) = body.status.parse::<LeadStatus>() else {
    return Err(ApiError::Validation(vec![FieldError::new(
      "status",
      "Invalid status",
    )]));
  };

  let lead = store
    .update_status(id, status)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Lead not found".to_owned()))?;

  Ok(Json(
    Envelope::data(lead).with_message("Lead status updated successfully"),
  ))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /leads/:id` — hard delete; the confirmation envelope carries no
/// data payload.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Lead>>, ApiError>
where
  S: LeadStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .delete_lead(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if !deleted {
    return Err(ApiError::NotFound("Lead not found".to_owned()));
  }
  Ok(Json(Envelope::message("Lead deleted successfully")))
}
