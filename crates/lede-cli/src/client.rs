//! Async HTTP client wrapping the Lede JSON API — the client-side service
//! the UI drives.
//!
//! One method per API operation. Each decodes the response envelope and
//! either returns the inner payload or fails with the server-provided
//! message.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use lede_core::{
  envelope::{Envelope, Pagination},
  lead::{Lead, LeadStatus},
  validate::LeadDraft,
};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Connection settings for the Lede API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the Lede JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

#[derive(Serialize)]
struct StatusBody<'a> {
  status: &'a str,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Decode an envelope, failing with the server-provided message when the
  /// response is not a success. An undecodable non-2xx body degrades to a
  /// status-code message.
  async fn unwrap_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
  ) -> Result<Envelope<T>> {
    let status = resp.status();
    match resp.json::<Envelope<T>>().await {
      Ok(env) if env.success => Ok(env),
      Ok(env) => Err(anyhow!(
        env
          .message
          .unwrap_or_else(|| format!("{what} → {status}"))
      )),
      Err(_) if !status.is_success() => Err(anyhow!("{what} → {status}")),
      Err(e) => {
        Err(e).with_context(|| format!("deserialising {what} response"))
      }
    }
  }

  /// `POST /api/leads`
  pub async fn create_lead(&self, draft: &LeadDraft) -> Result<Lead> {
    let resp = self
      .client
      .post(self.url("/leads"))
      .json(draft)
      .send()
      .await
      .context("POST /leads failed")?;

    let env = Self::unwrap_envelope::<Lead>(resp, "POST /leads").await?;
    env.data.ok_or_else(|| anyhow!("create response carried no lead"))
  }

  /// `GET /api/leads?page=&limit=[&status=]`
  pub async fn list_leads(
    &self,
    page: u32,
    limit: u32,
    status: Option<LeadStatus>,
  ) -> Result<(Vec<Lead>, Pagination)> {
    let mut req = self.client.get(self.url("/leads")).query(&[
      ("page", page.to_string()),
      ("limit", limit.to_string()),
    ]);
    if let Some(status) = status {
      req = req.query(&[("status", status.as_str())]);
    }

    let resp = req.send().await.context("GET /leads failed")?;
    let env = Self::unwrap_envelope::<Vec<Lead>>(resp, "GET /leads").await?;

    let pagination = env
      .pagination
      .unwrap_or(Pagination { total: 0, page, pages: 0 });
    Ok((env.data.unwrap_or_default(), pagination))
  }

  /// `GET /api/leads/:id`
  pub async fn get_lead(&self, id: Uuid) -> Result<Lead> {
    let resp = self
      .client
      .get(self.url(&format!("/leads/{id}")))
      .send()
      .await
      .context("GET /leads/:id failed")?;

    let env = Self::unwrap_envelope::<Lead>(resp, "GET /leads/:id").await?;
    env.data.ok_or_else(|| anyhow!("get response carried no lead"))
  }

  /// `PATCH /api/leads/:id/status`
  pub async fn update_status(
    &self,
    id: Uuid,
    status: LeadStatus,
  ) -> Result<Lead> {
    let resp = self
      .client
      .patch(self.url(&format!("/leads/{id}/status")))
      .json(&StatusBody { status: status.as_str() })
      .send()
      .await
      .context("PATCH /leads/:id/status failed")?;

    let env =
      Self::unwrap_envelope::<Lead>(resp, "PATCH /leads/:id/status").await?;
    env
      .data
      .ok_or_else(|| anyhow!("update response carried no lead"))
  }

  /// `DELETE /api/leads/:id`
  pub async fn delete_lead(&self, id: Uuid) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/leads/{id}")))
      .send()
      .await
      .context("DELETE /leads/:id failed")?;

    Self::unwrap_envelope::<Lead>(resp, "DELETE /leads/:id").await?;
    Ok(())
  }
}
