//! [`SupabaseStore`] — the PostgREST implementation of [`DataStore`].

use std::time::Duration;

use kt_core::store::{DataStore, Table};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ─── Config ──────────────────────────────────────────────────────────────────

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
  /// Project URL, e.g. `https://abcd.supabase.co`.
  pub url:              String,
  /// Service-role key; sent as both `apikey` and bearer token.
  pub service_role_key: String,
  pub timeout:          Duration,
}

impl SupabaseConfig {
  pub fn new(url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
    Self {
      url:              url.into(),
      service_role_key: service_role_key.into(),
      timeout:          DEFAULT_TIMEOUT,
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A match-log store backed by a Supabase project's REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SupabaseStore {
  client:   Client,
  rest_url: Url,
  key:      String,
}

impl SupabaseStore {
  pub fn new(config: SupabaseConfig) -> Result<Self> {
    let base = config.url.trim_end_matches('/');
    let rest_url =
      Url::parse(&format!("{base}/rest/v1/")).map_err(|e| Error::InvalidUrl {
        url:    config.url.clone(),
        reason: e.to_string(),
      })?;
    if !matches!(rest_url.scheme(), "http" | "https") {
      return Err(Error::InvalidUrl {
        url:    config.url,
        reason: format!("unsupported scheme {:?}", rest_url.scheme()),
      });
    }

    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self {
      client,
      rest_url,
      key: config.service_role_key,
    })
  }

  fn url(&self, table: Table) -> Result<Url> {
    self.rest_url.join(table.as_str()).map_err(|e| Error::InvalidUrl {
      url:    self.rest_url.to_string(),
      reason: e.to_string(),
    })
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    req
      .header("apikey", &self.key)
      .bearer_auth(&self.key)
  }

  /// Turn a response into decoded rows, mapping non-2xx statuses to
  /// [`Error::Status`] with the PostgREST message attached.
  async fn rows<T: DeserializeOwned>(
    table: Table,
    resp: Response,
  ) -> Result<Vec<T>> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
      return Err(Error::Status { table, status, body });
    }
    serde_json::from_str(&body).map_err(|source| Error::Decode { table, source })
  }
}

// ─── DataStore impl ──────────────────────────────────────────────────────────

impl DataStore for SupabaseStore {
  type Error = Error;

  async fn select_all<T>(&self, table: Table) -> Result<Vec<T>>
  where
    T: DeserializeOwned + Send + 'static,
  {
    tracing::debug!(%table, "select all");
    let resp = self
      .auth(self.client.get(self.url(table)?))
      .query(&[("select", "*")])
      .send()
      .await?;
    Self::rows(table, resp).await
  }

  async fn select_where<'a, T>(
    &'a self,
    table: Table,
    column: &'a str,
    value: &'a str,
  ) -> Result<Vec<T>>
  where
    T: DeserializeOwned + Send + 'static,
  {
    tracing::debug!(%table, column, value, "select where");
    let filter = format!("eq.{value}");
    let resp = self
      .auth(self.client.get(self.url(table)?))
      .query(&[("select", "*"), (column, filter.as_str())])
      .send()
      .await?;
    Self::rows(table, resp).await
  }

  async fn insert<'a, R, T>(&'a self, table: Table, row: &'a R) -> Result<T>
  where
    R: Serialize + Sync + ?Sized + 'a,
    T: DeserializeOwned + Send + 'static,
  {
    tracing::debug!(%table, "insert");
    let resp = self
      .auth(self.client.post(self.url(table)?))
      .header("Prefer", "return=representation")
      .json(row)
      .send()
      .await?;

    Self::rows(table, resp)
      .await?
      .into_iter()
      .next()
      .ok_or(Error::EmptyInsertResponse(table))
  }
}
