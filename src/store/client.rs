//! Store Client
//!
//! The only integration point with the remote SQL-execution service.
//! Sends one statement per call over HTTP, enforces the configured timeout,
//! and maps every transport outcome to a `StoreError` or a `SqlResponse`.
//!
//! Out of scope here: SQL construction, business logic, retries and
//! transactions. Each statement is assumed atomic on the store side.

use std::time::Duration;

use reqwest::StatusCode;

use super::error::StoreError;
use super::schema::{ExecuteRequest, SqlQuery, SqlResponse};

/// Connection settings for the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base URL, e.g. `http://localhost:4000`
    pub base_url: String,

    /// Upper bound for a whole call (connect, send and read)
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

/// Thin HTTP client for the remote store.
///
/// Cheap to clone; clones share the underlying connection pool. Concurrent
/// calls are independent and each is bounded by its own timeout.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    execute_url: String,
    timeout: Duration,
}

impl StoreClient {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(StoreError::Client)?;

        let execute_url = format!("{}/execute", config.base_url.trim_end_matches('/'));

        Ok(Self {
            http,
            execute_url,
            timeout: config.timeout,
        })
    }

    pub fn execute_url(&self) -> &str {
        &self.execute_url
    }

    /// Execute a statement against the store.
    ///
    /// Logs exactly one event per call. The statement is identified only by
    /// its fingerprint.
    ///
    /// # Errors
    /// - `StoreError::Timeout` if the call exceeds the configured timeout
    /// - `StoreError::Connection` if the request could not be delivered
    /// - `StoreError::Response` on a non-200 status or an undecodable body
    pub async fn execute(&self, query: &SqlQuery) -> Result<SqlResponse, StoreError> {
        let fingerprint = query.fingerprint();

        match self.send(query).await {
            Ok(response) => {
                tracing::info!(
                    statement = %fingerprint,
                    success = response.success,
                    "Store statement executed"
                );
                Ok(response)
            }
            Err(err) => {
                tracing::error!(
                    statement = %fingerprint,
                    kind = err.kind(),
                    status = ?err.status(),
                    "Store statement failed: {}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Connectivity probe: runs `SELECT 1` and returns the store's success flag
    pub async fn verify_connection(&self) -> Result<bool, StoreError> {
        let response = self.execute(&SqlQuery::new("SELECT 1")).await?;
        Ok(response.success)
    }

    async fn send(&self, query: &SqlQuery) -> Result<SqlResponse, StoreError> {
        let response = self
            .http
            .post(&self.execute_url)
            .json(&ExecuteRequest {
                sql: query.statement(),
            })
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StoreError::unexpected_status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        serde_json::from_slice(&body).map_err(|_| StoreError::malformed(status.as_u16()))
    }

    /// Timeouts win over connection failures: a connect timeout reports both.
    fn classify(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Timeout(self.timeout)
        } else {
            StoreError::Connection(err)
        }
    }
}
