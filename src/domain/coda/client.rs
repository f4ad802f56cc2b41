//! Coda client — documents, tables, and rows.

use std::time::Duration;

use serde_json::Value;

use crate::auth::{plausible_token, CredentialSource, Service};
use crate::domain::coda::wire::{
    DocResponse, ListResponse, RowEdit, RowResponse, RowUpdateRequest, RowUpdateResponse,
    RowsInsertRequest, RowsInsertResponse, TableResponse,
};
use crate::domain::coda::{Doc, Row, RowInsertReceipt, RowUpdateReceipt, Table};
use crate::domain::require_id;
use crate::error::{AuthError, SdkError};
use crate::http::{
    ApiRequest, HttpTransport, Method, RequestExecutor, RetryConfig, Sleep, TimerSleep, Transport,
    DEFAULT_TIMEOUT,
};
use crate::network::CODA_API_URL;

/// Client for the Coda document/database API.
///
/// Construct with [`CodaClient::from_env`] (credential from `CODA_API_TOKEN`)
/// or [`CodaClient::builder`] for explicit overrides.
pub struct CodaClient<T = HttpTransport, S = TimerSleep> {
    http: RequestExecutor<T, S>,
    base_url: String,
}

impl CodaClient {
    /// Build with defaults, resolving the token from the environment.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::builder().build()
    }

    pub fn builder() -> CodaClientBuilder {
        CodaClientBuilder::default()
    }
}

impl<T: Transport, S: Sleep> CodaClient<T, S> {
    /// Build around a custom executor (custom transport, test fakes).
    pub fn with_executor(http: RequestExecutor<T, S>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// List documents accessible to the authenticated user.
    pub async fn list_docs(&self, limit: Option<u32>) -> Result<Vec<Doc>, SdkError> {
        let mut url = format!("{}/docs", self.base_url);
        if let Some(limit) = limit {
            url = format!("{}?limit={}", url, limit);
        }
        let resp: ListResponse<DocResponse> =
            self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.items.into_iter().map(Doc::from).collect())
    }

    /// Get one document by id.
    pub async fn get_doc(&self, doc_id: &str) -> Result<Doc, SdkError> {
        require_id(doc_id, "document id")?;
        let url = format!("{}/docs/{}", self.base_url, doc_id);
        let resp: DocResponse = self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.into())
    }

    /// List tables (and views) in a document.
    pub async fn list_tables(&self, doc_id: &str) -> Result<Vec<Table>, SdkError> {
        require_id(doc_id, "document id")?;
        let url = format!("{}/docs/{}/tables", self.base_url, doc_id);
        let resp: ListResponse<TableResponse> =
            self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.items.into_iter().map(Table::from).collect())
    }

    /// List rows of a table.
    pub async fn list_rows(
        &self,
        doc_id: &str,
        table_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Row>, SdkError> {
        require_id(doc_id, "document id")?;
        require_id(table_id, "table id")?;
        let mut url = format!("{}/docs/{}/tables/{}/rows", self.base_url, doc_id, table_id);
        if let Some(limit) = limit {
            url = format!("{}?limit={}", url, limit);
        }
        let resp: ListResponse<RowResponse> =
            self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.items.into_iter().map(Row::from).collect())
    }

    /// Insert one row. `values` maps column id or name to cell value.
    ///
    /// Coda applies mutations asynchronously; the receipt carries the ids the
    /// row will have once processed.
    pub async fn insert_row(
        &self,
        doc_id: &str,
        table_id: &str,
        values: serde_json::Map<String, Value>,
    ) -> Result<RowInsertReceipt, SdkError> {
        require_id(doc_id, "document id")?;
        require_id(table_id, "table id")?;
        let url = format!("{}/docs/{}/tables/{}/rows", self.base_url, doc_id, table_id);
        let body = RowsInsertRequest {
            rows: vec![RowEdit::from_values(values)],
        };
        let resp: RowsInsertResponse = self
            .http
            .execute(ApiRequest::new(Method::Post, url).json(serde_json::to_value(&body)?))
            .await?;
        Ok(resp.into())
    }

    /// Update an existing row. `values` maps column id or name to cell value.
    pub async fn update_row(
        &self,
        doc_id: &str,
        table_id: &str,
        row_id: &str,
        values: serde_json::Map<String, Value>,
    ) -> Result<RowUpdateReceipt, SdkError> {
        require_id(doc_id, "document id")?;
        require_id(table_id, "table id")?;
        require_id(row_id, "row id")?;
        let url = format!(
            "{}/docs/{}/tables/{}/rows/{}",
            self.base_url, doc_id, table_id, row_id
        );
        let body = RowUpdateRequest {
            row: RowEdit::from_values(values),
        };
        let resp: RowUpdateResponse = self
            .http
            .execute(ApiRequest::new(Method::Put, url).json(serde_json::to_value(&body)?))
            .await?;
        Ok(resp.into())
    }

    /// Cheap connectivity check: one minimal list call.
    pub async fn ping(&self) -> bool {
        self.list_docs(Some(1)).await.is_ok()
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

pub struct CodaClientBuilder {
    token: Option<String>,
    base_url: String,
    source: CredentialSource,
    retry: RetryConfig,
    timeout: Duration,
}

impl Default for CodaClientBuilder {
    fn default() -> Self {
        Self {
            token: None,
            base_url: CODA_API_URL.to_string(),
            source: CredentialSource::from_env(),
            retry: RetryConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CodaClientBuilder {
    /// Explicit token; takes precedence over `CODA_API_TOKEN`.
    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Credential lookup used when no explicit token is set.
    pub fn credentials(mut self, source: CredentialSource) -> Self {
        self.source = source;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<CodaClient, SdkError> {
        let credential = self.source.resolve(Service::Coda, self.token.as_deref())?;
        if !plausible_token(Service::Coda, credential.expose()) {
            return Err(AuthError::MalformedToken {
                service: Service::Coda,
            }
            .into());
        }
        let http = RequestExecutor::new(
            HttpTransport::new(self.timeout),
            TimerSleep,
            Service::Coda.scheme(),
            credential,
            self.retry,
        )
        .with_default_headers([("Accept", "application/json")]);
        Ok(CodaClient::with_executor(http, &self.base_url))
    }
}
