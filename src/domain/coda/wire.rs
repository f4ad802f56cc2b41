//! Wire types for the Coda REST API (camelCase JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic paged list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocResponse {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub owner_name: Option<String>,
    pub browser_link: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    pub id: String,
    pub name: String,
    pub table_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowResponse {
    pub id: String,
    pub name: Option<String>,
    pub index: Option<u64>,
    #[serde(default)]
    pub values: serde_json::Map<String, Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ─── Mutation payloads ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CellEdit {
    pub column: String,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowEdit {
    pub cells: Vec<CellEdit>,
}

impl RowEdit {
    /// Build the cell list from a column→value mapping.
    pub fn from_values(values: serde_json::Map<String, Value>) -> Self {
        Self {
            cells: values
                .into_iter()
                .map(|(column, value)| CellEdit { column, value })
                .collect(),
        }
    }
}

/// Body of `POST /docs/{docId}/tables/{tableIdOrName}/rows`.
#[derive(Debug, Clone, Serialize)]
pub struct RowsInsertRequest {
    pub rows: Vec<RowEdit>,
}

/// Body of `PUT /docs/{docId}/tables/{tableIdOrName}/rows/{rowIdOrName}`.
#[derive(Debug, Clone, Serialize)]
pub struct RowUpdateRequest {
    pub row: RowEdit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsInsertResponse {
    pub request_id: String,
    #[serde(default)]
    pub added_row_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowUpdateResponse {
    pub request_id: String,
    pub id: String,
}
