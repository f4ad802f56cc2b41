//! Coda domain — documents, tables, and rows.

pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use client::{CodaClient, CodaClientBuilder};

/// A Coda document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doc {
    pub id: String,
    pub name: String,
    /// Owner email.
    pub owner: String,
    pub owner_name: Option<String>,
    pub browser_link: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A table (or view) within a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub id: String,
    pub name: String,
    /// `"table"` or `"view"`.
    pub table_type: Option<String>,
}

/// A row within a table. Cell values are keyed by column id or name,
/// exactly as the API returns them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub id: String,
    pub name: Option<String>,
    pub index: Option<u64>,
    pub values: serde_json::Map<String, Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Receipt for a row insertion. Coda processes mutations asynchronously and
/// answers 202 with the ids it assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowInsertReceipt {
    pub request_id: String,
    pub added_row_ids: Vec<String>,
}

/// Receipt for a row update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowUpdateReceipt {
    pub request_id: String,
    pub row_id: String,
}
