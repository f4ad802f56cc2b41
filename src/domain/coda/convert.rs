//! Conversions from wire types to domain types for Coda.

use super::wire::{DocResponse, RowResponse, RowUpdateResponse, RowsInsertResponse, TableResponse};
use super::{Doc, Row, RowInsertReceipt, RowUpdateReceipt, Table};

impl From<DocResponse> for Doc {
    fn from(d: DocResponse) -> Self {
        Self {
            id: d.id,
            name: d.name,
            owner: d.owner,
            owner_name: d.owner_name,
            browser_link: d.browser_link,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

impl From<TableResponse> for Table {
    fn from(t: TableResponse) -> Self {
        Self {
            id: t.id,
            name: t.name,
            table_type: t.table_type,
        }
    }
}

impl From<RowResponse> for Row {
    fn from(r: RowResponse) -> Self {
        Self {
            id: r.id,
            name: r.name,
            index: r.index,
            values: r.values,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<RowsInsertResponse> for RowInsertReceipt {
    fn from(r: RowsInsertResponse) -> Self {
        Self {
            request_id: r.request_id,
            added_row_ids: r.added_row_ids,
        }
    }
}

impl From<RowUpdateResponse> for RowUpdateReceipt {
    fn from(r: RowUpdateResponse) -> Self {
        Self {
            request_id: r.request_id,
            row_id: r.id,
        }
    }
}
