//! The remote table boundary and the row shape it speaks.
//!
//! Remote tables are owned by a backend-as-a-service; this crate only
//! selects rows by owner and upserts rows by item id. Each row carries the
//! scalar columns the backend indexes on (owner, item id, timestamps) plus
//! the full record serialized as an opaque JSON blob, so the remote schema
//! never needs to change when a record kind grows a field.

use async_trait::async_trait;
use keepsake_engine::{Syncable, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a remote table client can report.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not authorized")]
    Unauthorized,

    #[error("remote backend error: {0}")]
    Backend(String),
}

/// One row in a remote table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRow {
    /// Owning user, the select filter column
    pub owner_id: String,
    /// Record id, the upsert key within an owner
    pub item_id: String,
    /// The full record, serialized
    pub payload: serde_json::Value,
    /// Mirrors the record's `updated_at` for remote-side queries
    pub updated_at: Timestamp,
    /// Mirrors the record's `created_at`
    pub created_at: Timestamp,
}

/// Select-by-owner / upsert-many access to named remote tables.
#[async_trait]
pub trait RemoteTable: Send + Sync {
    /// All rows in `table` whose `owner_field` column equals `value`.
    async fn select_where(
        &self,
        table: &str,
        owner_field: &str,
        value: &str,
    ) -> Result<Vec<RemoteRow>, RemoteError>;

    /// Insert-or-replace `rows` in `table`, keyed by owner and item id.
    async fn upsert_many(&self, table: &str, rows: Vec<RemoteRow>) -> Result<(), RemoteError>;
}

/// Serialize a record into its remote row.
pub fn to_row<S>(owner_id: &str, record: &S) -> Result<RemoteRow, serde_json::Error>
where
    S: Syncable + Serialize,
{
    let payload = serde_json::to_value(record)?;
    // The indexed created_at column is read out of the serialized payload so
    // `Syncable` stays the two-method capability the merge needs.
    let created_at = payload
        .get("createdAt")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);

    Ok(RemoteRow {
        owner_id: owner_id.to_string(),
        item_id: record.record_id().clone(),
        payload,
        updated_at: record.updated_at(),
        created_at,
    })
}

/// Decode a remote row back into a typed record.
pub fn from_row<S: DeserializeOwned>(row: RemoteRow) -> Result<S, serde_json::Error> {
    serde_json::from_value(row.payload)
}
