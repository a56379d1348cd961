//! The on-device persistence boundary.
//!
//! The record store is an external collaborator (a key-value file or
//! database on the real device). It holds one opaque JSON blob per
//! (logical key, user id) slot, so per-user data stays isolated on a
//! shared device. Implementations may fail; the sync engine swallows those
//! failures and degrades to an empty collection.

use async_trait::async_trait;
use thiserror::Error;

/// Errors an on-device store implementation can report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Scoped key-value persistence for record collections.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the blob stored under `(key, user_id)`, or `None` if the slot
    /// has never been written.
    async fn load(&self, key: &str, user_id: &str)
        -> Result<Option<serde_json::Value>, StoreError>;

    /// Overwrite the blob stored under `(key, user_id)`.
    async fn save(
        &self,
        key: &str,
        user_id: &str,
        value: &serde_json::Value,
    ) -> Result<(), StoreError>;
}
