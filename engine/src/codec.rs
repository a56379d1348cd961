//! The stored blob shape for on-device collections.
//!
//! The record store persists one opaque JSON value per (kind, user) slot.
//! The engine owns that shape so both sides of the app agree on it: a plain
//! JSON array of records. Decode failures are typed; the sync layer decides
//! what to do with them (it degrades to an empty collection).

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a collection into the JSON value handed to the record store.
pub fn encode_collection<S: Serialize>(records: &[S]) -> Result<serde_json::Value> {
    serde_json::to_value(records).map_err(|e| Error::Encode(e.to_string()))
}

/// Decode a stored JSON value back into typed records.
///
/// The whole blob is decoded or none of it: a single corrupt element means
/// the slot is unreadable, which callers treat as an empty collection.
pub fn decode_collection<S: DeserializeOwned>(value: serde_json::Value) -> Result<Vec<S>> {
    serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
}
