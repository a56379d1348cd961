//! Error types for the Keepsake engine.

use crate::RecordId;
use thiserror::Error;

/// All possible errors from the Keepsake engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A stored collection blob could not be decoded into typed records.
    #[error("undecodable collection blob: {0}")]
    Decode(String),

    /// A collection could not be serialized into a storable blob.
    #[error("unencodable collection: {0}")]
    Encode(String),

    /// Two records in the same collection share an id.
    #[error("duplicate record id: {0}")]
    DuplicateId(RecordId),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
