//! # Keepsake Client
//!
//! The async sync layer of Keepsake, a memory-care companion app. It keeps a
//! user's tasks and diary entries consistent across devices by reconciling
//! the on-device record store with a remote table service, using the pure
//! merge from `keepsake-engine`.
//!
//! The center of the crate is [`SyncEngine`]:
//!
//! - [`SyncEngine::full_sync`] — load local, fetch remote (best effort),
//!   merge last-writer-wins, persist locally, replace the in-memory state,
//!   and arm a debounced push
//! - [`SyncEngine::schedule_push`] — trailing-edge debounce that coalesces
//!   bursts of edits into a single upload
//! - [`SyncEngine::push_now`] — upsert the current state to the remote
//!   tables, one batched call per record kind
//!
//! Nothing here returns an error to the caller: sync is a background concern
//! and every failure degrades to "proceed with the best data available",
//! with a structured log in its place. The storage and network boundaries
//! are the [`RecordStore`] and [`RemoteTable`] traits; the backing service
//! (a backend-as-a-service table API on the real app) is supplied by the
//! embedder.

pub mod clock;
pub mod config;
pub mod engine;
pub mod remote;
pub mod state;
pub mod store;

// Re-export main types at crate root
pub use clock::now_millis;
pub use config::{ConfigError, KindConfig, SyncConfig, OWNER_ID_FIELD};
pub use engine::SyncEngine;
pub use remote::{RemoteError, RemoteRow, RemoteTable};
pub use state::AppState;
pub use store::{RecordStore, StoreError};

pub use keepsake_engine::{DiaryEntry, RecordId, Syncable, Task, Timestamp, UserId};

/// Mint an id for a newly created record.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
