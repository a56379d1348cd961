//! # Keepsake Engine
//!
//! The deterministic reconciliation kernel for Keepsake, a memory-care
//! companion app. A user's tasks and diary entries live in an on-device
//! record store and in a remote table; this crate decides, record by record,
//! which version survives when the two disagree.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of files, network, or platform
//! - **No clocks**: callers supply every timestamp; the engine never asks for "now"
//! - **Deterministic**: the same inputs always produce the same surviving records
//! - **Testable**: pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! Two record kinds are synced: [`Task`] and [`DiaryEntry`]. Both implement
//! the [`Syncable`] capability trait (`record_id` + `updated_at`), which is
//! all the merge needs. Every mutator refreshes `updated_at` monotonically,
//! and deletion is a soft tombstone (`deleted` flag) so that deletes
//! propagate through the same merge as edits instead of resurrecting.
//!
//! ### Merging
//!
//! [`merge_by_updated_at`] is a pure last-writer-wins merge keyed by record
//! id: the version with the greater `updated_at` survives, and exact ties
//! keep the local copy. The result is a set; callers impose display order.
//!
//! ### Persistence
//!
//! The engine does not persist anything itself, but it owns the stored blob
//! shape: [`codec::encode_collection`] and [`codec::decode_collection`]
//! convert a collection to and from the JSON value handed to the on-device
//! record store. Decode failures are typed so the caller can degrade to an
//! empty collection deliberately.
//!
//! ## Quick Start
//!
//! ```rust
//! use keepsake_engine::{merge_by_updated_at, Task};
//!
//! let local = Task::new("t1", "Buy milk", 1_000);
//!
//! let mut remote = Task::new("t1", "Buy milk", 1_000);
//! remote.rename("Buy milk and eggs", 2_000);
//!
//! let merged = merge_by_updated_at(vec![local], vec![remote]);
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].title, "Buy milk and eggs");
//! ```

pub mod codec;
pub mod error;
pub mod merge;
pub mod record;

// Re-export main types at crate root
pub use codec::{decode_collection, encode_collection};
pub use error::Error;
pub use merge::{check_unique_ids, merge_by_updated_at};
pub use record::{DiaryEntry, MediaKind, MediaRef, Mood, Syncable, Task};

/// Type aliases for clarity
pub type RecordId = String;
pub type UserId = String;
/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;
