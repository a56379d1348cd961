//! Last-writer-wins reconciliation of a local and a remote collection.
//!
//! # Algorithm
//!
//! 1. Seed a map from the local collection, keyed by record id
//! 2. Walk the remote collection: insert unknown ids, replace a known id
//!    only if the remote copy has a strictly greater `updated_at`
//! 3. Return the surviving values
//!
//! Exact `updated_at` ties keep the local copy. The output is a set; callers
//! must not depend on its order.

use crate::{error::Result, record::Syncable, Error, RecordId};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Merge `local` and `remote`, keeping the most-recently-updated version of
/// each record id.
///
/// Pure and deterministic up to output order: no IO, inputs are consumed,
/// nothing is mutated in place. Given duplicate ids within one input (an
/// invariant violation upstream), the later element wins its slot.
pub fn merge_by_updated_at<S: Syncable>(local: Vec<S>, remote: Vec<S>) -> Vec<S> {
    let mut by_id: HashMap<RecordId, S> = local
        .into_iter()
        .map(|record| (record.record_id().clone(), record))
        .collect();

    for record in remote {
        match by_id.entry(record.record_id().clone()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                // Strictly greater: ties favor the local copy.
                if record.updated_at() > slot.get().updated_at() {
                    slot.insert(record);
                }
            }
        }
    }

    by_id.into_values().collect()
}

/// Verify the id-uniqueness invariant of a collection.
///
/// The merge does not require this check (it resolves duplicates by map
/// semantics), but callers can use it to surface an upstream bug instead of
/// silently losing a record.
pub fn check_unique_ids<S: Syncable>(records: &[S]) -> Result<()> {
    let mut seen: HashSet<&RecordId> = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.record_id()) {
            return Err(Error::DuplicateId(record.record_id().clone()));
        }
    }
    Ok(())
}
