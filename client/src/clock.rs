//! Wall-clock source for record timestamps.
//!
//! The engine crate never asks for "now"; this is the one place the client
//! reads the clock. Record mutators still clamp against going backwards, so
//! a skewed clock degrades ordering quality but not correctness.

use keepsake_engine::Timestamp;

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> Timestamp {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
