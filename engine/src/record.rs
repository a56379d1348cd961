//! The two syncable record kinds and the capability trait the merge needs.
//!
//! Both kinds follow the same lifecycle: created locally with
//! `created_at == updated_at`, refreshed on every mutation, and soft-deleted
//! via a tombstone flag so a deletion is just another timestamped edit.

use crate::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// Capability required by the merge: an identity and a last-updated time.
///
/// Implementations must keep `updated_at` strictly increasing across
/// mutations of the same record; last-writer-wins is only correct if a later
/// edit always carries a later timestamp.
pub trait Syncable {
    /// The merge key. Immutable, unique within a user's collection.
    fn record_id(&self) -> &RecordId;

    /// When any field of the record last changed.
    fn updated_at(&self) -> Timestamp;
}

/// Advance `updated_at` for a mutation happening at `now`.
///
/// Guards against a stale wall clock: the result is always strictly greater
/// than the previous value.
fn bump(updated_at: Timestamp, now: Timestamp) -> Timestamp {
    now.max(updated_at.saturating_add(1))
}

/// A care task ("take medication", "call doctor").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation
    pub id: RecordId,
    /// What to do
    pub title: String,
    /// When the task is due, if scheduled
    pub scheduled_at: Option<Timestamp>,
    /// Whether the task has been completed
    pub done: bool,
    /// Soft delete flag (tombstone)
    pub deleted: bool,
    /// When the record was first created
    pub created_at: Timestamp,
    /// When the record was last updated
    pub updated_at: Timestamp,
}

impl Task {
    /// Create a new task at `now`.
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            scheduled_at: None,
            done: false,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the title.
    pub fn rename(&mut self, title: impl Into<String>, now: Timestamp) {
        self.title = title.into();
        self.updated_at = bump(self.updated_at, now);
    }

    /// Schedule or unschedule the task.
    pub fn reschedule(&mut self, scheduled_at: Option<Timestamp>, now: Timestamp) {
        self.scheduled_at = scheduled_at;
        self.updated_at = bump(self.updated_at, now);
    }

    /// Set or clear the done flag.
    pub fn set_done(&mut self, done: bool, now: Timestamp) {
        self.done = done;
        self.updated_at = bump(self.updated_at, now);
    }

    /// Tombstone the task. The refreshed `updated_at` lets the deletion win
    /// merges against older copies on other devices.
    pub fn mark_deleted(&mut self, now: Timestamp) {
        self.deleted = true;
        self.updated_at = bump(self.updated_at, now);
    }

    /// Check if the task is active (not tombstoned).
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

impl Syncable for Task {
    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// How the user felt when writing a diary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Neutral,
    Low,
    Bad,
}

/// Kind of media attached to a diary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Audio,
}

/// A reference to a piece of media stored outside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub kind: MediaKind,
    /// Opaque locator understood by the media layer
    pub uri: String,
}

/// A dated diary entry with optional mood and media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    /// Unique identifier, assigned at creation
    pub id: RecordId,
    /// The day the entry is about
    pub date: Timestamp,
    /// Free-form text
    pub text: String,
    /// Mood at the time of writing
    pub mood: Option<Mood>,
    /// Attached media references
    pub media: Vec<MediaRef>,
    /// Soft delete flag (tombstone)
    pub deleted: bool,
    /// When the record was first created
    pub created_at: Timestamp,
    /// When the record was last updated
    pub updated_at: Timestamp,
}

impl DiaryEntry {
    /// Create a new entry at `now`.
    pub fn new(
        id: impl Into<RecordId>,
        date: Timestamp,
        text: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            text: text.into(),
            mood: None,
            media: Vec::new(),
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the entry text.
    pub fn edit_text(&mut self, text: impl Into<String>, now: Timestamp) {
        self.text = text.into();
        self.updated_at = bump(self.updated_at, now);
    }

    /// Set or clear the mood.
    pub fn set_mood(&mut self, mood: Option<Mood>, now: Timestamp) {
        self.mood = mood;
        self.updated_at = bump(self.updated_at, now);
    }

    /// Attach a media reference.
    pub fn attach_media(&mut self, media: MediaRef, now: Timestamp) {
        self.media.push(media);
        self.updated_at = bump(self.updated_at, now);
    }

    /// Tombstone the entry.
    pub fn mark_deleted(&mut self, now: Timestamp) {
        self.deleted = true;
        self.updated_at = bump(self.updated_at, now);
    }

    /// Check if the entry is active (not tombstoned).
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

impl Syncable for DiaryEntry {
    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_starts_clean() {
        let task = Task::new("t1", "Buy milk", 1000);
        assert_eq!(task.id, "t1");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.created_at, 1000);
        assert_eq!(task.updated_at, 1000);
        assert!(!task.done);
        assert!(task.is_active());
    }

    #[test]
    fn mutation_refreshes_updated_at() {
        let mut task = Task::new("t1", "Buy milk", 1000);
        task.set_done(true, 2000);
        assert_eq!(task.updated_at, 2000);
        assert_eq!(task.created_at, 1000); // immutable
    }

    #[test]
    fn stale_clock_still_advances() {
        let mut task = Task::new("t1", "Buy milk", 5000);
        // Wall clock went backwards; updated_at must still move forward.
        task.rename("Buy oat milk", 3000);
        assert_eq!(task.updated_at, 5001);
    }

    #[test]
    fn delete_is_a_timestamped_edit() {
        let mut task = Task::new("t1", "Buy milk", 1000);
        task.mark_deleted(2000);
        assert!(task.deleted);
        assert!(!task.is_active());
        assert_eq!(task.updated_at, 2000);
    }

    #[test]
    fn entry_media_and_mood() {
        let mut entry = DiaryEntry::new("d1", 1000, "Went for a walk", 1000);
        entry.set_mood(Some(Mood::Good), 1100);
        entry.attach_media(
            MediaRef {
                kind: MediaKind::Photo,
                uri: "media://walk.jpg".to_string(),
            },
            1200,
        );

        assert_eq!(entry.mood, Some(Mood::Good));
        assert_eq!(entry.media.len(), 1);
        assert_eq!(entry.updated_at, 1200);
    }

    #[test]
    fn serialization_uses_camel_case() {
        let task = Task::new("t1", "Buy milk", 1000);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("scheduledAt"));
        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));
    }

    #[test]
    fn serialization_roundtrip() {
        let mut entry = DiaryEntry::new("d1", 1000, "Visited Anna", 1000);
        entry.set_mood(Some(Mood::Great), 1500);

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: DiaryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }
}
