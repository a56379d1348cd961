//! The in-memory application state the UI reads from.
//!
//! One `AppState` per session, shared behind the sync engine's lock. The
//! merged collections are sets; the sorted accessors exist because screens
//! want newest-first views without re-deriving them everywhere.

use keepsake_engine::{DiaryEntry, Task};

/// A session's current view of the user's records.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub entries: Vec<DiaryEntry>,
}

impl AppState {
    /// Active tasks, soonest scheduled first, unscheduled last.
    pub fn tasks_by_schedule(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.is_active()).collect();
        tasks.sort_by(|a, b| match (a.scheduled_at, b.scheduled_at) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.updated_at.cmp(&a.updated_at),
        });
        tasks
    }

    /// Active diary entries, most recent day first.
    pub fn entries_by_date(&self) -> Vec<&DiaryEntry> {
        let mut entries: Vec<&DiaryEntry> =
            self.entries.iter().filter(|e| e.is_active()).collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }
}
