//! The sync engine: reconcile on-device and remote state, then push back.
//!
//! One `SyncEngine` instance serves one app session. Everything that used to
//! be ambient in similar designs is instance state here: the pending debounce
//! handle, the per-user sync locks, and the session slot. Nothing in this
//! module returns an error to its caller; every failure degrades to the best
//! data available and leaves a structured log behind.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use keepsake_engine::{
    decode_collection, encode_collection, merge_by_updated_at, DiaryEntry, Syncable, Task, UserId,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::config::{KindConfig, SyncConfig, OWNER_ID_FIELD};
use crate::remote::{self, RemoteRow, RemoteTable};
use crate::state::AppState;
use crate::store::RecordStore;

/// Reconciles a user's record collections across the on-device store and the
/// remote tables.
///
/// Constructed `Arc`-shared so the debounce task can hold the engine alive
/// across the quiet period.
pub struct SyncEngine {
    store: Arc<dyn RecordStore>,
    remote: Arc<dyn RemoteTable>,
    config: SyncConfig,
    /// Handle to our own `Arc`, so the debounce task can keep the engine
    /// alive across the quiet period
    weak_self: Weak<Self>,
    /// The session's in-memory view of the user's records
    state: RwLock<AppState>,
    /// Authenticated user, if any. Sync and push are no-ops without one.
    session: RwLock<Option<UserId>>,
    /// The armed-but-not-yet-fired push, if any
    pending_push: Mutex<Option<JoinHandle<()>>>,
    /// Single-flight guards so overlapping syncs for one user serialize
    sync_locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl SyncEngine {
    /// Create a new engine wrapped in `Arc` for sharing.
    pub fn new(
        store: Arc<dyn RecordStore>,
        remote: Arc<dyn RemoteTable>,
        config: SyncConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            store,
            remote,
            config,
            weak_self: weak.clone(),
            state: RwLock::new(AppState::default()),
            session: RwLock::new(None),
            pending_push: Mutex::new(None),
            sync_locks: DashMap::new(),
        })
    }

    /// Set the authenticated user for this session.
    pub async fn set_user(&self, user_id: impl Into<UserId>) {
        *self.session.write().await = Some(user_id.into());
    }

    /// Clear the session. An already-armed push stays armed; it rechecks the
    /// session when it fires and no-ops.
    pub async fn clear_user(&self) {
        *self.session.write().await = None;
    }

    async fn current_user(&self) -> Option<UserId> {
        self.session.read().await.clone()
    }

    /// A clone of the current in-memory state.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Reconcile both record kinds for the current user.
    ///
    /// Per kind: load local (empty on any failure), fetch remote (empty on
    /// any failure), merge last-writer-wins, persist the merged collection
    /// locally, then replace the in-memory state and arm a debounced push.
    /// Without an authenticated user this is a no-op.
    pub async fn full_sync(&self) {
        let Some(user) = self.current_user().await else {
            tracing::debug!("no authenticated session, skipping sync");
            return;
        };

        // Serialize overlapping syncs for the same user (login + foreground
        // can both trigger one); distinct users stay concurrent.
        let lock = self
            .sync_locks
            .entry(user.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let tasks = self.sync_kind::<Task>(&self.config.tasks, &user).await;
        let entries = self
            .sync_kind::<DiaryEntry>(&self.config.entries, &user)
            .await;

        {
            let mut state = self.state.write().await;
            state.tasks = tasks;
            state.entries = entries;
        }

        self.schedule_push().await;
    }

    async fn sync_kind<S>(&self, kind: &KindConfig, user: &str) -> Vec<S>
    where
        S: Syncable + Serialize + DeserializeOwned + Send,
    {
        let local = self.load_local::<S>(kind, user).await;
        let remote = self.fetch_remote::<S>(kind, user).await;
        let merged = merge_by_updated_at(local, remote);
        self.save_local(kind, user, &merged).await;
        merged
    }

    async fn load_local<S: DeserializeOwned>(&self, kind: &KindConfig, user: &str) -> Vec<S> {
        let blob = match self.store.load(&kind.storage_key, user).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    kind = %kind.storage_key,
                    user_id = %user,
                    error = %e,
                    "local load failed, treating as empty"
                );
                return Vec::new();
            }
        };

        match decode_collection(blob) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    kind = %kind.storage_key,
                    user_id = %user,
                    error = %e,
                    "stored blob undecodable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    async fn fetch_remote<S: DeserializeOwned>(&self, kind: &KindConfig, user: &str) -> Vec<S> {
        let rows = match self
            .remote
            .select_where(&kind.table, OWNER_ID_FIELD, user)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(
                    table = %kind.table,
                    user_id = %user,
                    error = %e,
                    "remote fetch failed, syncing from local only"
                );
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter_map(|row| {
                let item_id = row.item_id.clone();
                match remote::from_row(row) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(
                            table = %kind.table,
                            item_id = %item_id,
                            error = %e,
                            "skipping undecodable remote row"
                        );
                        None
                    }
                }
            })
            .collect()
    }

    async fn save_local<S: Serialize>(&self, kind: &KindConfig, user: &str, records: &[S]) {
        let blob = match encode_collection(records) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!(
                    kind = %kind.storage_key,
                    user_id = %user,
                    error = %e,
                    "could not encode collection, skipping local save"
                );
                return;
            }
        };

        if let Err(e) = self.store.save(&kind.storage_key, user, &blob).await {
            tracing::warn!(
                kind = %kind.storage_key,
                user_id = %user,
                error = %e,
                "local save failed"
            );
        }
    }

    /// Mutate the in-memory state, persist it locally, and arm a debounced
    /// push. This is the edit path: every local change funnels through here,
    /// which is also what makes push failures self-heal on the next edit.
    ///
    /// Without an authenticated user the mutation stays in memory only.
    pub async fn apply_edit<F>(&self, edit: F)
    where
        F: FnOnce(&mut AppState),
    {
        let snapshot = {
            let mut state = self.state.write().await;
            edit(&mut *state);
            AppState::clone(&state)
        };

        let Some(user) = self.current_user().await else {
            return;
        };

        self.save_local(&self.config.tasks, &user, &snapshot.tasks)
            .await;
        self.save_local(&self.config.entries, &user, &snapshot.entries)
            .await;
        self.schedule_push().await;
    }

    /// Arm (or re-arm) the trailing-edge debounced push.
    ///
    /// A still-waiting scheduled push is cancelled and replaced. A push that
    /// has already started executing is never aborted: the debounce task
    /// removes its own handle from the slot, under the slot lock, before it
    /// calls [`Self::push_now`], so an abort can only ever land on a task
    /// that has not begun pushing.
    pub async fn schedule_push(&self) {
        if self.current_user().await.is_none() {
            tracing::debug!("no authenticated session, not scheduling push");
            return;
        }

        // Only fails while the last Arc is being dropped, when there is
        // nobody left to push for.
        let Some(engine) = self.weak_self.upgrade() else {
            return;
        };
        let delay = self.config.debounce;

        let mut pending = self.pending_push.lock().await;
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut pending = engine.pending_push.lock().await;
                *pending = None;
            }
            engine.push_now().await;
        }));
    }

    /// Upload the current in-memory state to the remote tables, one batched
    /// upsert per record kind. Failures are swallowed per kind independently;
    /// the next edit-triggered schedule is the only retry. No-op without an
    /// authenticated user.
    pub async fn push_now(&self) {
        let Some(user) = self.current_user().await else {
            tracing::debug!("no authenticated session, skipping push");
            return;
        };

        let snapshot = self.state.read().await.clone();
        self.push_kind(&self.config.tasks, &user, &snapshot.tasks)
            .await;
        self.push_kind(&self.config.entries, &user, &snapshot.entries)
            .await;
    }

    async fn push_kind<S>(&self, kind: &KindConfig, user: &str, records: &[S])
    where
        S: Syncable + Serialize,
    {
        let rows: Vec<RemoteRow> = records
            .iter()
            .filter_map(|record| match remote::to_row(user, record) {
                Ok(row) => Some(row),
                Err(e) => {
                    tracing::warn!(
                        table = %kind.table,
                        item_id = %record.record_id(),
                        error = %e,
                        "skipping unserializable record"
                    );
                    None
                }
            })
            .collect();

        if rows.is_empty() {
            return;
        }

        let count = rows.len();
        match self.remote.upsert_many(&kind.table, rows).await {
            Ok(()) => {
                tracing::debug!(table = %kind.table, user_id = %user, count, "pushed records");
            }
            Err(e) => {
                tracing::warn!(
                    table = %kind.table,
                    user_id = %user,
                    error = %e,
                    "push failed, will retry on next edit"
                );
            }
        }
    }
}
