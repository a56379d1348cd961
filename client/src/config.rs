//! Configuration for the sync engine.

use std::env;
use std::time::Duration;

/// Remote column holding the owning user's id, used as the fetch filter.
pub const OWNER_ID_FIELD: &str = "owner_id";

/// Storage key and remote table for one record kind.
#[derive(Debug, Clone)]
pub struct KindConfig {
    /// Logical key in the on-device record store (scoped by user id there)
    pub storage_key: String,
    /// Remote table name
    pub table: String,
}

impl KindConfig {
    pub fn new(storage_key: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            table: table.into(),
        }
    }
}

/// Sync engine configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Quiet period before a scheduled push fires
    pub debounce: Duration,
    /// Task collection mapping
    pub tasks: KindConfig,
    /// Diary entry collection mapping
    pub entries: KindConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1500),
            tasks: KindConfig::new("tasks_v1", "tasks"),
            entries: KindConfig::new("diary_v1", "diary_entries"),
        }
    }
}

impl SyncConfig {
    /// Load configuration, honoring environment overrides.
    ///
    /// `KEEPSAKE_SYNC_DEBOUNCE_MS` overrides the debounce window.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("KEEPSAKE_SYNC_DEBOUNCE_MS") {
            let millis: u64 = raw.parse().map_err(|_| ConfigError::InvalidDebounce(raw))?;
            config.debounce = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid KEEPSAKE_SYNC_DEBOUNCE_MS value: {0}")]
    InvalidDebounce(String),
}
