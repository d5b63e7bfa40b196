//! # Key-Value Store Seam
//!
//! The durable store the ledger is persisted into is an opaque map from
//! namespace key to blob. Anything that can `load` and `save` a string under
//! a key can back the ledger.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KeyValueStore                                       │
//! │          load(key) -> Option<blob>     save(key, blob)                  │
//! │                  ▲                          ▲                           │
//! │        ┌─────────┴─────────┐      ┌─────────┴─────────┐                 │
//! │        │ SnapshotRepository │      │    MemoryStore    │                 │
//! │        │  (SQLite kv_store) │      │ (tests, ephemeral)│                 │
//! │        └───────────────────┘      └───────────────────┘                 │
//! │                  ▲                          ▲                           │
//! │                  └──────── StoreBackend ────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{DbError, DbResult};
use crate::repository::SnapshotRepository;

/// A durable string-keyed blob store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob under `key`, or `None` if nothing was ever saved.
    fn load(&self, key: &str) -> impl Future<Output = DbResult<Option<String>>> + Send;

    /// Replaces the blob under `key`.
    fn save(&self, key: &str, blob: &str) -> impl Future<Output = DbResult<()>> + Send;
}

impl KeyValueStore for SnapshotRepository {
    async fn load(&self, key: &str) -> DbResult<Option<String>> {
        self.get(key).await
    }

    async fn save(&self, key: &str, blob: &str) -> DbResult<()> {
        self.put(key, blob).await
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Process-local store. Clones share the same map.
///
/// Reads and writes can be made to fail on demand, which is how the
/// "persistence failed but the command succeeded" path is exercised.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, bypassing the failure switches.
    pub fn insert_raw(&self, key: &str, blob: &str) {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), blob.to_string());
        });
    }

    /// Reads a key, bypassing the failure switches.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn with_entries<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<String, String>) -> R,
    {
        // A panic while holding this lock cannot leave the map half-written.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut entries)
    }
}

impl KeyValueStore for MemoryStore {
    async fn load(&self, key: &str) -> DbResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DbError::QueryFailed(format!("read of '{key}' refused")));
        }
        Ok(self.get_raw(key))
    }

    async fn save(&self, key: &str, blob: &str) -> DbResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::WriteRejected {
                key: key.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.insert_raw(key, blob);
        Ok(())
    }
}

// =============================================================================
// Backend Selection
// =============================================================================

/// The store chosen at startup.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    Sqlite(SnapshotRepository),
    Memory(MemoryStore),
}

impl StoreBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite(_) => "sqlite",
            StoreBackend::Memory(_) => "memory",
        }
    }
}

impl KeyValueStore for StoreBackend {
    async fn load(&self, key: &str) -> DbResult<Option<String>> {
        match self {
            StoreBackend::Sqlite(repo) => repo.load(key).await,
            StoreBackend::Memory(store) => store.load(key).await,
        }
    }

    async fn save(&self, key: &str, blob: &str) -> DbResult<()> {
        match self {
            StoreBackend::Sqlite(repo) => repo.save(key, blob).await,
            StoreBackend::Memory(store) => store.save(key, blob).await,
        }
    }
}
