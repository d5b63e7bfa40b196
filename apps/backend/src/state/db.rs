//! # Database State
//!
//! Owns the snapshot persistence used by commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! let ledger = ledger_state.lock().await;
//! // ... mutate ...
//! let warning = db.persist(&ledger, &[Namespace::Expenses]).await;
//! ```

use shopkeep_core::Ledger;
use shopkeep_db::{Database, LedgerPersistence, MemoryStore, Namespace, StoreBackend};
use tracing::warn;

#[derive(Debug)]
pub struct DbState {
    persistence: LedgerPersistence<StoreBackend>,
    database: Option<Database>,
}

impl DbState {
    /// SQLite-backed state.
    pub fn new(db: Database) -> Self {
        DbState {
            persistence: LedgerPersistence::new(StoreBackend::Sqlite(db.snapshots())),
            database: Some(db),
        }
    }

    /// Process-local state; nothing survives the process.
    pub fn in_memory(store: MemoryStore) -> Self {
        DbState {
            persistence: LedgerPersistence::new(StoreBackend::Memory(store)),
            database: None,
        }
    }

    pub fn persistence(&self) -> &LedgerPersistence<StoreBackend> {
        &self.persistence
    }

    /// The SQLite handle, when there is one.
    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    pub fn backend_kind(&self) -> &'static str {
        self.persistence.store().kind()
    }

    /// Loads the ledger. Never fails.
    pub async fn load_ledger(&self) -> Ledger {
        self.persistence.load().await
    }

    /// Writes the given namespaces after a successful mutation.
    ///
    /// A failed write does not fail the command: the in-memory ledger stays
    /// authoritative and the failure comes back as a warning for the caller.
    pub async fn persist(&self, ledger: &Ledger, namespaces: &[Namespace]) -> Option<String> {
        match self.persistence.save_many(namespaces, ledger).await {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, ?namespaces, "Ledger change not saved");
                Some(format!("Change applied but not saved: {e}"))
            }
        }
    }
}
