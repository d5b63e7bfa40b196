//! # Ledger State
//!
//! The in-memory ledger shared by every command.
//!
//! ## Thread Safety
//! The ledger sits behind a `tokio::sync::Mutex`. A command holds the guard
//! for its whole validate → mutate → persist sequence, so commands never
//! interleave and a snapshot always matches the state it was taken from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sell_product ──► lock ──► Ledger::sell ──► persist ──► unlock          │
//! │  add_expense  ─────────────── waits ──────────────────► lock ──► ...    │
//! │  get_summary  ─────────────── waits ──────────────────► lock (brief)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopkeep_core::Ledger;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct LedgerState {
    ledger: Mutex<Ledger>,
}

impl LedgerState {
    pub fn new(ledger: Ledger) -> Self {
        LedgerState {
            ledger: Mutex::new(ledger),
        }
    }

    /// Exclusive access for a mutating command.
    pub async fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().await
    }

    /// Runs a read-only query against a consistent view.
    pub async fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        let ledger = self.ledger.lock().await;
        f(&ledger)
    }
}
