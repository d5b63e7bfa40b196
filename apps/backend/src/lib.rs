//! # Shopkeep Backend Library
//!
//! Command layer for the Shopkeep ledger: wires configuration, persistence
//! and the in-memory ledger together and exposes one async function per
//! user action.
//!
//! ## Module Organization
//! ```text
//! shopkeep_backend/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Snapshot persistence wrapper
//! │   ├── ledger.rs   ◄─── Shared ledger behind a Mutex
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Response envelope
//! │   ├── product.rs  ◄─── Product CRUD
//! │   ├── sale.rs     ◄─── Sell / order records
//! │   ├── expense.rs  ◄─── Expenses
//! │   ├── customer.rs ◄─── Customer directory
//! │   ├── summary.rs  ◄─── Reconciliation figures
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! Instead of a single god struct, commands take focused state types:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │    DbState       │ │   LedgerState    │ │    ConfigState       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • Snapshot store│ │  • Products      │ │  • Store name        │   │
//! │  │  • SQLite handle │ │  • Sales         │ │  • Currency          │   │
//! │  │                  │ │  • Expenses      │ │  • Database path     │   │
//! │  │                  │ │  • Customers     │ │                      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Each command only requests the state it needs.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopkeep_db::{Database, DbConfig, DbError, MemoryStore};
use state::{ConfigError, ConfigState, DbState, LedgerState};

/// Errors that stop the backend from starting.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Everything a command can be handed.
#[derive(Debug)]
pub struct App {
    pub config: ConfigState,
    pub db: DbState,
    pub ledger: LedgerState,
}

impl App {
    /// Starts the backend against the configured SQLite file.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Resolve database path ── config value or platform data directory    │
    /// │  2. Connect to SQLite ────── WAL mode, pending migrations applied       │
    /// │  3. Load the ledger ──────── each namespace read on its own;            │
    /// │                              bad or missing data loads as empty         │
    /// │  4. Wrap in state types ──── ready for commands                         │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn bootstrap(config: ConfigState) -> Result<Self, BootstrapError> {
        let db_path = config.resolve_database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        Ok(Self::with_db(config, DbState::new(db)).await)
    }

    /// A backend whose data lives only in `store`.
    pub async fn in_memory(config: ConfigState, store: MemoryStore) -> Self {
        Self::with_db(config, DbState::in_memory(store)).await
    }

    async fn with_db(config: ConfigState, db: DbState) -> Self {
        let ledger = db.load_ledger().await;
        info!(backend = db.backend_kind(), store = %config.store_name, "Backend ready");

        App {
            config,
            db,
            ledger: LedgerState::new(ledger),
        }
    }

    /// Closes the database pool, if there is one.
    pub async fn shutdown(self) {
        if let Some(db) = self.db.database() {
            db.close().await;
        }
        info!("Backend shut down");
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopkeep_core=trace` - Narrow to one crate
/// - Default: INFO, DEBUG for the shopkeep crates
///
/// Calling it again is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopkeep=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::expense::add_expense;
    use crate::commands::product::add_product;
    use crate::commands::sale::{sell_product, SellRequest};
    use crate::commands::summary::get_summary;
    use crate::commands::testing::{app, expense_form, widget_form};
    use shopkeep_core::{Money, PriceTier};

    fn sell_three() -> SellRequest {
        SellRequest {
            product_id: 1,
            quantity: 3,
            price_tier: PriceTier::Selling,
        }
    }

    #[tokio::test]
    async fn test_restart_preserves_summary() {
        let (app, store) = app().await;
        add_product(&app.db, &app.ledger, widget_form()).await.unwrap();
        sell_product(&app.db, &app.ledger, sell_three()).await.unwrap();
        add_expense(&app.db, &app.ledger, expense_form("Rent", "200"))
            .await
            .unwrap();
        let before = get_summary(&app.ledger, &app.config).await;

        let restarted = App::in_memory(ConfigState::default(), store).await;
        let after = get_summary(&restarted.ledger, &restarted.config).await;

        assert_eq!(before, after);
        assert_eq!(after.figures.available_cash, Money::from_major(250));
    }

    #[tokio::test]
    async fn test_failed_save_is_a_warning_not_an_error() {
        let (app, store) = app().await;
        store.set_fail_writes(true);

        let response = add_product(&app.db, &app.ledger, widget_form()).await.unwrap();
        assert!(!response.is_saved());
        assert!(response.warning.unwrap().contains("not saved"));

        let sold = sell_product(&app.db, &app.ledger, sell_three()).await.unwrap();
        assert!(sold.warning.is_some());

        // in-memory state keeps the change
        let summary = get_summary(&app.ledger, &app.config).await;
        assert_eq!(summary.figures.total_revenue, Money::from_major(450));

        // nothing reached the store
        store.set_fail_writes(false);
        let restarted = App::in_memory(ConfigState::default(), store).await;
        let summary = get_summary(&restarted.ledger, &restarted.config).await;
        assert_eq!(summary.figures.total_revenue, Money::zero());
    }

    #[tokio::test]
    async fn test_corrupt_namespace_loads_empty() {
        let store = MemoryStore::new();
        store.insert_raw("products", "{not json");
        store.insert_raw("expenses", "[]");

        let app = App::in_memory(ConfigState::default(), store).await;
        let summary = get_summary(&app.ledger, &app.config).await;
        assert_eq!(summary.figures, shopkeep_core::FinancialSummary::default());
    }

    #[tokio::test]
    async fn test_bootstrap_with_sqlite_file() {
        let dir = std::env::temp_dir().join(format!("shopkeep-boot-{}", std::process::id()));
        let config = ConfigState {
            database_path: Some(dir.join("ledger.db")),
            ..ConfigState::default()
        };

        let app = App::bootstrap(config.clone()).await.unwrap();
        add_product(&app.db, &app.ledger, widget_form()).await.unwrap();
        app.shutdown().await;

        let app = App::bootstrap(config).await.unwrap();
        assert_eq!(app.ledger.with_ledger(|l| l.inventory().len()).await, 1);
        app.shutdown().await;

        let _ = std::fs::remove_dir_all(dir);
    }
}
