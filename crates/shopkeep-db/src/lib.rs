//! # shopkeep-db: Persistence Adapter for Shopkeep
//!
//! Keeps the ledger durable as one JSON snapshot per namespace in a SQLite
//! key-value table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Data Flow                               │
//! │                                                                         │
//! │  Backend command (sell_product)                                        │
//! │       │  mutate Ledger, then persist [products, sales]                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shopkeep-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌───────────────┐   ┌───────────────┐  │   │
//! │  │   │ LedgerPersist. │──►│ KeyValueStore │◄──│  MemoryStore  │  │   │
//! │  │   │ (persistence)  │   │   (store.rs)  │   │  (tests)      │  │   │
//! │  │   └────────────────┘   └───────┬───────┘   └───────────────┘  │   │
//! │  │                                │                               │   │
//! │  │   ┌───────────────┐   ┌────────▼────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │──►│ SnapshotRepo    │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │   │ (kv_store)      │   │  (embedded)  │  │   │
//! │  │   └───────────────┘   └─────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/shopkeep.db                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - SQL for the `kv_store` table
//! - [`store`] - The `KeyValueStore` seam and its implementations
//! - [`persistence`] - Namespaced ledger snapshots
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopkeep_db::{Database, DbConfig, LedgerPersistence, Namespace, StoreBackend};
//!
//! let db = Database::new(DbConfig::new("shopkeep.db")).await?;
//! let persistence = LedgerPersistence::new(StoreBackend::Sqlite(db.snapshots()));
//!
//! let mut ledger = persistence.load().await;
//! // ... mutate ...
//! persistence.save_many(&[Namespace::Products, Namespace::Sales], &ledger).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod persistence;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use persistence::{LedgerPersistence, Namespace};
pub use pool::{Database, DbConfig};
pub use repository::SnapshotRepository;
pub use store::{KeyValueStore, MemoryStore, StoreBackend};
