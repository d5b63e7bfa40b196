//! # Repository Module
//!
//! SQL access for Shopkeep. The ledger is stored as whole-collection
//! snapshots, so there is a single table and a single repository.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LedgerPersistence                                                      │
//! │       │  save(Namespace::Sales, &ledger)                                │
//! │       ▼                                                                 │
//! │  SnapshotRepository::put("sales", "[{...},{...}]")                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv_store (key PRIMARY KEY, value, updated_at)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`SnapshotRepository`] - upsert / fetch of snapshot blobs

pub mod snapshot;

pub use snapshot::SnapshotRepository;
