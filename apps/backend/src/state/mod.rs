//! # State Module
//!
//! Application state for the command layer, split into focused types so each
//! command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │   DbState    │  │   LedgerState    │  │   ConfigState    │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  snapshot    │  │  Mutex<Ledger>   │  │  store_name      │          │
//! │  │  persistence │  │                  │  │  currency        │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: pool / shared map are internally synchronised               │
//! │  • LedgerState: tokio Mutex held for a whole command                    │
//! │  • ConfigState: read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod ledger;

pub use config::{ConfigError, ConfigResult, ConfigState, SymbolPosition};
pub use db::DbState;
pub use ledger::LedgerState;
