//! # Ledger Persistence
//!
//! Moves whole collections between the [`Ledger`] and a [`KeyValueStore`].
//!
//! ## Namespaces
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ key          │ blob                                                     │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ products     │ [{"id":1,"name":"Widget","costPrice":10000,...}, ...]    │
//! │ sales        │ [{"productId":1,"quantity":3,"price":15000,...}, ...]    │
//! │ expenses     │ [{"id":1,"category":"Food","amount":1000000,...}, ...]   │
//! │ customers    │ [{"id":1,"name":"Aziz","email":"...","phone":"..."}]     │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Loading
//! Startup never fails. A namespace that is absent, unreadable or malformed
//! comes back empty and the problem is logged. Records that parse but break
//! the ledger's rules are repaired (stock counts clamped into range) or
//! dropped (sales with a non-positive quantity or price), each with a warning.
//!
//! ## Saving
//! Every save writes the namespace's full current collection; there are no
//! incremental diffs and no schema version.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use shopkeep_core::{CustomerDirectory, ExpenseLedger, Inventory, Ledger, SalesLedger};

use crate::error::DbResult;
use crate::store::KeyValueStore;

// =============================================================================
// Namespace
// =============================================================================

/// One independently persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Products,
    Sales,
    Expenses,
    Customers,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::Products,
        Namespace::Sales,
        Namespace::Expenses,
        Namespace::Customers,
    ];

    /// Storage key.
    pub fn key(self) -> &'static str {
        match self {
            Namespace::Products => "products",
            Namespace::Sales => "sales",
            Namespace::Expenses => "expenses",
            Namespace::Customers => "customers",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Serializes one namespace of the ledger as a JSON array.
pub fn snapshot(namespace: Namespace, ledger: &Ledger) -> DbResult<String> {
    let blob = match namespace {
        Namespace::Products => serde_json::to_string(ledger.inventory())?,
        Namespace::Sales => serde_json::to_string(ledger.sales())?,
        Namespace::Expenses => serde_json::to_string(ledger.expenses())?,
        Namespace::Customers => serde_json::to_string(ledger.customers())?,
    };
    Ok(blob)
}

// =============================================================================
// LedgerPersistence
// =============================================================================

/// Snapshot load/save over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct LedgerPersistence<S> {
    store: S,
}

impl<S: KeyValueStore> LedgerPersistence<S> {
    pub fn new(store: S) -> Self {
        LedgerPersistence { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads every namespace, substituting empty collections for anything
    /// missing or unreadable.
    pub async fn load(&self) -> Ledger {
        let mut inventory: Inventory = self.load_collection(Namespace::Products).await;
        let mut sales: SalesLedger = self.load_collection(Namespace::Sales).await;
        let expenses: ExpenseLedger = self.load_collection(Namespace::Expenses).await;
        let customers: CustomerDirectory = self.load_collection(Namespace::Customers).await;

        for product_id in inventory.repair() {
            warn!(product_id, "Stock out of range in snapshot, clamped");
        }
        let discarded = sales.discard_invalid();
        if discarded > 0 {
            warn!(discarded, "Dropped invalid sale records from snapshot");
        }

        info!(
            products = inventory.len(),
            sales = sales.len(),
            expenses = expenses.len(),
            customers = customers.len(),
            "Ledger loaded"
        );

        Ledger::from_parts(inventory, sales, expenses, customers)
    }

    async fn load_collection<T>(&self, namespace: Namespace) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.store.load(namespace.key()).await {
            Ok(Some(blob)) => match serde_json::from_str::<T>(&blob) {
                Ok(collection) => collection,
                Err(e) => {
                    warn!(namespace = %namespace, error = %e, "Malformed snapshot, starting empty");
                    T::default()
                }
            },
            Ok(None) => {
                debug!(namespace = %namespace, "No snapshot stored, starting empty");
                T::default()
            }
            Err(e) => {
                warn!(namespace = %namespace, error = %e, "Snapshot unreadable, starting empty");
                T::default()
            }
        }
    }

    /// Writes one namespace.
    pub async fn save(&self, namespace: Namespace, ledger: &Ledger) -> DbResult<()> {
        let blob = snapshot(namespace, ledger)?;
        self.store.save(namespace.key(), &blob).await?;
        debug!(namespace = %namespace, bytes = blob.len(), "Snapshot saved");
        Ok(())
    }

    /// Writes each namespace in turn. Every write is attempted even after a
    /// failure; the first error is returned.
    pub async fn save_many(&self, namespaces: &[Namespace], ledger: &Ledger) -> DbResult<()> {
        let mut first_error = None;

        for &namespace in namespaces {
            if let Err(e) = self.save(namespace, ledger).await {
                warn!(namespace = %namespace, error = %e, "Snapshot write failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub async fn save_all(&self, ledger: &Ledger) -> DbResult<()> {
        self.save_many(&Namespace::ALL, ledger).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::store::{MemoryStore, StoreBackend};
    use chrono::Utc;
    use shopkeep_core::{CustomerForm, ExpenseForm, Money, PriceTier, ProductForm};

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let widget = ledger
            .add_product(&ProductForm {
                name: "Widget".into(),
                cost_price: "100".into(),
                selling_price: "150".into(),
                discounted_price: "120".into(),
                stock: "10".into(),
            })
            .unwrap();
        ledger.sell(widget.id, 3, PriceTier::Selling, Utc::now()).unwrap();
        ledger.sell(widget.id, 2, PriceTier::Discounted, Utc::now()).unwrap();
        ledger
            .record_expense(
                &ExpenseForm {
                    category: "Rent".into(),
                    amount: "250.75".into(),
                    description: "March".into(),
                },
                Utc::now(),
            )
            .unwrap();
        ledger
            .add_customer(&CustomerForm {
                name: "Aziz".into(),
                email: "aziz@example.uz".into(),
                phone: "+998 90 123 45 67".into(),
            })
            .unwrap();
        ledger
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_summary() {
        let persistence = LedgerPersistence::new(MemoryStore::new());
        let ledger = sample_ledger();

        persistence.save_all(&ledger).await.unwrap();
        let reloaded = persistence.load().await;

        assert_eq!(reloaded, ledger);
        assert_eq!(reloaded.summary(), ledger.summary());
    }

    #[tokio::test]
    async fn test_roundtrip_through_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let persistence = LedgerPersistence::new(StoreBackend::Sqlite(db.snapshots()));
        let ledger = sample_ledger();

        persistence.save_all(&ledger).await.unwrap();
        let reloaded = persistence.load().await;

        assert_eq!(reloaded.summary(), ledger.summary());
        assert_eq!(db.snapshots().keys().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_store_loads_empty_ledger() {
        let persistence = LedgerPersistence::new(MemoryStore::new());
        assert_eq!(persistence.load().await, Ledger::new());
    }

    #[tokio::test]
    async fn test_malformed_namespace_loads_empty_others_survive() {
        let store = MemoryStore::new();
        let persistence = LedgerPersistence::new(store.clone());
        persistence.save_all(&sample_ledger()).await.unwrap();

        store.insert_raw("sales", "{not json");
        store.insert_raw("customers", r#"{"id":1}"#);

        let reloaded = persistence.load().await;
        assert!(reloaded.sales().is_empty());
        assert!(reloaded.customers().is_empty());
        assert_eq!(reloaded.inventory().len(), 1);
        assert_eq!(reloaded.expenses().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_records_are_repaired_on_load() {
        let store = MemoryStore::new();
        store.insert_raw(
            "products",
            r#"[{"id":1,"name":"Widget","costPrice":10000,"sellingPrice":15000,
                 "discountedPrice":12000,"stock":12,"originalStock":10}]"#,
        );
        store.insert_raw(
            "sales",
            r#"[{"productId":1,"quantity":2,"price":15000,"timestamp":"2026-03-01T10:00:00Z"},
                {"productId":1,"quantity":0,"price":15000,"timestamp":"2026-03-01T11:00:00Z"},
                {"productId":1,"quantity":1,"price":0,"timestamp":"2026-03-01T12:00:00Z"}]"#,
        );

        let mut ledger = LedgerPersistence::new(store).load().await;
        let widget = ledger.inventory().get(1).unwrap().clone();
        assert_eq!((widget.stock, widget.original_stock), (12, 12));
        assert_eq!(ledger.sales().len(), 1);

        let summary = ledger.summary();
        assert_eq!(summary.cost_of_sold_items, Money::zero());
        assert_eq!(summary.total_revenue, Money::from_major(300));

        // a refused sell leaves the loaded state as it was
        let before = ledger.clone();
        assert!(ledger.sell(1, 13, PriceTier::Selling, Utc::now()).is_err());
        assert_eq!(ledger, before);
    }

    #[tokio::test]
    async fn test_unreadable_store_loads_empty() {
        let store = MemoryStore::new();
        let persistence = LedgerPersistence::new(store.clone());
        persistence.save_all(&sample_ledger()).await.unwrap();

        store.set_fail_reads(true);
        assert_eq!(persistence.load().await, Ledger::new());
    }

    #[tokio::test]
    async fn test_save_writes_only_named_namespaces() {
        let store = MemoryStore::new();
        let persistence = LedgerPersistence::new(store.clone());

        persistence
            .save_many(&[Namespace::Products, Namespace::Sales], &sample_ledger())
            .await
            .unwrap();

        assert!(store.get_raw("products").is_some());
        assert!(store.get_raw("sales").is_some());
        assert!(store.get_raw("expenses").is_none());
        assert!(store.get_raw("customers").is_none());
    }

    #[tokio::test]
    async fn test_failed_write_is_reported() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let persistence = LedgerPersistence::new(store.clone());

        assert!(persistence.save_all(&sample_ledger()).await.is_err());
        assert!(store.get_raw("products").is_none());
    }

    #[test]
    fn test_snapshot_is_a_json_array() {
        let blob = snapshot(Namespace::Sales, &sample_ledger()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();

        let sales = value.as_array().unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0]["productId"], 1);
        assert_eq!(sales[0]["price"], 15000);
        assert_eq!(sales[1]["price"], 12000);
    }
}
