//! # Inventory Store
//!
//! In-memory collection of [`Product`] records.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(draft)        id = max(ids, 0) + 1, stock = originalStock      │
//! │  edit(id, draft)      full replace; stock = originalStock = draft      │
//! │  delete(id)           removes the product (caller cascades sales)      │
//! │  sell(id, qty, tier)  stock -= qty, returns the unit price used        │
//! │  restore_stock(...)   undoes a sell when the sale cannot be recorded   │
//! │  repair()             clamps loaded stock counts into range            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `sell` only moves stock. Recording the [`Sale`](crate::types::Sale) is the
//! job of [`Ledger::sell`](crate::ledger::Ledger::sell), which pairs the two
//! as one unit.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{next_id, PriceTier, Product, ProductId};
use crate::validation::ProductDraft;

/// The product collection, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the store from a loaded snapshot.
    pub fn from_products(products: Vec<Product>) -> Self {
        Inventory { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: ProductId) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))
    }

    /// Adds a product. Stock and original stock both start at the draft's
    /// stock.
    pub fn create(&mut self, draft: &ProductDraft) -> Product {
        let product = Product {
            id: next_id(self.products.iter().map(|p| p.id)),
            name: draft.name().to_string(),
            cost_price: draft.cost_price(),
            selling_price: draft.selling_price(),
            discounted_price: draft.discounted_price(),
            stock: draft.stock(),
            original_stock: draft.stock(),
        };
        self.products.push(product.clone());
        product
    }

    /// Replaces name, prices and stock.
    ///
    /// This is a re-stocking event: `stock` and `original_stock` are both set
    /// to the draft's stock. Sales already recorded for the product stay in
    /// the ledger and are not replayed against the new count.
    pub fn edit(&mut self, id: ProductId, draft: &ProductDraft) -> CoreResult<Product> {
        let product = self.get_mut(id)?;
        product.name = draft.name().to_string();
        product.cost_price = draft.cost_price();
        product.selling_price = draft.selling_price();
        product.discounted_price = draft.discounted_price();
        product.stock = draft.stock();
        product.original_stock = draft.stock();
        Ok(product.clone())
    }

    /// Removes a product and returns it.
    pub fn delete(&mut self, id: ProductId) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;
        Ok(self.products.remove(index))
    }

    /// Takes `quantity` units off the shelf and returns the unit price for
    /// `tier`.
    ///
    /// Fails without touching stock when the product is missing, the
    /// quantity is not positive, or the quantity exceeds current stock.
    pub fn sell(&mut self, id: ProductId, quantity: i64, tier: PriceTier) -> CoreResult<Money> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        let product = self.get_mut(id)?;
        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                product_id: id,
                available: product.stock,
                requested: quantity,
            });
        }

        product.stock -= quantity;
        Ok(product.price_for(tier))
    }

    /// Puts back units taken by [`sell`](Self::sell). Never raises stock
    /// above the original stock.
    pub fn restore_stock(&mut self, id: ProductId, quantity: i64) -> CoreResult<()> {
        let product = self.get_mut(id)?;
        product.stock = product.stock.saturating_add(quantity).min(product.original_stock);
        Ok(())
    }

    /// Brings loaded records back within `0 ≤ stock ≤ originalStock`.
    ///
    /// Negative stock becomes 0; an original stock below stock is raised to
    /// it. Returns the ids that changed.
    pub fn repair(&mut self) -> Vec<ProductId> {
        let mut repaired = Vec::new();
        for product in &mut self.products {
            let stock = product.stock.max(0);
            let original_stock = product.original_stock.max(stock);
            if (stock, original_stock) != (product.stock, product.original_stock) {
                product.stock = stock;
                product.original_stock = original_stock;
                repaired.push(product.id);
            }
        }
        repaired
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, stock: i64) -> ProductDraft {
        ProductDraft::new(
            name,
            Money::from_major(100),
            Money::from_major(150),
            Money::from_major(120),
            stock,
        )
        .unwrap()
    }

    fn raw_product(id: ProductId, stock: i64, original_stock: i64) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            cost_price: Money::from_major(100),
            selling_price: Money::from_major(150),
            discounted_price: Money::from_major(120),
            stock,
            original_stock,
        }
    }

    #[test]
    fn test_create_assigns_ids_and_stock() {
        let mut inv = Inventory::new();
        let a = inv.create(&draft("A", 10));
        let b = inv.create(&draft("B", 5));

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.stock, 10);
        assert_eq!(a.original_stock, 10);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_id_is_max_plus_one() {
        let mut inv = Inventory::new();
        inv.create(&draft("A", 1));
        inv.create(&draft("B", 1));
        inv.create(&draft("C", 1));
        inv.delete(2).unwrap();

        assert_eq!(inv.create(&draft("D", 1)).id, 4);
        inv.delete(4).unwrap();
        inv.delete(3).unwrap();
        assert_eq!(inv.create(&draft("E", 1)).id, 2);
    }

    #[test]
    fn test_sell_decrements_and_returns_tier_price() {
        let mut inv = Inventory::new();
        let p = inv.create(&draft("Widget", 10));

        let price = inv.sell(p.id, 3, PriceTier::Selling).unwrap();
        assert_eq!(price, Money::from_major(150));
        assert_eq!(inv.get(p.id).unwrap().stock, 7);

        let price = inv.sell(p.id, 7, PriceTier::Discounted).unwrap();
        assert_eq!(price, Money::from_major(120));
        assert!(inv.get(p.id).unwrap().is_sold_out());
    }

    #[test]
    fn test_sell_failures_leave_stock_alone() {
        let mut inv = Inventory::new();
        let p = inv.create(&draft("Widget", 2));

        assert_eq!(
            inv.sell(p.id, 5, PriceTier::Selling),
            Err(CoreError::InsufficientStock {
                product_id: p.id,
                available: 2,
                requested: 5
            })
        );
        assert_eq!(inv.sell(p.id, 0, PriceTier::Selling), Err(CoreError::InvalidQuantity(0)));
        assert_eq!(inv.sell(p.id, -1, PriceTier::Selling), Err(CoreError::InvalidQuantity(-1)));
        assert_eq!(inv.sell(99, 1, PriceTier::Selling), Err(CoreError::ProductNotFound(99)));

        assert_eq!(inv.get(p.id).unwrap().stock, 2);
    }

    #[test]
    fn test_edit_is_a_restock() {
        let mut inv = Inventory::new();
        let p = inv.create(&draft("Widget", 10));
        inv.sell(p.id, 4, PriceTier::Selling).unwrap();

        let edited = inv.edit(p.id, &draft("Widget v2", 20)).unwrap();
        assert_eq!(edited.name, "Widget v2");
        assert_eq!(edited.stock, 20);
        assert_eq!(edited.original_stock, 20);
        assert_eq!(edited.units_sold(), 0);
    }

    #[test]
    fn test_edit_and_delete_missing_product() {
        let mut inv = Inventory::new();
        assert_eq!(inv.edit(1, &draft("X", 1)), Err(CoreError::ProductNotFound(1)));
        assert_eq!(inv.delete(1), Err(CoreError::ProductNotFound(1)));
    }

    #[test]
    fn test_restore_stock_is_capped() {
        let mut inv = Inventory::new();
        let p = inv.create(&draft("Widget", 5));
        inv.sell(p.id, 3, PriceTier::Selling).unwrap();

        inv.restore_stock(p.id, 3).unwrap();
        assert_eq!(inv.get(p.id).unwrap().stock, 5);

        inv.restore_stock(p.id, 10).unwrap();
        assert_eq!(inv.get(p.id).unwrap().stock, 5);
    }

    #[test]
    fn test_repair_clamps_out_of_range_stock() {
        let healthy = raw_product(1, 7, 10);
        let mut inv = Inventory::from_products(vec![
            healthy.clone(),
            raw_product(2, 12, 10),
            raw_product(3, -4, 10),
            raw_product(4, -1, -5),
        ]);

        assert_eq!(inv.repair(), vec![2, 3, 4]);
        assert_eq!(inv.get(1), Some(&healthy));
        assert_eq!(
            (inv.get(2).unwrap().stock, inv.get(2).unwrap().original_stock),
            (12, 12)
        );
        assert_eq!(
            (inv.get(3).unwrap().stock, inv.get(3).unwrap().original_stock),
            (0, 10)
        );
        assert_eq!(
            (inv.get(4).unwrap().stock, inv.get(4).unwrap().original_stock),
            (0, 0)
        );
        assert!(inv.products().iter().all(|p| p.units_sold() >= 0));

        // nothing left to do the second time
        assert!(inv.repair().is_empty());
    }

    #[test]
    fn test_stock_never_exceeds_original() {
        let mut inv = Inventory::new();
        let p = inv.create(&draft("Widget", 8));
        for qty in [1, 2, 10, 3, 0, 2] {
            let _ = inv.sell(p.id, qty, PriceTier::Discounted);
            let current = inv.get(p.id).unwrap();
            assert!(current.stock >= 0);
            assert!(current.stock <= current.original_stock);
        }
        assert_eq!(inv.get(p.id).unwrap().stock, 0);
    }
}
