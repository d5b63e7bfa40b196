//! # Sales Ledger
//!
//! Append-only record of sales, in insertion order.
//!
//! A sale is never edited. Records leave the ledger in two ways only:
//! - cascade: the product they reference was deleted
//!   ([`cascade_delete_by_product`](SalesLedger::cascade_delete_by_product))
//! - the sales-list view removes one order record
//!   ([`remove_at`](SalesLedger::remove_at)). This is a ledger-record removal,
//!   not an inventory reversal: stock is NOT restored.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ProductId, Sale};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sales(sales: Vec<Sale>) -> Self {
        SalesLedger { sales }
    }

    /// All sales in insertion order.
    pub fn list_all(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Appends a sale.
    ///
    /// The sell workflow has already checked stock; this only refuses records
    /// that could never have come out of it.
    pub fn append(&mut self, sale: Sale) -> CoreResult<()> {
        if sale.quantity <= 0 {
            return Err(CoreError::InvalidSale(format!(
                "quantity must be positive, got {}",
                sale.quantity
            )));
        }
        if !sale.price.is_positive() {
            return Err(CoreError::InvalidSale(format!(
                "price must be positive, got {}",
                sale.price
            )));
        }
        self.sales.push(sale);
        Ok(())
    }

    /// Drops loaded records that [`append`](Self::append) would have refused;
    /// returns how many went.
    pub fn discard_invalid(&mut self) -> usize {
        let before = self.sales.len();
        self.sales.retain(|s| s.quantity > 0 && s.price.is_positive());
        before - self.sales.len()
    }

    /// Removes every sale for `product_id`; returns how many went.
    ///
    /// Linear scan. Sales for other products keep their relative order.
    pub fn cascade_delete_by_product(&mut self, product_id: ProductId) -> usize {
        let before = self.sales.len();
        self.sales.retain(|s| s.product_id != product_id);
        before - self.sales.len()
    }

    pub fn list_by_product(&self, product_id: ProductId) -> impl Iterator<Item = &Sale> {
        self.sales.iter().filter(move |s| s.product_id == product_id)
    }

    /// Newest-first projection for the sales list, each record paired with
    /// its ledger position (the argument [`remove_at`](Self::remove_at)
    /// takes). Ties keep insertion order.
    pub fn list_time_sorted(&self) -> Vec<(usize, &Sale)> {
        let mut sorted: Vec<(usize, &Sale)> = self.sales.iter().enumerate().collect();
        sorted.sort_by(|(_, a), (_, b)| b.timestamp.cmp(&a.timestamp));
        sorted
    }

    /// Removes the order record at `position` (insertion order).
    ///
    /// Inventory is not touched.
    pub fn remove_at(&mut self, position: usize) -> CoreResult<Sale> {
        if position >= self.sales.len() {
            return Err(CoreError::SaleRecordNotFound(position));
        }
        Ok(self.sales.remove(position))
    }

    /// Revenue from one product's sales.
    pub fn revenue_for_product(&self, product_id: ProductId) -> Money {
        self.list_by_product(product_id).map(Sale::line_total).sum()
    }

    /// Units of one product recorded in the ledger.
    pub fn units_for_product(&self, product_id: ProductId) -> i64 {
        self.list_by_product(product_id).map(|s| s.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn sale(product_id: ProductId, quantity: i64, price: i64, minute: i64) -> Sale {
        Sale {
            product_id,
            quantity,
            price: Money::from_major(price),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minute),
        }
    }

    #[test]
    fn test_append_and_list() {
        let mut ledger = SalesLedger::new();
        ledger.append(sale(1, 3, 150, 0)).unwrap();
        ledger.append(sale(2, 1, 80, 1)).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.list_all()[0].product_id, 1);
        assert_eq!(ledger.list_by_product(2).count(), 1);
    }

    #[test]
    fn test_append_rejects_impossible_records() {
        let mut ledger = SalesLedger::new();
        assert!(matches!(ledger.append(sale(1, 0, 150, 0)), Err(CoreError::InvalidSale(_))));
        assert!(matches!(ledger.append(sale(1, 2, 0, 0)), Err(CoreError::InvalidSale(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_discard_invalid_keeps_order_of_the_rest() {
        let mut ledger = SalesLedger::from_sales(vec![
            sale(1, 2, 150, 0),
            sale(1, 0, 150, 1),
            sale(2, 1, 80, 2),
            sale(2, 3, -80, 3),
        ]);

        assert_eq!(ledger.discard_invalid(), 2);
        let kept: Vec<_> = ledger.list_all().iter().map(|s| s.product_id).collect();
        assert_eq!(kept, vec![1, 2]);
        assert_eq!(ledger.discard_invalid(), 0);
    }

    #[test]
    fn test_cascade_only_touches_matching_product() {
        let mut ledger = SalesLedger::new();
        ledger.append(sale(1, 1, 10, 0)).unwrap();
        ledger.append(sale(2, 2, 20, 1)).unwrap();
        ledger.append(sale(1, 3, 10, 2)).unwrap();
        ledger.append(sale(3, 4, 30, 3)).unwrap();

        assert_eq!(ledger.cascade_delete_by_product(1), 2);
        let remaining: Vec<_> = ledger.list_all().iter().map(|s| s.product_id).collect();
        assert_eq!(remaining, vec![2, 3]);

        assert_eq!(ledger.cascade_delete_by_product(42), 0);
    }

    #[test]
    fn test_time_sorted_projection_is_newest_first() {
        let mut ledger = SalesLedger::new();
        ledger.append(sale(1, 1, 10, 5)).unwrap();
        ledger.append(sale(2, 1, 10, 1)).unwrap();
        ledger.append(sale(3, 1, 10, 9)).unwrap();

        let order: Vec<_> = ledger
            .list_time_sorted()
            .iter()
            .map(|(pos, s)| (*pos, s.product_id))
            .collect();
        assert_eq!(order, vec![(2, 3), (0, 1), (1, 2)]);
        // underlying ledger keeps insertion order
        assert_eq!(ledger.list_all()[0].product_id, 1);
    }

    #[test]
    fn test_remove_at() {
        let mut ledger = SalesLedger::new();
        ledger.append(sale(1, 1, 10, 0)).unwrap();
        ledger.append(sale(2, 2, 20, 1)).unwrap();

        let removed = ledger.remove_at(0).unwrap();
        assert_eq!(removed.product_id, 1);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.remove_at(5), Err(CoreError::SaleRecordNotFound(5)));
    }

    #[test]
    fn test_per_product_totals() {
        let mut ledger = SalesLedger::new();
        ledger.append(sale(1, 3, 150, 0)).unwrap();
        ledger.append(sale(1, 2, 120, 1)).unwrap();
        ledger.append(sale(2, 9, 1, 2)).unwrap();

        assert_eq!(ledger.revenue_for_product(1), Money::from_major(690));
        assert_eq!(ledger.units_for_product(1), 5);
        assert_eq!(ledger.revenue_for_product(7), Money::zero());
    }
}
