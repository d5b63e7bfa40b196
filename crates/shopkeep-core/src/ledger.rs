//! # Ledger
//!
//! The owned state container: one value holding every store, passed
//! explicitly to whoever runs commands. Tests build as many as they like.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  form ──► validation ──► store mutation ──► (caller persists)          │
//! │                │                 │                                      │
//! │                ▼                 ▼                                      │
//! │          FieldErrors        CoreError                                   │
//! │                                                                         │
//! │  Any Err leaves every store exactly as it was.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sell Atomicity
//! `sell` takes stock off the shelf, then appends the sale. If the append is
//! refused the stock is put back before the error is returned, so a failed
//! sell never leaves one side applied without the other.

use chrono::{DateTime, Utc};

use crate::customers::CustomerDirectory;
use crate::error::CoreResult;
use crate::expenses::ExpenseLedger;
use crate::inventory::Inventory;
use crate::money::Money;
use crate::reconciliation::FinancialSummary;
use crate::sales::SalesLedger;
use crate::types::{Customer, CustomerId, Expense, ExpenseId, PriceTier, Product, ProductId, Sale};
use crate::validation::{
    parse_customer, parse_expense, parse_product, CustomerForm, ExpenseDraft, ExpenseForm,
    ProductForm,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    inventory: Inventory,
    sales: SalesLedger,
    expenses: ExpenseLedger,
    customers: CustomerDirectory,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a ledger from separately loaded stores.
    pub fn from_parts(
        inventory: Inventory,
        sales: SalesLedger,
        expenses: ExpenseLedger,
        customers: CustomerDirectory,
    ) -> Self {
        Ledger {
            inventory,
            sales,
            expenses,
            customers,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn sales(&self) -> &SalesLedger {
        &self.sales
    }

    pub fn expenses(&self) -> &ExpenseLedger {
        &self.expenses
    }

    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub fn add_product(&mut self, form: &ProductForm) -> CoreResult<Product> {
        let draft = parse_product(form)?;
        Ok(self.inventory.create(&draft))
    }

    /// Full replace; the product is re-stocked to the form's stock.
    pub fn edit_product(&mut self, id: ProductId, form: &ProductForm) -> CoreResult<Product> {
        let draft = parse_product(form)?;
        self.inventory.edit(id, &draft)
    }

    /// Deletes a product and every sale recorded against it.
    ///
    /// Returns the product and the number of sales removed with it.
    pub fn delete_product(&mut self, id: ProductId) -> CoreResult<(Product, usize)> {
        let product = self.inventory.delete(id)?;
        let removed = self.sales.cascade_delete_by_product(id);
        Ok((product, removed))
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Sells `quantity` units at the `tier` price and records the sale.
    pub fn sell(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        tier: PriceTier,
        at: DateTime<Utc>,
    ) -> CoreResult<Sale> {
        let price = self.inventory.sell(product_id, quantity, tier)?;
        let sale = Sale {
            product_id,
            quantity,
            price,
            timestamp: at,
        };

        if let Err(err) = self.sales.append(sale.clone()) {
            self.inventory.restore_stock(product_id, quantity)?;
            return Err(err);
        }

        Ok(sale)
    }

    /// Removes one order record from the sales list. Stock is not restored.
    pub fn delete_sale_record(&mut self, position: usize) -> CoreResult<Sale> {
        self.sales.remove_at(position)
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    pub fn record_expense(&mut self, form: &ExpenseForm, at: DateTime<Utc>) -> CoreResult<Expense> {
        let draft = parse_expense(form)?;
        Ok(self.expenses.append(draft, at))
    }

    /// One-tap expense without a form. Category and amount rules still apply.
    pub fn quick_expense(
        &mut self,
        category: &str,
        amount: Money,
        at: DateTime<Utc>,
    ) -> CoreResult<Expense> {
        let draft = ExpenseDraft::quick(category, amount)?;
        Ok(self.expenses.append(draft, at))
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> CoreResult<Expense> {
        self.expenses.delete(id)
    }

    // =========================================================================
    // Customers
    // =========================================================================

    pub fn add_customer(&mut self, form: &CustomerForm) -> CoreResult<Customer> {
        let draft = parse_customer(form)?;
        Ok(self.customers.create(&draft))
    }

    pub fn edit_customer(&mut self, id: CustomerId, form: &CustomerForm) -> CoreResult<Customer> {
        let draft = parse_customer(form)?;
        self.customers.edit(id, &draft)
    }

    pub fn delete_customer(&mut self, id: CustomerId) -> CoreResult<Customer> {
        self.customers.delete(id)
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Recomputed from scratch on every call.
    pub fn summary(&self) -> FinancialSummary {
        FinancialSummary::compute(
            self.inventory.products(),
            self.sales.list_all(),
            self.expenses.list_all(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn widget_form() -> ProductForm {
        ProductForm {
            name: "Widget".into(),
            cost_price: "100".into(),
            selling_price: "150".into(),
            discounted_price: "120".into(),
            stock: "10".into(),
        }
    }

    fn gadget_form() -> ProductForm {
        ProductForm {
            name: "Gadget".into(),
            cost_price: "20".into(),
            selling_price: "35.50".into(),
            discounted_price: "25".into(),
            stock: "4".into(),
        }
    }

    #[test]
    fn test_widget_scenario() {
        let mut ledger = Ledger::new();

        let widget = ledger.add_product(&widget_form()).unwrap();
        assert_eq!(widget.stock, 10);
        assert_eq!(widget.original_stock, 10);
        assert_eq!(ledger.summary().total_investment, Money::from_major(1000));

        let sale = ledger.sell(widget.id, 3, PriceTier::Selling, Utc::now()).unwrap();
        assert_eq!(sale.quantity, 3);
        assert_eq!(sale.price, Money::from_major(150));
        assert_eq!(ledger.inventory().get(widget.id).unwrap().stock, 7);
        assert_eq!(ledger.sales().len(), 1);

        let summary = ledger.summary();
        assert_eq!(summary.total_revenue, Money::from_major(450));
        assert_eq!(summary.cost_of_sold_items, Money::from_major(300));
        assert_eq!(summary.profit, Money::from_major(150));

        let (_, removed) = ledger.delete_product(widget.id).unwrap();
        assert_eq!(removed, 1);
        assert!(ledger.inventory().is_empty());
        assert!(ledger.sales().is_empty());
        assert_eq!(ledger.summary(), FinancialSummary::default());
    }

    #[test]
    fn test_expense_without_sales_goes_negative() {
        let mut ledger = Ledger::new();
        let form = ExpenseForm {
            category: "Food".into(),
            amount: "10000".into(),
            description: String::new(),
        };
        ledger.record_expense(&form, Utc::now()).unwrap();

        assert_eq!(ledger.summary().available_cash, Money::from_major(-10_000));
    }

    #[test]
    fn test_oversell_is_rejected_without_side_effects() {
        let mut ledger = Ledger::new();
        let mut form = widget_form();
        form.stock = "2".into();
        let p = ledger.add_product(&form).unwrap();
        let before = ledger.clone();

        let result = ledger.sell(p.id, 5, PriceTier::Selling, Utc::now());
        assert!(matches!(result, Err(CoreError::InsufficientStock { available: 2, requested: 5, .. })));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_sell_rolls_back_when_sale_is_refused() {
        // Loaded data can hold a product no form would accept.
        let broken = Product {
            id: 1,
            name: "Free sample".into(),
            cost_price: Money::zero(),
            selling_price: Money::zero(),
            discounted_price: Money::zero(),
            stock: 3,
            original_stock: 3,
        };
        let mut ledger = Ledger::from_parts(
            Inventory::from_products(vec![broken]),
            SalesLedger::new(),
            ExpenseLedger::new(),
            CustomerDirectory::new(),
        );

        let result = ledger.sell(1, 2, PriceTier::Selling, Utc::now());
        assert!(matches!(result, Err(CoreError::InvalidSale(_))));
        assert_eq!(ledger.inventory().get(1).unwrap().stock, 3);
        assert!(ledger.sales().is_empty());
    }

    #[test]
    fn test_cascade_leaves_other_products_alone() {
        let mut ledger = Ledger::new();
        let w = ledger.add_product(&widget_form()).unwrap();
        let g = ledger.add_product(&gadget_form()).unwrap();
        ledger.sell(w.id, 1, PriceTier::Selling, Utc::now()).unwrap();
        ledger.sell(g.id, 2, PriceTier::Discounted, Utc::now()).unwrap();
        ledger.sell(w.id, 2, PriceTier::Discounted, Utc::now()).unwrap();

        ledger.delete_product(w.id).unwrap();

        assert_eq!(ledger.sales().len(), 1);
        assert_eq!(ledger.sales().list_all()[0].product_id, g.id);
        assert_eq!(ledger.inventory().get(g.id).unwrap().stock, 2);
        assert_eq!(ledger.summary().total_revenue, Money::from_major(50));
    }

    #[test]
    fn test_removing_order_record_keeps_stock() {
        let mut ledger = Ledger::new();
        let w = ledger.add_product(&widget_form()).unwrap();
        ledger.sell(w.id, 3, PriceTier::Selling, Utc::now()).unwrap();

        let removed = ledger.delete_sale_record(0).unwrap();
        assert_eq!(removed.quantity, 3);

        let summary = ledger.summary();
        assert_eq!(ledger.inventory().get(w.id).unwrap().stock, 7);
        assert_eq!(summary.total_revenue, Money::zero());
        assert_eq!(summary.cost_of_sold_items, Money::from_major(300));
        assert_eq!(summary.profit, Money::from_major(-300));
    }

    #[test]
    fn test_invalid_forms_do_not_mutate() {
        let mut ledger = Ledger::new();
        let mut form = widget_form();
        form.selling_price = "90".into();
        form.name = "  ".into();

        match ledger.add_product(&form) {
            Err(CoreError::Validation(errors)) => {
                assert!(errors.contains("name"));
                assert!(errors.contains("sellingPrice"));
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(ledger.inventory().is_empty());

        assert!(ledger.quick_expense(" ", Money::from_major(5), Utc::now()).is_err());
        assert!(ledger.quick_expense("Food", Money::zero(), Utc::now()).is_err());
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_oversized_stock_is_rejected_before_it_reaches_the_summary() {
        let mut ledger = Ledger::new();
        let mut form = widget_form();
        form.stock = "100000000000000000".into();

        match ledger.add_product(&form) {
            Err(CoreError::Validation(errors)) => assert!(errors.contains("stock")),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(ledger.summary(), FinancialSummary::default());

        // a full shelf of products at every limit still totals exactly
        let mut form = widget_form();
        form.cost_price = "9999999".into();
        form.selling_price = "10000000".into();
        form.discounted_price = "10000000".into();
        form.stock = "1000000".into();
        for _ in 0..100 {
            ledger.add_product(&form).unwrap();
        }
        let per_product = Money::from_major(9_999_999).multiply_quantity(1_000_000);
        assert_eq!(
            ledger.summary().total_investment,
            per_product.multiply_quantity(100)
        );
    }

    #[test]
    fn test_edit_restocks_without_replaying_sales() {
        let mut ledger = Ledger::new();
        let w = ledger.add_product(&widget_form()).unwrap();
        ledger.sell(w.id, 4, PriceTier::Selling, Utc::now()).unwrap();

        let mut form = ProductForm::from_product(ledger.inventory().get(w.id).unwrap());
        assert_eq!(form.stock, "6");
        form.stock = "12".into();
        let edited = ledger.edit_product(w.id, &form).unwrap();

        assert_eq!(edited.stock, 12);
        assert_eq!(edited.original_stock, 12);
        assert_eq!(ledger.sales().len(), 1);
        assert_eq!(ledger.summary().cost_of_sold_items, Money::zero());
    }

    #[test]
    fn test_stock_invariant_holds_through_mixed_commands() {
        let mut ledger = Ledger::new();
        let w = ledger.add_product(&widget_form()).unwrap();
        let g = ledger.add_product(&gadget_form()).unwrap();

        let steps: [(ProductId, i64); 8] =
            [(w.id, 4), (g.id, 5), (g.id, 4), (w.id, 0), (w.id, 6), (w.id, 1), (g.id, 1), (99, 1)];
        for (id, qty) in steps {
            let _ = ledger.sell(id, qty, PriceTier::Selling, Utc::now());
            for p in ledger.inventory().products() {
                assert!(p.stock >= 0 && p.stock <= p.original_stock);
            }
        }
        assert!(ledger.summary().all_sold);
        assert_eq!(ledger.sales().len(), 3);
    }

    #[test]
    fn test_customers_do_not_affect_summary() {
        let mut ledger = Ledger::new();
        let form = CustomerForm {
            name: "Aziz".into(),
            email: "aziz@example.uz".into(),
            phone: "+998 90 000 00 00".into(),
        };
        let c = ledger.add_customer(&form).unwrap();
        assert_eq!(ledger.summary(), FinancialSummary::default());

        ledger.delete_customer(c.id).unwrap();
        assert_eq!(ledger.delete_customer(c.id), Err(CoreError::CustomerNotFound(c.id)));
    }
}
