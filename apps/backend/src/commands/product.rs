//! # Product Commands
//!
//! Product CRUD and the rows of the product list.
//!
//! ## Product Row
//! ```text
//! ┌──────────┬──────┬──────┬──────┬────────┬──────┬──────────┬─────────┐
//! │ Name     │ Cost │ Sell │ Disc │ Stock  │ Sold │ Budget   │ Revenue │
//! ├──────────┼──────┼──────┼──────┼────────┼──────┼──────────┼─────────┤
//! │ Widget   │ 100  │ 150  │ 120  │ 7 / 10 │ 3    │ 700      │ 450     │
//! └──────────┴──────┴──────┴──────┴────────┴──────┴──────────┴─────────┘
//!   budget  = costPrice × stock        (remaining stock value)
//!   revenue = Σ this product's sales   (from the sales ledger)
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::commands::CommandResponse;
use crate::error::ApiError;
use crate::state::{DbState, LedgerState};
use shopkeep_core::validation::validate_product;
use shopkeep_core::{CoreError, Money, Product, ProductForm, ProductId, SalesLedger};
use shopkeep_db::Namespace;

/// A product with the figures the product list shows next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub cost_price: Money,
    pub selling_price: Money,
    pub discounted_price: Money,
    pub stock: i64,
    pub original_stock: i64,
    pub units_sold: i64,
    /// Cost of the units still on the shelf.
    pub remaining_value: Money,
    pub revenue: Money,
    pub sold_out: bool,
}

impl ProductDto {
    fn build(product: &Product, sales: &SalesLedger) -> Self {
        ProductDto {
            id: product.id,
            name: product.name.clone(),
            cost_price: product.cost_price,
            selling_price: product.selling_price,
            discounted_price: product.discounted_price,
            stock: product.stock,
            original_stock: product.original_stock,
            units_sold: product.units_sold(),
            remaining_value: product.remaining_value(),
            revenue: sales.revenue_for_product(product.id),
            sold_out: product.is_sold_out(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProduct {
    pub id: ProductId,
    pub removed_sales: usize,
}

/// Lists all products in insertion order.
pub async fn list_products(ledger: &LedgerState) -> Vec<ProductDto> {
    debug!("list_products command");
    ledger
        .with_ledger(|l| {
            l.inventory()
                .products()
                .iter()
                .map(|p| ProductDto::build(p, l.sales()))
                .collect()
        })
        .await
}

pub async fn get_product(ledger: &LedgerState, id: ProductId) -> Result<ProductDto, ApiError> {
    debug!(product_id = id, "get_product command");
    ledger
        .with_ledger(|l| {
            l.inventory()
                .get(id)
                .map(|p| ProductDto::build(p, l.sales()))
                .ok_or(CoreError::ProductNotFound(id))
        })
        .await
        .map_err(ApiError::from)
}

/// The edit form pre-filled from the product's current values.
pub async fn get_product_form(ledger: &LedgerState, id: ProductId) -> Result<ProductForm, ApiError> {
    ledger
        .with_ledger(|l| l.inventory().get(id).map(ProductForm::from_product))
        .await
        .ok_or_else(|| CoreError::ProductNotFound(id).into())
}

/// Live form feedback: field → message, empty when the form is valid.
pub fn validate_product_form(form: &ProductForm) -> BTreeMap<String, String> {
    validate_product(form).messages()
}

pub async fn add_product(
    db: &DbState,
    ledger: &LedgerState,
    form: ProductForm,
) -> Result<CommandResponse<ProductDto>, ApiError> {
    debug!(name = %form.name, "add_product command");

    let mut ledger = ledger.lock().await;
    let product = ledger.add_product(&form)?;

    info!(product_id = product.id, stock = product.stock, "Product added");

    let warning = db.persist(&ledger, &[Namespace::Products]).await;
    Ok(CommandResponse::new(ProductDto::build(&product, ledger.sales()), warning))
}

/// Replaces a product's fields and re-stocks it to the form's stock.
pub async fn edit_product(
    db: &DbState,
    ledger: &LedgerState,
    id: ProductId,
    form: ProductForm,
) -> Result<CommandResponse<ProductDto>, ApiError> {
    debug!(product_id = id, "edit_product command");

    let mut ledger = ledger.lock().await;
    let product = ledger.edit_product(id, &form)?;

    info!(product_id = id, stock = product.stock, "Product edited");

    let warning = db.persist(&ledger, &[Namespace::Products]).await;
    Ok(CommandResponse::new(ProductDto::build(&product, ledger.sales()), warning))
}

/// Deletes a product together with its sales.
pub async fn delete_product(
    db: &DbState,
    ledger: &LedgerState,
    id: ProductId,
) -> Result<CommandResponse<DeletedProduct>, ApiError> {
    debug!(product_id = id, "delete_product command");

    let mut ledger = ledger.lock().await;
    let (_, removed_sales) = ledger.delete_product(id)?;

    info!(product_id = id, removed_sales, "Product deleted");

    let warning = db
        .persist(&ledger, &[Namespace::Products, Namespace::Sales])
        .await;
    Ok(CommandResponse::new(DeletedProduct { id, removed_sales }, warning))
}
