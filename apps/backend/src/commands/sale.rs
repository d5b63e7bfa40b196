//! # Sale Commands
//!
//! Selling from stock and managing the order records list.
//!
//! ## Sell Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SellRequest { productId: 1, quantity: 3, priceTier: "selling" }        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ledger::sell ─── stock check, price freeze, append ───► Sale           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist [products, sales]   ◄── both, stock and sales move together   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Records
//! `list_sales` shows sales newest first. Each row carries its `position` in
//! the underlying ledger; `delete_sale_record` takes that position back.
//! Removing a record does NOT return its units to stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::CommandResponse;
use crate::error::ApiError;
use crate::state::{DbState, LedgerState};
use shopkeep_core::{Money, PriceTier, ProductId, Sale};
use shopkeep_db::Namespace;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(default)]
    pub price_tier: PriceTier,
}

/// One row of the order records list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    /// Position in the sales ledger, used to delete this record.
    pub position: usize,
    pub product_id: ProductId,
    /// `None` once the product is gone.
    pub product_name: Option<String>,
    pub quantity: i64,
    pub price: Money,
    pub line_total: Money,
    pub timestamp: DateTime<Utc>,
}

pub async fn sell_product(
    db: &DbState,
    ledger: &LedgerState,
    request: SellRequest,
) -> Result<CommandResponse<Sale>, ApiError> {
    debug!(
        product_id = request.product_id,
        quantity = request.quantity,
        tier = ?request.price_tier,
        "sell_product command"
    );

    let mut ledger = ledger.lock().await;
    let sale = ledger.sell(
        request.product_id,
        request.quantity,
        request.price_tier,
        Utc::now(),
    )?;

    info!(
        product_id = sale.product_id,
        quantity = sale.quantity,
        total = %sale.line_total(),
        "Sale recorded"
    );

    let warning = db
        .persist(&ledger, &[Namespace::Products, Namespace::Sales])
        .await;
    Ok(CommandResponse::new(sale, warning))
}

/// Order records, newest first.
pub async fn list_sales(ledger: &LedgerState) -> Vec<SaleDto> {
    debug!("list_sales command");
    ledger
        .with_ledger(|l| {
            l.sales()
                .list_time_sorted()
                .into_iter()
                .map(|(position, sale)| SaleDto {
                    position,
                    product_id: sale.product_id,
                    product_name: l.inventory().get(sale.product_id).map(|p| p.name.clone()),
                    quantity: sale.quantity,
                    price: sale.price,
                    line_total: sale.line_total(),
                    timestamp: sale.timestamp,
                })
                .collect()
        })
        .await
}

/// Sales of one product in the order they were made.
pub async fn list_product_sales(ledger: &LedgerState, product_id: ProductId) -> Vec<Sale> {
    ledger
        .with_ledger(|l| l.sales().list_by_product(product_id).cloned().collect())
        .await
}

/// Removes the order record at `position`. Stock is left as it is.
pub async fn delete_sale_record(
    db: &DbState,
    ledger: &LedgerState,
    position: usize,
) -> Result<CommandResponse<Sale>, ApiError> {
    debug!(position, "delete_sale_record command");

    let mut ledger = ledger.lock().await;
    let removed = ledger.delete_sale_record(position)?;

    info!(
        position,
        product_id = removed.product_id,
        quantity = removed.quantity,
        "Sale record removed"
    );

    let warning = db.persist(&ledger, &[Namespace::Sales]).await;
    Ok(CommandResponse::new(removed, warning))
}
