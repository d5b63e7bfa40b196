//! # Customer Commands
//!
//! The shop's contact list. Customers are not linked to sales and never
//! show up in the financial summary.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::commands::CommandResponse;
use crate::error::ApiError;
use crate::state::{DbState, LedgerState};
use shopkeep_core::validation::validate_customer;
use shopkeep_core::{CoreError, Customer, CustomerForm, CustomerId};
use shopkeep_db::Namespace;

pub async fn list_customers(ledger: &LedgerState) -> Vec<Customer> {
    debug!("list_customers command");
    ledger.with_ledger(|l| l.customers().list().to_vec()).await
}

pub async fn get_customer_form(
    ledger: &LedgerState,
    id: CustomerId,
) -> Result<CustomerForm, ApiError> {
    ledger
        .with_ledger(|l| l.customers().get(id).map(CustomerForm::from_customer))
        .await
        .ok_or_else(|| CoreError::CustomerNotFound(id).into())
}

pub fn validate_customer_form(form: &CustomerForm) -> BTreeMap<String, String> {
    validate_customer(form).messages()
}

pub async fn add_customer(
    db: &DbState,
    ledger: &LedgerState,
    form: CustomerForm,
) -> Result<CommandResponse<Customer>, ApiError> {
    debug!("add_customer command");

    let mut ledger = ledger.lock().await;
    let customer = ledger.add_customer(&form)?;

    info!(customer_id = customer.id, "Customer added");

    let warning = db.persist(&ledger, &[Namespace::Customers]).await;
    Ok(CommandResponse::new(customer, warning))
}

pub async fn edit_customer(
    db: &DbState,
    ledger: &LedgerState,
    id: CustomerId,
    form: CustomerForm,
) -> Result<CommandResponse<Customer>, ApiError> {
    debug!(customer_id = id, "edit_customer command");

    let mut ledger = ledger.lock().await;
    let customer = ledger.edit_customer(id, &form)?;

    info!(customer_id = id, "Customer edited");

    let warning = db.persist(&ledger, &[Namespace::Customers]).await;
    Ok(CommandResponse::new(customer, warning))
}

pub async fn delete_customer(
    db: &DbState,
    ledger: &LedgerState,
    id: CustomerId,
) -> Result<CommandResponse<Customer>, ApiError> {
    debug!(customer_id = id, "delete_customer command");

    let mut ledger = ledger.lock().await;
    let removed = ledger.delete_customer(id)?;

    info!(customer_id = id, "Customer deleted");

    let warning = db.persist(&ledger, &[Namespace::Customers]).await;
    Ok(CommandResponse::new(removed, warning))
}
