//! # Customer Directory
//!
//! The shop's contact list. Independent of products, sales and expenses and
//! not part of reconciliation.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{next_id, Customer, CustomerId};
use crate::validation::CustomerDraft;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_customers(customers: Vec<Customer>) -> Self {
        CustomerDirectory { customers }
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn create(&mut self, draft: &CustomerDraft) -> Customer {
        let customer = Customer {
            id: next_id(self.customers.iter().map(|c| c.id)),
            name: draft.name().to_string(),
            email: draft.email().to_string(),
            phone: draft.phone().to_string(),
        };
        self.customers.push(customer.clone());
        customer
    }

    pub fn edit(&mut self, id: CustomerId, draft: &CustomerDraft) -> CoreResult<Customer> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CoreError::CustomerNotFound(id))?;
        customer.name = draft.name().to_string();
        customer.email = draft.email().to_string();
        customer.phone = draft.phone().to_string();
        Ok(customer.clone())
    }

    pub fn delete(&mut self, id: CustomerId) -> CoreResult<Customer> {
        let index = self
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::CustomerNotFound(id))?;
        Ok(self.customers.remove(index))
    }
}
