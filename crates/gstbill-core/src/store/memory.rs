//! In-memory bill number store.

use std::collections::HashMap;

use crate::error::Result;

use super::BillStore;

/// Bill numbers kept in memory, per tenant.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    numbers: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issued number for a tenant.
    pub fn insert(&mut self, tenant: &str, bill_number: impl Into<String>) {
        self.numbers
            .entry(tenant.to_string())
            .or_default()
            .push(bill_number.into());
    }
}

impl BillStore for MemoryStore {
    fn list_bill_numbers(&self, tenant: &str) -> Result<Vec<String>> {
        Ok(self.numbers.get(tenant).cloned().unwrap_or_default())
    }
}
