//! Read access to previously issued bill numbers.
//!
//! Persistence is owned elsewhere; the engine only needs a snapshot of the
//! numbers a tenant has already issued.

mod json_dir;
mod memory;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Source of issued bill numbers.
pub trait BillStore {
    /// All bill numbers (invoices and estimates) owned by `tenant`, unordered.
    fn list_bill_numbers(&self, tenant: &str) -> Result<Vec<String>>;
}
