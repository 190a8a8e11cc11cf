//! Core library for GST billing.
//!
//! This crate provides:
//! - Jurisdiction (state code) matching and CGST/SGST vs IGST selection
//! - Per-item tax computation and bill-level aggregation with round-off
//! - Fiscal-year bill numbering for invoices and estimates
//! - Amount in words using lakh/crore grouping
//! - Bill data models, configuration and a read-only bill number store

pub mod error;
pub mod models;
pub mod rules;
pub mod billing;
pub mod store;

pub use error::{BillingError, Result, StoreError, ValidationError};
pub use models::bill::{Bill, BillTotals, BillType, LineItem, Template};
pub use models::config::BillingConfig;
pub use rules::{FiscalYear, Jurisdiction, TaxRates, TaxRegime};
pub use rules::words::to_words;
pub use billing::{recompute_all, recompute_bill, BillNumber, BillNumberSequencer};
pub use store::{BillStore, JsonDirStore, MemoryStore};
