//! Data models for bills and configuration.

pub mod bill;
pub mod config;

pub use bill::{BankDetails, Bill, BillTotals, BillType, BusinessInfo, CustomerInfo, LineItem, ShippingInfo, Template};
pub use config::BillingConfig;
