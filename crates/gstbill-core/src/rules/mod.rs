//! Pure GST billing rules: jurisdictions, tax, rounding, amounts and words.

pub mod patterns;
pub mod jurisdiction;
pub mod tax;
pub mod rounding;
pub mod amounts;
pub mod words;
pub mod fiscal;

pub use jurisdiction::{extract_code, is_same_jurisdiction, lookup_by_code, Jurisdiction, TaxRegime, INDIAN_STATES};
pub use tax::{compute_line, sync_inactive_rates, taxable_amount, LineAmounts, TaxRates};
pub use rounding::{compute_rounding, Rounding};
pub use amounts::{format_inr, parse_amount, round2};
pub use words::to_words;
pub use fiscal::{parse_bill_date, FiscalYear};
