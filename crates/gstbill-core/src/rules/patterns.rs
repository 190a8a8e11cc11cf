//! Common regex patterns for jurisdiction labels and amounts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Jurisdiction code: digits inside parentheses, e.g. "Haryana (06)"
    pub static ref STATE_CODE: Regex = Regex::new(
        r"\((\d+)\)"
    ).unwrap();

    // Region name: everything before the code
    pub static ref STATE_NAME: Regex = Regex::new(
        r"^\s*(.*?)\s*\(\d+\)"
    ).unwrap();

    // Characters allowed in a lenient amount ("₹ 1,00,053.75", "-12.5")
    pub static ref AMOUNT_NOISE: Regex = Regex::new(
        r"[^\d.\-]"
    ).unwrap();

    // Plain ISO date used by bill records
    pub static ref ISO_DATE: Regex = Regex::new(
        r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})"
    ).unwrap();
}
