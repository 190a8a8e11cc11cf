//! Round-off of a bill's grand total to whole rupees.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::amounts::round2;

/// Result of rounding a grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rounding {
    /// Grand total rounded to the nearest rupee.
    pub rounded_total: Decimal,
    /// Signed adjustment (`rounded_total - grand_total`), 2 decimal places.
    pub rounding_amount: Decimal,
}

/// Round a grand total to the nearest whole rupee, halves away from zero.
pub fn compute_rounding(grand_total: Decimal) -> Rounding {
    let rounded_total =
        grand_total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Rounding {
        rounded_total,
        rounding_amount: round2(rounded_total - grand_total),
    }
}
