//! GST computation for a single line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::bill::LineItem;

use super::amounts::round2;
use super::jurisdiction::TaxRegime;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// CGST/SGST/IGST percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRates {
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
}

impl TaxRates {
    pub fn new(cgst: Decimal, sgst: Decimal, igst: Decimal) -> Self {
        Self { cgst, sgst, igst }
    }

    /// Split a combined catalogue rate for the given regime.
    ///
    /// Intra-state puts half into CGST and half into SGST; inter-state puts
    /// the whole rate into IGST.
    pub fn split_combined(rate: Decimal, regime: TaxRegime) -> Self {
        match regime {
            TaxRegime::IntraState => {
                let half = rate / Decimal::TWO;
                Self::new(half, half, Decimal::ZERO)
            }
            TaxRegime::InterState => Self::new(Decimal::ZERO, Decimal::ZERO, rate),
        }
    }

    /// Percentage that applies under the regime.
    pub fn active_rate(&self, regime: TaxRegime) -> Decimal {
        match regime {
            TaxRegime::IntraState => self.cgst.saturating_add(self.sgst),
            TaxRegime::InterState => self.igst,
        }
    }
}

/// Derived amounts for one line, at full precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    pub taxable_amount: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl LineAmounts {
    /// Same amounts rounded to 2 decimal places for display and storage.
    pub fn rounded(&self) -> Self {
        Self {
            taxable_amount: round2(self.taxable_amount),
            cgst_amount: round2(self.cgst_amount),
            sgst_amount: round2(self.sgst_amount),
            igst_amount: round2(self.igst_amount),
            tax_amount: round2(self.tax_amount),
            total_amount: round2(self.total_amount),
        }
    }
}

/// Taxable value: quantity x rate less the discount, never below zero.
///
/// The discount percentage is used as given, even outside 0..=100.
/// `None` when the amount does not fit in a `Decimal`.
pub fn taxable_amount(quantity: Decimal, rate: Decimal, discount_percent: Decimal) -> Option<Decimal> {
    let gross = quantity.checked_mul(rate)?;
    let discount = gross.checked_mul(discount_percent)?.checked_div(HUNDRED)?;
    let taxable = gross.checked_sub(discount)?;
    Some(taxable.max(Decimal::ZERO))
}

/// Compute taxable, tax and total amounts for a line item.
///
/// Only the components active under `regime` contribute; the others are
/// reported as zero whatever their stored percentage. A line whose amounts
/// overflow is counted as zero.
pub fn compute_line(item: &LineItem, regime: TaxRegime) -> LineAmounts {
    checked_line(item, regime).unwrap_or_else(|| {
        warn!(
            "Amounts for item {:?} overflow (quantity={} rate={}), counting it as zero",
            item.name, item.quantity, item.rate
        );
        LineAmounts::default()
    })
}

fn checked_line(item: &LineItem, regime: TaxRegime) -> Option<LineAmounts> {
    let taxable = taxable_amount(item.quantity, item.rate, item.discount)?;
    let rates = item.rates();
    let percent_of = |rate: Decimal| taxable.checked_mul(rate)?.checked_div(HUNDRED);

    let (cgst_amount, sgst_amount, igst_amount) = match regime {
        TaxRegime::IntraState => (percent_of(rates.cgst)?, percent_of(rates.sgst)?, Decimal::ZERO),
        TaxRegime::InterState => (Decimal::ZERO, Decimal::ZERO, percent_of(rates.igst)?),
    };
    let tax_amount = cgst_amount.checked_add(sgst_amount)?.checked_add(igst_amount)?;

    Some(LineAmounts {
        taxable_amount: taxable,
        cgst_amount,
        sgst_amount,
        igst_amount,
        tax_amount,
        total_amount: taxable.checked_add(tax_amount)?,
    })
}

/// Keep the inactive side's stored rate in step with the active one.
///
/// Intra-state: IGST mirrors CGST + SGST. Inter-state: a zero IGST is
/// filled from CGST + SGST, a non-zero IGST is left alone.
pub fn sync_inactive_rates(item: &mut LineItem, regime: TaxRegime) {
    let combined = item.cgst.saturating_add(item.sgst);
    match regime {
        TaxRegime::IntraState => item.igst = round2(combined),
        TaxRegime::InterState if item.igst.is_zero() => item.igst = round2(combined),
        TaxRegime::InterState => {}
    }
}
