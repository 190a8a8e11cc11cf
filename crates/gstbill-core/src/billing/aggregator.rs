//! Roll line items up into bill totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::bill::{Bill, BillTotals, LineItem};
use crate::rules::amounts::round2;
use crate::rules::jurisdiction::TaxRegime;
use crate::rules::rounding::compute_rounding;
use crate::rules::tax::{compute_line, LineAmounts};
use crate::rules::words::to_words;

/// Aggregated tax components of a bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    pub regime: Option<TaxRegime>,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
}

/// Compute bill totals from line items.
///
/// Per-line amounts are summed at full precision; subtotal and tax are
/// rounded to 2 decimal places before the round-off is applied, so
/// `total == subtotal + tax_amount + rounding_amount` holds exactly.
pub fn recompute_all(items: &[LineItem], business_state: &str, customer_state: &str) -> BillTotals {
    let regime = TaxRegime::between(business_state, customer_state);
    totals_for(items.iter().map(|item| compute_line(item, regime)))
}

fn totals_for(lines: impl Iterator<Item = LineAmounts>) -> BillTotals {
    let (taxable, tax) = lines.fold((Decimal::ZERO, Decimal::ZERO), |(taxable, tax), line| {
        (add_saturating(taxable, line.taxable_amount), add_saturating(tax, line.tax_amount))
    });

    let subtotal = round2(taxable);
    let tax_amount = round2(tax);
    let rounding = compute_rounding(add_saturating(subtotal, tax_amount));

    BillTotals {
        subtotal,
        tax_amount,
        rounding_amount: rounding.rounding_amount,
        total: rounding.rounded_total,
    }
}

/// Sums beyond the `Decimal` range stick at its bound.
fn add_saturating(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        warn!("Bill total overflows ({} + {}), capping at the largest amount", a, b);
        a.saturating_add(b)
    })
}

/// Write each item's derived amounts (2 decimal places) for `regime`.
pub fn recompute_items(items: &mut [LineItem], regime: TaxRegime) {
    for item in items.iter_mut() {
        let amounts = compute_line(item, regime).rounded();
        item.taxable_amount = amounts.taxable_amount;
        item.cgst_amount = amounts.cgst_amount;
        item.sgst_amount = amounts.sgst_amount;
        item.igst_amount = amounts.igst_amount;
        item.tax_amount = amounts.tax_amount;
        item.total_amount = amounts.total_amount;
    }
}

/// Run the whole pipeline on a bill in place.
///
/// Updates every item's derived amounts, the totals and the amount in
/// words. Rates are not touched.
pub fn recompute_bill(bill: &mut Bill) -> TaxRegime {
    let regime = TaxRegime::between(&bill.business_info.state, &bill.customer_info.state);

    recompute_items(&mut bill.items, regime);
    bill.totals = totals_for(bill.items.iter().map(|item| compute_line(item, regime)));
    bill.amount_in_words = to_words(bill.totals.total);

    debug!(
        "Recomputed {} items ({:?}): subtotal={} tax={} rounding={} total={}",
        bill.items.len(),
        regime,
        bill.totals.subtotal,
        bill.totals.tax_amount,
        bill.totals.rounding_amount,
        bill.totals.total
    );

    regime
}

/// Per-component tax totals, for renderers.
pub fn tax_summary(bill: &Bill) -> TaxSummary {
    let regime = TaxRegime::between(&bill.business_info.state, &bill.customer_info.state);
    let mut summary = TaxSummary {
        regime: Some(regime),
        ..TaxSummary::default()
    };

    for item in &bill.items {
        let line = compute_line(item, regime);
        summary.cgst = add_saturating(summary.cgst, line.cgst_amount);
        summary.sgst = add_saturating(summary.sgst, line.sgst_amount);
        summary.igst = add_saturating(summary.igst, line.igst_amount);
    }

    summary.cgst = round2(summary.cgst);
    summary.sgst = round2(summary.sgst);
    summary.igst = round2(summary.igst);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bill::BillType;
    use crate::rules::tax::TaxRates;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn widget() -> LineItem {
        LineItem::new("Widget", "8471", dec("2"), dec("100"))
            .with_rates(TaxRates::new(dec("9"), dec("9"), dec("18")))
    }

    fn bill(business: &str, customer: &str, items: Vec<LineItem>) -> Bill {
        let mut bill = Bill::new(BillType::Invoice);
        bill.business_info.state = business.to_string();
        bill.customer_info.state = customer.to_string();
        bill.items = items;
        bill
    }

    #[test]
    fn test_same_state_end_to_end() {
        let mut bill = bill("Haryana (06)", "Haryana (06)", vec![widget()]);
        let regime = recompute_bill(&mut bill);

        assert_eq!(regime, TaxRegime::IntraState);
        let item = &bill.items[0];
        assert_eq!(item.taxable_amount, dec("200.00"));
        assert_eq!(item.tax_amount, dec("36.00"));
        assert_eq!(item.total_amount, dec("236.00"));
        assert_eq!(item.cgst_amount, dec("18.00"));
        assert_eq!(item.igst_amount, Decimal::ZERO);
        assert_eq!(bill.totals.total, dec("236"));
        assert_eq!(bill.totals.rounding_amount, Decimal::ZERO);
        assert_eq!(bill.amount_in_words, "Two Hundred Thirty Six Rupees Only");
    }

    #[test]
    fn test_different_state_end_to_end() {
        let mut bill = bill("Haryana (06)", "Delhi (07)", vec![widget()]);
        let regime = recompute_bill(&mut bill);

        assert_eq!(regime, TaxRegime::InterState);
        let item = &bill.items[0];
        assert_eq!(item.tax_amount, dec("36.00"));
        assert_eq!(item.total_amount, dec("236.00"));
        assert_eq!(item.igst_amount, dec("36.00"));
        assert_eq!(item.cgst_amount, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_applied_to_total() {
        let items = vec![
            LineItem::new("Tea", "0902", dec("3"), dec("33.33"))
                .with_rates(TaxRates::new(dec("2.5"), dec("2.5"), dec("5"))),
            LineItem::new("Cup", "6912", dec("1"), dec("49.99"))
                .with_discount(dec("5"))
                .with_rates(TaxRates::new(dec("6"), dec("6"), dec("12"))),
        ];

        let totals = recompute_all(&items, "Haryana (06)", "Haryana (06)");
        // 99.99 + 47.4905 = 147.4805 taxable; 4.9995 + 5.69886 = 10.69836 tax
        assert_eq!(totals.subtotal, dec("147.48"));
        assert_eq!(totals.tax_amount, dec("10.70"));
        assert_eq!(totals.total, dec("158"));
        assert_eq!(totals.rounding_amount, dec("-0.18"));
    }

    #[test]
    fn test_full_precision_aggregation() {
        // Each line's tax is 0.005; rounding per line first would give 0.03
        let items: Vec<LineItem> = (0..3)
            .map(|_| {
                LineItem::new("Bolt", "7318", dec("1"), dec("0.1"))
                    .with_rates(TaxRates::new(dec("2.5"), dec("2.5"), dec("0")))
            })
            .collect();

        let totals = recompute_all(&items, "Goa (30)", "Goa (30)");
        assert_eq!(totals.tax_amount, dec("0.02"));
        assert_eq!(totals.subtotal, dec("0.30"));
    }

    #[test]
    fn test_totals_invariants() {
        let items = vec![
            LineItem::new("A", "1", dec("7"), dec("13.37"))
                .with_discount(dec("3.5"))
                .with_rates(TaxRates::new(dec("9"), dec("9"), dec("18"))),
            LineItem::new("B", "2", dec("0.333"), dec("999.99"))
                .with_rates(TaxRates::new(dec("14"), dec("14"), dec("28"))),
        ];

        for (business, customer) in [("Haryana (06)", "Haryana (06)"), ("Haryana (06)", "Delhi (07)")] {
            let t = recompute_all(&items, business, customer);
            let grand = t.subtotal + t.tax_amount;
            assert_eq!(t.total - grand, t.rounding_amount);
            assert!((grand - t.total).abs() < Decimal::ONE);
            assert_eq!(t.total.fract(), Decimal::ZERO);
            assert_eq!(compute_rounding(grand).rounded_total, t.total);
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut first = bill("Haryana (06)", "Delhi (07)", vec![widget(), widget().with_discount(dec("12.5"))]);
        recompute_bill(&mut first);
        let mut second = first.clone();
        recompute_bill(&mut second);
        assert_eq!(first, second);

        let totals = recompute_all(&first.items, "Haryana (06)", "Delhi (07)");
        assert_eq!(totals, first.totals);
    }

    #[test]
    fn test_empty_bill() {
        let totals = recompute_all(&[], "Haryana (06)", "Haryana (06)");
        assert_eq!(totals, BillTotals::default());
    }

    #[test]
    fn test_overflowing_amounts_do_not_panic() {
        let mut huge = LineItem::new("Ingot", "7108", Decimal::MAX, dec("2"))
            .with_rates(TaxRates::new(dec("9"), dec("9"), dec("18")));
        let mut b = bill("Haryana (06)", "Delhi (07)", vec![huge.clone(), widget()]);
        recompute_bill(&mut b);

        // The overflowing line is zeroed, the rest of the bill still adds up
        assert_eq!(b.items[0].total_amount, Decimal::ZERO);
        assert_eq!(b.totals.total, dec("236"));

        // Each line fits, their sum does not
        huge.rate = Decimal::ONE;
        huge.set_rates(TaxRates::default());
        let totals = recompute_all(&[huge.clone(), huge], "Haryana (06)", "Delhi (07)");
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
        assert_eq!(totals.rounding_amount, Decimal::ZERO);
    }

    #[test]
    fn test_tax_summary() {
        let mut b = bill("Haryana (06)", "Haryana (06)", vec![widget(), widget()]);
        recompute_bill(&mut b);
        let summary = tax_summary(&b);
        assert_eq!(summary.regime, Some(TaxRegime::IntraState));
        assert_eq!(summary.cgst, dec("36.00"));
        assert_eq!(summary.sgst, dec("36.00"));
        assert_eq!(summary.igst, Decimal::ZERO);
    }
}
