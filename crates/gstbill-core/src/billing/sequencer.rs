//! Bill numbers: `PREFIX[/MARKER]/YYYY-YY/SEQ`, sequenced per fiscal year.
//!
//! Sequencing scans a snapshot of previously issued numbers and takes the
//! highest matching sequence plus one. There is no lock around issuance:
//! two writers working from the same snapshot will pick the same number.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::bill::{Bill, BillType};
use crate::models::config::NumberingConfig;
use crate::rules::fiscal::{parse_bill_date, FiscalYear};
use crate::store::BillStore;

/// Default segment separator.
pub const SEPARATOR: &str = "/";

/// A parsed bill number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillNumber {
    pub prefix: String,
    pub marker: Option<String>,
    pub fiscal_year: String,
    pub sequence: u32,
}

impl BillNumber {
    pub fn new(prefix: &str, marker: Option<&str>, fiscal_year: &str, sequence: u32) -> Self {
        Self {
            prefix: prefix.to_string(),
            marker: marker.map(str::to_string),
            fiscal_year: fiscal_year.to_string(),
            sequence,
        }
    }

    /// Parse a number using the default separator.
    pub fn parse(s: &str) -> Option<Self> {
        Self::parse_with(s, SEPARATOR)
    }

    /// Parse `PREFIX/FY/SEQ` or `PREFIX/MARKER/FY/SEQ`.
    ///
    /// Returns `None` for any other shape or a non-numeric sequence.
    pub fn parse_with(s: &str, separator: &str) -> Option<Self> {
        let parts: Vec<&str> = s.trim().split(separator).collect();
        let (prefix, marker, fiscal_year, seq) = match parts.as_slice() {
            [prefix, fy, seq] => (*prefix, None, *fy, *seq),
            [prefix, marker, fy, seq] => (*prefix, Some(*marker), *fy, *seq),
            _ => return None,
        };
        let sequence = seq.trim().parse().ok()?;
        Some(Self::new(prefix, marker, fiscal_year, sequence))
    }

    /// Join the segments with `separator`, omitting an absent marker.
    pub fn format_with(&self, separator: &str) -> String {
        format_bill_number_with(
            separator,
            &self.prefix,
            self.marker.as_deref(),
            &self.fiscal_year,
            self.sequence,
        )
    }

    /// Whether this number belongs to the given series.
    pub fn is_in_series(&self, prefix: &str, marker: Option<&str>, fiscal_year: &str) -> bool {
        self.prefix == prefix && self.marker.as_deref() == marker && self.fiscal_year == fiscal_year
    }
}

impl std::fmt::Display for BillNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_with(SEPARATOR))
    }
}

/// Format a bill number with the default separator.
pub fn format_bill_number(prefix: &str, marker: Option<&str>, fiscal_year: &str, sequence: u32) -> String {
    format_bill_number_with(SEPARATOR, prefix, marker, fiscal_year, sequence)
}

fn format_bill_number_with(
    separator: &str,
    prefix: &str,
    marker: Option<&str>,
    fiscal_year: &str,
    sequence: u32,
) -> String {
    let sequence = sequence.to_string();
    let mut segments = vec![prefix];
    segments.extend(marker);
    segments.push(fiscal_year);
    segments.push(&sequence);
    segments.join(separator)
}

/// Next sequence in a series, scanning previously issued numbers.
///
/// Numbers that do not parse, or belong to another prefix, marker or
/// fiscal year, are ignored. A sequence of `u32::MAX` has no successor and
/// is treated as malformed. Starts at 1.
pub fn next_sequence<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    prefix: &str,
    marker: Option<&str>,
    fiscal_year: &str,
) -> u32 {
    next_sequence_with(existing, SEPARATOR, prefix, marker, fiscal_year)
}

fn next_sequence_with<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    separator: &str,
    prefix: &str,
    marker: Option<&str>,
    fiscal_year: &str,
) -> u32 {
    let max = existing
        .into_iter()
        .filter_map(|s| {
            let parsed = BillNumber::parse_with(s, separator);
            if parsed.is_none() && !s.trim().is_empty() {
                debug!("Skipping malformed bill number {:?}", s);
            }
            parsed
        })
        .filter(|n| n.is_in_series(prefix, marker, fiscal_year))
        .filter(|n| {
            if n.sequence == u32::MAX {
                debug!("Skipping bill number {} with exhausted sequence", n);
            }
            n.sequence < u32::MAX
        })
        .map(|n| n.sequence)
        .max()
        .unwrap_or(0);

    max + 1
}

/// Trailing sequence of a bill number, 0 when it is not numeric.
pub fn sequence_of(bill_number: &str) -> u32 {
    bill_number
        .rsplit(SEPARATOR)
        .next()
        .and_then(|seq| seq.trim().parse().ok())
        .unwrap_or(0)
}

/// Order bills by sequence, then by full number.
pub fn sort_by_sequence(bills: &mut [Bill]) {
    bills.sort_by(|a, b| {
        sequence_of(&a.bill_number)
            .cmp(&sequence_of(&b.bill_number))
            .then_with(|| a.bill_number.cmp(&b.bill_number))
    });
}

/// Bills dated in the given calendar month.
pub fn bills_in_month(bills: &[Bill], year: i32, month: u32) -> Vec<&Bill> {
    bills
        .iter()
        .filter(|bill| {
            parse_bill_date(&bill.bill_date)
                .is_some_and(|d| d.year() == year && d.month() == month)
        })
        .collect()
}

/// Issues bill numbers according to a [`NumberingConfig`].
#[derive(Debug, Clone, Default)]
pub struct BillNumberSequencer {
    config: NumberingConfig,
}

impl BillNumberSequencer {
    pub fn new(config: NumberingConfig) -> Self {
        Self { config }
    }

    /// Marker segment for a bill type; invoices carry none.
    pub fn marker_for(&self, bill_type: BillType) -> Option<&str> {
        match bill_type {
            BillType::Estimate if !self.config.estimate_marker.is_empty() => {
                Some(self.config.estimate_marker.as_str())
            }
            _ => None,
        }
    }

    /// Next number for `bill_type` dated `date`, given the issued numbers.
    pub fn next_number<S: AsRef<str>>(
        &self,
        existing: &[S],
        bill_type: BillType,
        date: NaiveDate,
    ) -> BillNumber {
        let fiscal_year = FiscalYear::for_date(date).token();
        let marker = self.marker_for(bill_type);
        let sequence = next_sequence_with(
            existing.iter().map(|s| <S as AsRef<str>>::as_ref(s)),
            &self.config.separator,
            &self.config.prefix,
            marker,
            &fiscal_year,
        );
        BillNumber::new(&self.config.prefix, marker, &fiscal_year, sequence)
    }

    /// Format a number with the configured separator.
    pub fn format(&self, number: &BillNumber) -> String {
        number.format_with(&self.config.separator)
    }

    /// Give `bill` a number from the tenant's issued numbers.
    ///
    /// A bill whose current number already belongs to the right series
    /// (prefix, marker for its type, fiscal year of its date) keeps it.
    /// An unparseable bill date falls back to today.
    pub fn assign(&self, bill: &mut Bill, store: &dyn BillStore, tenant: &str) -> Result<BillNumber> {
        let fiscal_year = FiscalYear::for_date_str(&bill.bill_date);
        let marker = self.marker_for(bill.bill_type);

        if let Some(current) = BillNumber::parse_with(&bill.bill_number, &self.config.separator) {
            if current.is_in_series(&self.config.prefix, marker, &fiscal_year.token()) {
                return Ok(current);
            }
        }

        let existing = store.list_bill_numbers(tenant)?;
        let number = self.next_number(&existing, bill.bill_type, fiscal_year.first_day());
        bill.bill_number = self.format(&number);

        info!("Assigned bill number {} for tenant {}", bill.bill_number, tenant);
        Ok(number)
    }
}
