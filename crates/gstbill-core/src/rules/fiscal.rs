//! Indian fiscal year (April to March) handling.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::patterns::ISO_DATE;

/// Month in which the fiscal year starts.
const FISCAL_START_MONTH: u32 = 4;

/// A fiscal year, identified by the calendar year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalYear {
    pub start_year: i32,
}

impl FiscalYear {
    /// Fiscal year containing `date`. January to March belong to the
    /// year that started the previous April.
    pub fn for_date(date: NaiveDate) -> Self {
        let start_year = if date.month() >= FISCAL_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start_year }
    }

    /// Fiscal year for a `YYYY-MM-DD` string, falling back to today.
    pub fn for_date_str(date: &str) -> Self {
        Self::for_date(parse_bill_date(date).unwrap_or_else(|| {
            warn!("Invalid bill date {:?}, using current date", date);
            today()
        }))
    }

    /// Token used in bill numbers, e.g. "2025-26".
    pub fn token(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }

    /// Parse a "YYYY-YY" token. The short year must follow the start year.
    pub fn parse_token(token: &str) -> Option<Self> {
        let (start, end) = token.split_once('-')?;
        if start.len() != 4 || end.len() != 2 {
            return None;
        }
        let start_year: i32 = start.parse().ok()?;
        let end_short: i32 = end.parse().ok()?;
        ((start_year + 1).rem_euclid(100) == end_short).then_some(Self { start_year })
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, FISCAL_START_MONTH, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year + 1, FISCAL_START_MONTH - 1, 31)
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::for_date(date) == *self
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token())
    }
}

/// Parse the date part of a bill date ("2025-03-15" or "2025-03-15T10:00:00Z").
pub fn parse_bill_date(s: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(s)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
