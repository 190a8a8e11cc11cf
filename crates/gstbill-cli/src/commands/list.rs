//! List command - issued bills from a store, for a month or a fiscal year.

use std::path::PathBuf;

use chrono::Datelike;
use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::debug;

use gstbill_core::billing::{bills_in_month, sort_by_sequence};
use gstbill_core::models::bill::Bill;
use gstbill_core::rules::amounts::format_inr;
use gstbill_core::rules::fiscal::{parse_bill_date, FiscalYear};
use gstbill_core::store::JsonDirStore;

use super::config::load_config;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Bill store directory
    #[arg(long, required = true)]
    store: PathBuf,

    /// Tenant whose bills are listed
    #[arg(long, default_value = "default")]
    tenant: String,

    /// Only bills dated in this month (YYYY-MM)
    #[arg(short, long, conflicts_with = "fiscal_year")]
    month: Option<String>,

    /// Only bills dated in this fiscal year (e.g. 2025-26)
    #[arg(long)]
    fiscal_year: Option<String>,
}

pub async fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = JsonDirStore::new(&args.store);
    let all = store.load_bills(&args.tenant)?;
    debug!("Loaded {} bills for tenant {}", all.len(), args.tenant);

    let mut bills: Vec<Bill> = if let Some(month) = &args.month {
        let first = parse_bill_date(&format!("{}-01", month))
            .ok_or_else(|| anyhow::anyhow!("Invalid month {:?}, expected YYYY-MM", month))?;
        bills_in_month(&all, first.year(), first.month())
            .into_iter()
            .cloned()
            .collect()
    } else if let Some(token) = &args.fiscal_year {
        let fiscal_year = FiscalYear::parse_token(token)
            .ok_or_else(|| anyhow::anyhow!("Invalid fiscal year {:?}, expected e.g. 2025-26", token))?;
        println!(
            "{} Fiscal year {} ({} to {})",
            style("ℹ").blue(),
            fiscal_year,
            fiscal_year.first_day(),
            fiscal_year.last_day()
        );
        all.into_iter()
            .filter(|bill| parse_bill_date(&bill.bill_date).is_some_and(|d| fiscal_year.contains(d)))
            .collect()
    } else {
        all
    };

    sort_by_sequence(&mut bills);

    let currency = &config.output.currency_symbol;
    for bill in &bills {
        println!(
            "{:<20} {:<10} {:<9} {:<30} {}{}",
            bill.bill_number,
            bill.bill_date,
            bill.bill_type.display(),
            bill.customer_info.name,
            currency,
            format_inr(bill.totals.total)
        );
    }

    let total = bills
        .iter()
        .fold(Decimal::ZERO, |sum, bill| sum.saturating_add(bill.totals.total));
    println!();
    println!(
        "{} {} bills, total {}{}",
        style("✓").green(),
        bills.len(),
        currency,
        format_inr(total)
    );

    Ok(())
}
