//! Compute command - recompute taxes and totals for a single bill file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info};

use gstbill_core::billing::{recompute_bill, tax_summary, BillNumberSequencer};
use gstbill_core::models::bill::Bill;
use gstbill_core::models::config::BillingConfig;
use gstbill_core::rules::amounts::format_inr;
use gstbill_core::rules::tax::sync_inactive_rates;
use gstbill_core::rules::TaxRegime;
use gstbill_core::store::JsonDirStore;

use super::config::load_config;

/// Arguments for the compute command.
#[derive(Args)]
pub struct ComputeArgs {
    /// Input bill (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Reject the bill if it is not ready to submit (e.g. blank HSN)
    #[arg(long)]
    validate: bool,

    /// Mirror the active tax rates into the inactive fields before computing
    #[arg(long)]
    sync_rates: bool,

    /// Bill store directory; issues the next number unless the bill's number
    /// already fits its type and fiscal year
    #[arg(long)]
    store: Option<PathBuf>,

    /// Tenant whose issued numbers are scanned
    #[arg(long, default_value = "default")]
    tenant: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ComputeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Computing bill: {}", args.input.display());

    let mut bill = read_bill(&args.input)?;

    if args.sync_rates {
        let regime = TaxRegime::between(&bill.business_info.state, &bill.customer_info.state);
        for item in bill.items.iter_mut() {
            sync_inactive_rates(item, regime);
        }
    }

    let regime = recompute_bill(&mut bill);
    debug!("Tax regime: {:?}", regime);

    if let Some(store_dir) = &args.store {
        let sequencer = BillNumberSequencer::new(config.numbering.clone());
        let store = JsonDirStore::new(store_dir);
        sequencer.assign(&mut bill, &store, &args.tenant)?;
    }

    if args.validate {
        let issues = bill.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
        bill.ensure_submittable()?;
    }

    let output = format_bill(&bill, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Read a bill record from a JSON file.
pub fn read_bill(path: &Path) -> anyhow::Result<Bill> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid bill file {}: {}", path.display(), e))
}

pub fn format_bill(bill: &Bill, format: OutputFormat, config: &BillingConfig) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(bill)?),
        OutputFormat::Csv => format_csv(bill),
        OutputFormat::Text => Ok(format_text(bill, &config.output.currency_symbol)),
    }
}

fn format_csv(bill: &Bill) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "bill_number",
        "bill_date",
        "item",
        "hsn",
        "quantity",
        "rate",
        "discount",
        "taxable_amount",
        "cgst_amount",
        "sgst_amount",
        "igst_amount",
        "tax_amount",
        "total_amount",
    ])?;

    for item in &bill.items {
        wtr.write_record([
            bill.bill_number.clone(),
            bill.bill_date.clone(),
            item.name.clone(),
            item.hsn.clone(),
            item.quantity.to_string(),
            item.rate.to_string(),
            item.discount.to_string(),
            item.taxable_amount.to_string(),
            item.cgst_amount.to_string(),
            item.sgst_amount.to_string(),
            item.igst_amount.to_string(),
            item.tax_amount.to_string(),
            item.total_amount.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(bill: &Bill, currency: &str) -> String {
    let money = |amount| format!("{}{}", currency, format_inr(amount));
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", bill.bill_type.display(), bill.bill_number));
    output.push_str(&format!("Date: {}\n", bill.bill_date));
    output.push('\n');

    output.push_str("From:\n");
    output.push_str(&format!("  {}\n", bill.business_info.name));
    if !bill.business_info.gstin.is_empty() {
        output.push_str(&format!("  GSTIN: {}\n", bill.business_info.gstin));
    }
    output.push_str(&format!("  State: {}\n", bill.business_info.state));
    output.push('\n');

    output.push_str("Bill to:\n");
    output.push_str(&format!("  {}\n", bill.customer_info.name));
    if !bill.customer_info.gstin.is_empty() {
        output.push_str(&format!("  GSTIN: {}\n", bill.customer_info.gstin));
    }
    output.push_str(&format!("  State: {}\n", bill.customer_info.state));
    output.push('\n');

    output.push_str("Items:\n");
    for (i, item) in bill.items.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} [HSN {}] {} x {} = {} + tax {} = {}\n",
            i + 1,
            item.name,
            item.hsn,
            item.quantity,
            money(item.rate),
            money(item.taxable_amount),
            money(item.tax_amount),
            money(item.total_amount),
        ));
    }
    output.push('\n');

    let summary = tax_summary(bill);
    output.push_str("Summary:\n");
    output.push_str(&format!("  Subtotal: {}\n", money(bill.totals.subtotal)));
    match summary.regime {
        Some(TaxRegime::IntraState) => {
            output.push_str(&format!("  CGST:     {}\n", money(summary.cgst)));
            output.push_str(&format!("  SGST:     {}\n", money(summary.sgst)));
        }
        _ => output.push_str(&format!("  IGST:     {}\n", money(summary.igst))),
    }
    output.push_str(&format!("  Rounding: {}\n", money(bill.totals.rounding_amount)));
    output.push_str(&format!("  Total:    {}\n", money(bill.totals.total)));
    output.push_str(&format!("\n{}\n", bill.amount_in_words));

    output
}
