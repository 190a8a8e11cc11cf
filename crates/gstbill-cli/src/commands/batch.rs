//! Batch command - recompute many bill files at once.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use gstbill_core::billing::recompute_bill;
use gstbill_core::models::bill::Bill;
use gstbill_core::models::config::BillingConfig;
use gstbill_core::rules::tax::sync_inactive_rates;
use gstbill_core::rules::TaxRegime;

use super::compute::{format_bill, read_bill, OutputFormat};
use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (JSON bills)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Reject bills that are not ready to submit
    #[arg(long)]
    validate: bool,

    /// Mirror the active tax rates into the inactive fields before computing
    #[arg(long)]
    sync_rates: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of recomputing a single file.
struct BatchResult {
    path: PathBuf,
    bill: Option<Bill>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!("{} Found {} bills to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} bills")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_single_file(&path, &args) {
            Ok(bill) => results.push(BatchResult {
                path,
                bill: Some(bill),
                error: None,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(BatchResult {
                        path,
                        bill: None,
                        error: Some(error_msg),
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing {} failed: {}", path.display(), error_msg);
                }
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.bill.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(bill) = &result.bill {
                write_output(output_dir, &result.path, bill, args.format, &config)?;
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} bills in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: &Path, args: &BatchArgs) -> anyhow::Result<Bill> {
    let mut bill = read_bill(path)?;

    if args.sync_rates {
        let regime = TaxRegime::between(&bill.business_info.state, &bill.customer_info.state);
        for item in bill.items.iter_mut() {
            sync_inactive_rates(item, regime);
        }
    }

    recompute_bill(&mut bill);

    if args.validate {
        bill.ensure_submittable()?;
    }

    Ok(bill)
}

fn write_output(
    output_dir: &Path,
    source: &Path,
    bill: &Bill,
    format: OutputFormat,
    config: &BillingConfig,
) -> anyhow::Result<()> {
    let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("bill");
    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };

    let output_path = output_dir.join(format!("{}.{}", stem, extension));
    fs::write(&output_path, format_bill(bill, format, config)?)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "bill_number",
        "bill_date",
        "customer",
        "subtotal",
        "tax_amount",
        "rounding_amount",
        "total",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        match &result.bill {
            Some(bill) => wtr.write_record([
                filename,
                "success".to_string(),
                bill.bill_number.clone(),
                bill.bill_date.clone(),
                bill.customer_info.name.clone(),
                bill.totals.subtotal.to_string(),
                bill.totals.tax_amount.to_string(),
                bill.totals.rounding_amount.to_string(),
                bill.totals.total.to_string(),
                String::new(),
            ])?,
            None => wtr.write_record([
                filename,
                "error".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                result.error.clone().unwrap_or_default(),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
