//! Number command - show the next bill number for a date and bill type.

use std::path::PathBuf;

use clap::Args;
use tracing::{debug, warn};

use gstbill_core::billing::BillNumberSequencer;
use gstbill_core::models::bill::BillType;
use gstbill_core::rules::fiscal::{parse_bill_date, today};
use gstbill_core::store::{BillStore, JsonDirStore};

use super::config::load_config;

/// Arguments for the number command.
#[derive(Args)]
pub struct NumberArgs {
    /// Bill date (YYYY-MM-DD); invalid or missing dates use today
    #[arg(short, long)]
    date: Option<String>,

    /// Bill type
    #[arg(short = 't', long = "type", value_enum, default_value = "invoice")]
    bill_type: BillTypeArg,

    /// Bill store directory to scan for issued numbers
    #[arg(long)]
    store: Option<PathBuf>,

    /// Tenant whose issued numbers are scanned
    #[arg(long, default_value = "default")]
    tenant: String,

    /// Previously issued numbers, in addition to the store
    #[arg(short, long, num_args = 1..)]
    existing: Vec<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BillTypeArg {
    Invoice,
    Estimate,
}

impl From<BillTypeArg> for BillType {
    fn from(arg: BillTypeArg) -> Self {
        match arg {
            BillTypeArg::Invoice => BillType::Invoice,
            BillTypeArg::Estimate => BillType::Estimate,
        }
    }
}

pub async fn run(args: NumberArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let sequencer = BillNumberSequencer::new(config.numbering);

    let date = match args.date.as_deref() {
        Some(s) => parse_bill_date(s).unwrap_or_else(|| {
            warn!("Invalid bill date {:?}, using current date", s);
            today()
        }),
        None => today(),
    };

    let mut existing = args.existing;
    if let Some(store_dir) = &args.store {
        let store = JsonDirStore::new(store_dir);
        existing.extend(store.list_bill_numbers(&args.tenant)?);
    }
    debug!("Scanning {} issued bill numbers", existing.len());

    let number = sequencer.next_number(&existing, args.bill_type.into(), date);
    println!("{}", sequencer.format(&number));

    Ok(())
}
