//! States command - list jurisdiction labels and GST state codes.

use clap::Args;

use gstbill_core::rules::jurisdiction::{lookup_by_code, INDIAN_STATES};

/// Arguments for the states command.
#[derive(Args)]
pub struct StatesArgs {
    /// Show only the state with this code (e.g. 06)
    #[arg(long)]
    code: Option<String>,
}

pub async fn run(args: StatesArgs) -> anyhow::Result<()> {
    match args.code.as_deref() {
        Some(code) => match lookup_by_code(code) {
            Some(label) => println!("{}", label),
            None => anyhow::bail!("Unknown state code: {}", code),
        },
        None => {
            for label in INDIAN_STATES {
                println!("{}", label);
            }
        }
    }
    Ok(())
}
