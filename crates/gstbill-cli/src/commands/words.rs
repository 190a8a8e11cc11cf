//! Words command - print an amount in words.

use clap::Args;

use gstbill_core::rules::amounts::parse_amount;
use gstbill_core::rules::words::to_words;

/// Arguments for the words command.
#[derive(Args)]
pub struct WordsArgs {
    /// Amount, e.g. 100053.75 or "1,00,053.75"
    #[arg(required = true, allow_hyphen_values = true)]
    amount: String,
}

pub async fn run(args: WordsArgs) -> anyhow::Result<()> {
    println!("{}", to_words(parse_amount(&args.amount)));
    Ok(())
}
