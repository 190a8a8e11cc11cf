//! CLI application for GST invoices and estimates.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, compute, config, list, number, states, words};

/// GST billing - compute taxes, totals and bill numbers for invoices and estimates
#[derive(Parser)]
#[command(name = "gstbill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute a single bill file
    Compute(compute::ComputeArgs),

    /// Recompute multiple bill files
    Batch(batch::BatchArgs),

    /// Show the next bill number
    Number(number::NumberArgs),

    /// List issued bills for a month or fiscal year
    List(list::ListArgs),

    /// Print an amount in words
    Words(words::WordsArgs),

    /// List GST state codes
    States(states::StatesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Compute(args) => compute::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Number(args) => number::run(args, config_path).await,
        Commands::List(args) => list::run(args, config_path).await,
        Commands::Words(args) => words::run(args).await,
        Commands::States(args) => states::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
