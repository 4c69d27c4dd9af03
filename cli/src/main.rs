//! settle - command-line driver for the debt settlement engine
//!
//! - `bench`: timed sweep over generated cases, exported as CSV (and JSON)
//! - `solve`: minimum transfers for an obligation list read from a JSON file
//! - `generate`: print a seeded obligation list as JSON

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use debt_settlement_core::SettlerKind;

mod commands;

#[derive(Parser)]
#[command(name = "settle")]
#[command(about = "Minimum-transfer debt settlement: solve, generate and benchmark", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the solver benchmark sweep
    Bench {
        /// JSON benchmark config; flags below override its values
        #[arg(short, long, env = "SETTLE_BENCH_CONFIG")]
        config: Option<PathBuf>,

        /// Seed for obligation generation
        #[arg(long)]
        seed: Option<u64>,

        /// Smallest party count
        #[arg(long)]
        min: Option<usize>,

        /// Largest party count
        #[arg(long)]
        max: Option<usize>,

        /// Timed repetitions per solver and case
        #[arg(long)]
        repeat: Option<usize>,

        /// Solvers to run (repeatable)
        #[arg(long = "solver")]
        solvers: Vec<SettlerKind>,

        /// CSV output path
        #[arg(long, default_value = "splitwise_benchmark.csv")]
        csv: PathBuf,

        /// Optional JSON report path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Solve an obligation list from a JSON file
    Solve {
        /// JSON array of {"debtor", "creditor", "amount"} objects
        #[arg(short, long)]
        input: PathBuf,

        /// Party count (default: highest party id + 1)
        #[arg(short, long)]
        parties: Option<usize>,

        /// Solvers to run (repeatable; default: all)
        #[arg(long = "solver")]
        solvers: Vec<SettlerKind>,
    },

    /// Print a generated obligation list as JSON
    Generate {
        /// Number of parties
        #[arg(long, default_value_t = 4)]
        parties: usize,

        /// Number of obligations
        #[arg(long, default_value_t = 12)]
        count: usize,

        /// Largest amount
        #[arg(long, default_value_t = 100)]
        max_amount: i64,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    match cli.command {
        Commands::Bench {
            config,
            seed,
            min,
            max,
            repeat,
            solvers,
            csv,
            json,
        } => commands::bench(commands::BenchArgs {
            config,
            seed,
            min,
            max,
            repeat,
            solvers,
            csv,
            json,
        }),
        Commands::Solve {
            input,
            parties,
            solvers,
        } => commands::solve(&input, parties, solvers),
        Commands::Generate {
            parties,
            count,
            max_amount,
            seed,
        } => commands::generate(parties, count, max_amount, seed),
    }
}
