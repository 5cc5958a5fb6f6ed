//! Aegis CLI - phishing analysis and adversarial training
//!
//! # Usage
//!
//! ```bash
//! # Analyze a captured page
//! aegis analyze --page page.json
//!
//! # Run adversarial hardening cycles
//! aegis train --brand PayPal --cycles 5 --out curve.csv
//!
//! # Show version and configuration
//! aegis info
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;

use commands::{analyze, info, train};

/// Aegis - adversarially hardened phishing detection
///
/// Five specialist analysts debate each page under a bounded round cap;
/// a reputation-weighted judge issues the verdict.
#[derive(Parser)]
#[command(
    name = "aegis",
    version,
    about = "Aegis CLI - Multi-agent phishing detection",
    long_about = "Aegis analyzes suspect pages through a bounded multi-round\n\
                  specialist debate and a reputation-weighted judge, and\n\
                  hardens itself against generated attacks over training cycles."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a captured page for phishing
    #[command(name = "analyze")]
    Analyze(analyze::AnalyzeArgs),

    /// Run adversarial training cycles and export the curve
    #[command(name = "train")]
    Train(train::TrainArgs),

    /// Show system information
    #[command(name = "info")]
    Info(info::InfoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Analyze(args) => analyze::run(args).await,
        Commands::Train(args) => train::run(args).await,
        Commands::Info(args) => info::run(args),
    }
}

/// Setup tracing based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}

/// Print an error message with an X
#[allow(dead_code)]
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}
