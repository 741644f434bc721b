//! # lsr CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lsr_cli::check::{run_check, CheckArgs};
use lsr_cli::reconcile::{run_reconcile, ReconcileArgs};

/// LSR — Liquid Staking Redelegation Reconciler
///
/// Runs the deterministic redelegation reconciliation pass against a JSON
/// snapshot of staking state: indexes outstanding redelegations, estimates
/// the shares still legitimately in transit per (delegator, destination
/// validator) pair, and prunes the unbacked excess newest-first.
#[derive(Parser, Debug)]
#[command(name = "lsr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the reconciliation pass and write the repaired snapshot.
    Reconcile(ReconcileArgs),

    /// Dry-run: report what the pass would prune, without writing.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Reconcile(args) => run_reconcile(&args),
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
