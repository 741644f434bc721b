//! # Reconcile Subcommand
//!
//! Loads a staking-state snapshot, runs the reconciliation pass, writes the
//! repaired snapshot back, and prints the pass report as JSON on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lsr_ledger::{MemoryStore, StateSnapshot};
use lsr_reconcile::reconcile_redelegations;

/// Arguments for the `lsr reconcile` subcommand.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Path to the staking-state snapshot (JSON).
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Output path for the repaired snapshot. Defaults to rewriting the
    /// input in place.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Output path for the JSON pass report (also printed to stdout).
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Execute the reconcile subcommand.
///
/// Returns exit code: 0 on success, 1 if any pair was skipped with a
/// recorded failure.
pub fn run_reconcile(args: &ReconcileArgs) -> Result<u8> {
    let snapshot = StateSnapshot::load(&args.snapshot)
        .with_context(|| format!("failed to load snapshot {}", args.snapshot.display()))?;
    let mut store = MemoryStore::from_snapshot(snapshot);

    let report = reconcile_redelegations(&mut store).context("reconciliation pass failed")?;

    let out = args.out.as_ref().unwrap_or(&args.snapshot);
    store
        .to_snapshot()
        .save(out)
        .with_context(|| format!("failed to write repaired snapshot {}", out.display()))?;
    tracing::info!(out = %out.display(), "repaired snapshot written");

    let rendered = serde_json::to_string_pretty(&report)?;
    if let Some(path) = &args.report {
        std::fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }
    println!("{rendered}");

    Ok(if report.failures.is_empty() { 0 } else { 1 })
}
