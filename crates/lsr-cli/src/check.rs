//! # Check Subcommand
//!
//! Dry-run: runs the pass against an in-memory copy of the snapshot and
//! reports what it would prune, without writing anything back to disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lsr_ledger::{MemoryStore, StateSnapshot};
use lsr_reconcile::reconcile_redelegations;

/// Arguments for the `lsr check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the staking-state snapshot (JSON).
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when the ledger is already consistent, 1 when the
/// pass would prune shares or any pair failed.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let snapshot = StateSnapshot::load(&args.snapshot)
        .with_context(|| format!("failed to load snapshot {}", args.snapshot.display()))?;
    let mut store = MemoryStore::from_snapshot(snapshot);

    let report = reconcile_redelegations(&mut store).context("reconciliation pass failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.is_clean() {
        tracing::info!("redelegation ledger is consistent");
        Ok(0)
    } else {
        tracing::warn!(
            pairs_repaired = report.pairs_repaired,
            pairs_skipped = report.pairs_skipped,
            pruned = %report.shares_pruned,
            "redelegation ledger needs repair"
        );
        Ok(1)
    }
}
