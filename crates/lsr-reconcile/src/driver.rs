//! # Reconciliation Pass Driver
//!
//! One deterministic, synchronous pass: build the index, walk pairs in
//! first-seen order, compute each pair's excess, prune when positive, and
//! persist the results. Executed exactly once per upgrade, identically on
//! every node replaying the same state.
//!
//! ## Failure Policy
//!
//! A per-pair failure (missing validator, undefined exchange rate,
//! overflow) is logged, recorded in the report, and the pair is skipped —
//! the pass never aborts for one anomalous record. The exception is a
//! pair-key mismatch inside the index: that is engine corruption, and the
//! pass aborts rather than prune the wrong records.
//!
//! ## Write-Back Policy
//!
//! Every record the pruner touched is persisted, wherever it sits in the
//! pair's original record order: shrunk records are rewritten, emptied
//! records are deleted, untouched records are not rewritten.

use serde::Serialize;

use lsr_ledger::{DelegatorId, LedgerError, Shares, StakingStore, ValidatorId};

use crate::error::ReconcileError;
use crate::index::{PairRecords, RedelegationIndex};
use crate::prune::{prune_excess, PruneOutcome};
use crate::reconcile::excess_shares;

/// One pair the pass could not repair, with the reason it was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct PairFailure {
    /// The pair's delegator.
    pub delegator: DelegatorId,
    /// The pair's destination validator.
    pub validator: ValidatorId,
    /// Rendered error.
    pub reason: String,
}

/// Operator-facing summary of one reconciliation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    /// Pairs examined.
    pub pairs_processed: usize,
    /// Pairs that had positive excess and were pruned.
    pub pairs_repaired: usize,
    /// Pairs skipped because of a recorded failure.
    pub pairs_skipped: usize,
    /// Redelegation records rewritten with fewer/shrunk entries.
    pub records_updated: usize,
    /// Redelegation records deleted outright.
    pub records_removed: usize,
    /// Total shares pruned across all repaired pairs.
    pub shares_pruned: Shares,
    /// Per-pair failures, in pass order.
    pub failures: Vec<PairFailure>,
}

impl MigrationReport {
    /// Whether the pass found nothing to repair and nothing failed.
    pub fn is_clean(&self) -> bool {
        self.pairs_repaired == 0 && self.failures.is_empty()
    }
}

/// Run the reconciliation pass over the store.
///
/// Returns the report on completion; fails only on index corruption
/// (pair-key mismatch) or report-total overflow.
pub fn reconcile_redelegations<S: StakingStore>(
    store: &mut S,
) -> Result<MigrationReport, ReconcileError> {
    let index = RedelegationIndex::build(&*store);
    let mut report = MigrationReport::default();

    tracing::info!(pairs = index.pair_count(), "starting redelegation reconciliation pass");

    for pair in index.pairs() {
        report.pairs_processed += 1;

        match reconcile_pair(&*store, &pair) {
            Ok(None) => {
                tracing::debug!(
                    delegator = %pair.delegator,
                    validator = %pair.dst_validator,
                    "pair consistent, no repair needed"
                );
            }
            Ok(Some(outcome)) => {
                for record in &outcome.updated {
                    store.set_redelegation(record.clone());
                }
                for record in &outcome.removed {
                    store.remove_redelegation(record);
                }
                tracing::info!(
                    delegator = %pair.delegator,
                    validator = %pair.dst_validator,
                    pruned = %outcome.shares_pruned,
                    records_updated = outcome.updated.len(),
                    records_removed = outcome.removed.len(),
                    "pruned unbacked redelegation shares"
                );
                report.pairs_repaired += 1;
                report.records_updated += outcome.updated.len();
                report.records_removed += outcome.removed.len();
                report.shares_pruned =
                    report.shares_pruned.checked_add(outcome.shares_pruned)?;
            }
            Err(err) if err.is_index_corruption() => {
                tracing::error!(
                    delegator = %pair.delegator,
                    validator = %pair.dst_validator,
                    error = %err,
                    "redelegation index corrupt, aborting pass"
                );
                return Err(err);
            }
            Err(err) => {
                tracing::warn!(
                    delegator = %pair.delegator,
                    validator = %pair.dst_validator,
                    error = %err,
                    "pair skipped"
                );
                report.failures.push(PairFailure {
                    delegator: pair.delegator.clone(),
                    validator: pair.dst_validator.clone(),
                    reason: err.to_string(),
                });
                report.pairs_skipped += 1;
            }
        }
    }

    tracing::info!(
        processed = report.pairs_processed,
        repaired = report.pairs_repaired,
        skipped = report.pairs_skipped,
        pruned = %report.shares_pruned,
        "redelegation reconciliation pass complete"
    );

    Ok(report)
}

/// Compute one pair's repair, without writing anything.
fn reconcile_pair<S: StakingStore>(
    store: &S,
    pair: &PairRecords<'_>,
) -> Result<Option<PruneOutcome>, ReconcileError> {
    let validator = store
        .validator(pair.dst_validator)
        .ok_or_else(|| LedgerError::ValidatorNotFound(pair.dst_validator.clone()))?;
    let delegation = store.delegation(pair.delegator, pair.dst_validator);
    let unbonding = store.unbonding_delegation(pair.delegator, pair.dst_validator);

    let excess = excess_shares(
        &validator,
        pair.delegator,
        delegation.as_ref(),
        unbonding.as_ref(),
        pair.records,
    )?;

    if !excess.is_positive() {
        return Ok(None);
    }

    let outcome = prune_excess(pair.records.to_vec(), excess)?;
    Ok(Some(outcome))
}
