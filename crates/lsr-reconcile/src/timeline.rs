//! # Share Timeline
//!
//! Merges one pair's redelegation entries (deposits) and unbonding entries
//! (withdrawals, converted to shares at the validator's current exchange
//! rate) into a single completion-time-ordered ledger, then folds it into
//! the estimate of shares still legitimately in transit.
//!
//! ## Floor-at-Zero
//!
//! The fold maintains `r = max(0, r + delta)`. A withdrawal that would net
//! the running total below zero must have drawn on principal that was never
//! part of the redelegation ledger, so the deficit is absorbed at zero
//! rather than propagated negative.
//!
//! ## Determinism
//!
//! The ascending sort is stable: entries with equal completion times keep
//! their input order (redelegation entries in record order first, unbonding
//! entries after). Independent re-executions fold in the same order.

use lsr_ledger::{
    DelegatorId, Redelegation, Shares, Timestamp, UnbondingDelegation, Validator, ValidatorId,
};

use crate::error::ReconcileError;

/// A signed share movement at a completion time.
#[derive(Debug, Clone, Copy)]
struct TimelineEntry {
    completion_time: Timestamp,
    delta: Shares,
}

/// One pair's merged, time-ordered ledger of share deposits and
/// withdrawals.
#[derive(Debug)]
pub struct ShareTimeline {
    entries: Vec<TimelineEntry>,
}

impl ShareTimeline {
    /// Merge a pair's records into a sorted timeline.
    ///
    /// Every redelegation must carry the pair's delegator and destination
    /// validator; a mismatch means the index is corrupt and fails with
    /// [`ReconcileError::MismatchedDelegator`] /
    /// [`ReconcileError::MismatchedDstValidator`]. Either input may be
    /// empty or absent.
    pub fn build(
        validator: &Validator,
        delegator: &DelegatorId,
        dst_validator: &ValidatorId,
        unbonding: Option<&UnbondingDelegation>,
        redelegations: &[Redelegation],
    ) -> Result<Self, ReconcileError> {
        let mut entries = Vec::new();

        for record in redelegations {
            if record.dst_validator != *dst_validator {
                return Err(ReconcileError::MismatchedDstValidator {
                    expected: dst_validator.clone(),
                    found: record.dst_validator.clone(),
                });
            }
            if record.delegator != *delegator {
                return Err(ReconcileError::MismatchedDelegator {
                    expected: delegator.clone(),
                    found: record.delegator.clone(),
                });
            }
            for entry in &record.entries {
                entries.push(TimelineEntry {
                    completion_time: entry.completion_time,
                    delta: entry.shares_dst,
                });
            }
        }

        if let Some(unbonding) = unbonding {
            for entry in &unbonding.entries {
                let withdrawn = validator.shares_from_tokens(entry.initial_balance)?;
                entries.push(TimelineEntry {
                    completion_time: entry.completion_time,
                    delta: -withdrawn,
                });
            }
        }

        // Stable: equal completion times keep input order.
        entries.sort_by(|a, b| a.completion_time.cmp(&b.completion_time));

        Ok(ShareTimeline { entries })
    }

    /// Fold the timeline into the remaining in-transit share estimate,
    /// flooring the running total at zero.
    pub fn remaining_shares(&self) -> Result<Shares, ReconcileError> {
        let mut remaining = Shares::ZERO;
        for entry in &self.entries {
            let next = remaining.checked_add(entry.delta)?;
            remaining = if next.is_negative() { Shares::ZERO } else { next };
        }
        Ok(remaining)
    }
}

/// Build a pair's timeline and fold it in one step.
pub fn remaining_redelegated_shares(
    validator: &Validator,
    delegator: &DelegatorId,
    dst_validator: &ValidatorId,
    unbonding: Option<&UnbondingDelegation>,
    redelegations: &[Redelegation],
) -> Result<Shares, ReconcileError> {
    ShareTimeline::build(validator, delegator, dst_validator, unbonding, redelegations)?
        .remaining_shares()
}
