//! # Excess Pruner
//!
//! Absorbs a pair's excess by unwinding redelegation entries newest-first:
//! the most recently created entries are least likely to reflect principal
//! that has already matured into real backing. Whole entries are removed
//! while the running deletion total stays within the excess; the first
//! entry that crosses the boundary is shrunk to the overshoot and the walk
//! stops. At most one entry is ever partially modified.
//!
//! Surviving entry lists are rebuilt fresh per record — no in-place
//! index-shifting removal. Records emptied by the walk are classified for
//! deletion; records never touched stay classified as unchanged and are
//! not rewritten.
//!
//! Hard invariants: the pruned total never exceeds `excess` (it is exactly
//! `min(excess, total)`), and no surviving entry carries a non-positive
//! share amount (given positive inputs).

use std::collections::HashSet;

use lsr_ledger::{Redelegation, RedelegationEntry, Shares, Timestamp};

use crate::error::ReconcileError;

/// The classified result of pruning one pair's records.
#[derive(Debug, Default)]
pub struct PruneOutcome {
    /// Records touched by pruning that still have entries; written back.
    pub updated: Vec<Redelegation>,
    /// Records emptied by pruning; deleted from the store.
    pub removed: Vec<Redelegation>,
    /// Records the walk never reached; left as-is in the store.
    pub unchanged: Vec<Redelegation>,
    /// Total shares actually pruned: `min(excess, total)` for a positive
    /// excess.
    pub shares_pruned: Shares,
}

impl PruneOutcome {
    fn untouched(records: Vec<Redelegation>) -> Self {
        PruneOutcome {
            unchanged: records,
            ..PruneOutcome::default()
        }
    }
}

#[derive(Debug)]
struct FlatEntry {
    record: usize,
    entry: usize,
    completion_time: Timestamp,
    shares: Shares,
}

#[derive(Debug, Default)]
struct RecordEdit {
    removed: HashSet<usize>,
    shrunk: Option<(usize, Shares)>,
}

impl RecordEdit {
    fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.shrunk.is_none()
    }
}

/// Prune `excess` shares from the pair's records, newest entries first.
/// A non-positive excess leaves every record unchanged.
pub fn prune_excess(
    records: Vec<Redelegation>,
    excess: Shares,
) -> Result<PruneOutcome, ReconcileError> {
    if !excess.is_positive() {
        return Ok(PruneOutcome::untouched(records));
    }

    let mut flat: Vec<FlatEntry> = records
        .iter()
        .enumerate()
        .flat_map(|(record, r)| {
            r.entries.iter().enumerate().map(move |(entry, e)| FlatEntry {
                record,
                entry,
                completion_time: e.completion_time,
                shares: e.shares_dst,
            })
        })
        .collect();

    // Stable descending sort: newest first, ties keep input order.
    flat.sort_by(|a, b| b.completion_time.cmp(&a.completion_time));

    let mut edits: Vec<RecordEdit> = records.iter().map(|_| RecordEdit::default()).collect();
    let mut deleted = Shares::ZERO;
    let mut pruned = Shares::ZERO;

    for flat_entry in &flat {
        deleted = deleted.checked_add(flat_entry.shares)?;
        if deleted > excess {
            let keep = deleted.checked_sub(excess)?;
            // `keep == shares` only when the previous entry landed exactly
            // on the excess; the entry then survives whole.
            if keep < flat_entry.shares {
                edits[flat_entry.record].shrunk = Some((flat_entry.entry, keep));
                pruned = pruned.checked_add(flat_entry.shares.checked_sub(keep)?)?;
            }
            break;
        }
        edits[flat_entry.record].removed.insert(flat_entry.entry);
        pruned = pruned.checked_add(flat_entry.shares)?;
    }

    let mut outcome = PruneOutcome {
        shares_pruned: pruned,
        ..PruneOutcome::default()
    };

    for (record, edit) in records.into_iter().zip(edits.iter()) {
        if edit.is_noop() {
            outcome.unchanged.push(record);
            continue;
        }
        let entries: Vec<RedelegationEntry> = record
            .entries
            .iter()
            .enumerate()
            .filter(|(position, _)| !edit.removed.contains(position))
            .map(|(position, entry)| match edit.shrunk {
                Some((shrunk_position, keep)) if shrunk_position == position => RedelegationEntry {
                    completion_time: entry.completion_time,
                    shares_dst: keep,
                },
                _ => *entry,
            })
            .collect();
        let rebuilt = Redelegation {
            delegator: record.delegator,
            src_validator: record.src_validator,
            dst_validator: record.dst_validator,
            entries,
        };
        if rebuilt.entries.is_empty() {
            outcome.removed.push(rebuilt);
        } else {
            outcome.updated.push(rebuilt);
        }
    }

    Ok(outcome)
}
