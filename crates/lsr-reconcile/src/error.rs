//! # Engine Errors
//!
//! [`ReconcileError`] wraps the ledger-level errors and adds the two
//! pair-key mismatch variants. The mismatch variants mean the in-memory
//! index itself is corrupt — a bug, not a data anomaly — so the driver
//! aborts the whole pass on them instead of skipping the pair; continuing
//! would prune the wrong records.

use thiserror::Error;

use lsr_ledger::{DelegatorId, LedgerError, ValidatorId};

/// Errors from the reconciliation engine.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// A ledger read or amount operation failed. Recoverable per pair.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A grouped redelegation's destination validator does not match the
    /// pair it was indexed under.
    #[error("redelegation destination {found} does not match pair validator {expected}")]
    MismatchedDstValidator {
        /// The pair's destination validator.
        expected: ValidatorId,
        /// The record's actual destination validator.
        found: ValidatorId,
    },

    /// A grouped redelegation's delegator does not match the pair it was
    /// indexed under.
    #[error("redelegation delegator {found} does not match pair delegator {expected}")]
    MismatchedDelegator {
        /// The pair's delegator.
        expected: DelegatorId,
        /// The record's actual delegator.
        found: DelegatorId,
    },
}

impl ReconcileError {
    /// Whether this error indicates index corruption. The driver aborts
    /// the pass on these; every other error is recorded per pair.
    pub fn is_index_corruption(&self) -> bool {
        matches!(
            self,
            ReconcileError::MismatchedDstValidator { .. } | ReconcileError::MismatchedDelegator { .. }
        )
    }
}
