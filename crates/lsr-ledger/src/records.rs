//! # Staking Record Kinds
//!
//! The four record kinds the reconciliation pass reads and (for
//! redelegations only) rewrites. [`Validator`], [`Delegation`], and
//! [`UnbondingDelegation`] are read-only ground truth; [`Redelegation`]
//! entries may be shrunk or removed, and a record left with zero entries is
//! deleted from the store.

use serde::{Deserialize, Serialize};

use crate::address::{DelegatorId, ValidatorId};
use crate::decimal::{Shares, Tokens};
use crate::error::LedgerError;
use crate::temporal::Timestamp;

/// A bonded validator. Read-only for this subsystem; provides the
/// share↔token exchange rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    /// Operator identifier.
    pub operator: ValidatorId,
    /// Total bonded tokens.
    pub tokens: Tokens,
    /// Total issued delegator shares.
    pub delegator_shares: Shares,
    /// Shares held through liquid-staking tokenization. Validators with
    /// zero liquid shares are outside the reconciled cohort.
    pub liquid_shares: Shares,
}

impl Validator {
    /// Convert a token amount into shares at this validator's current
    /// exchange rate: `delegator_shares × balance ÷ tokens`.
    ///
    /// Fails with [`LedgerError::ZeroBondedTokens`] when the validator has
    /// no bonded tokens (the rate is undefined).
    pub fn shares_from_tokens(&self, balance: Tokens) -> Result<Shares, LedgerError> {
        if self.tokens.is_zero() {
            return Err(LedgerError::ZeroBondedTokens {
                validator: self.operator.clone(),
            });
        }
        self.delegator_shares
            .as_decimal()
            .checked_mul(balance.as_decimal())
            .and_then(|scaled| scaled.checked_div(self.tokens.as_decimal()))
            .map(Shares::new)
            .ok_or(LedgerError::Overflow {
                op: "token-to-share conversion",
            })
    }
}

/// A delegator's current share holding at one validator. Ground truth for
/// what the delegator actually owns; read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delegation {
    /// The owning delegator.
    pub delegator: DelegatorId,
    /// The validator the shares are held at.
    pub validator: ValidatorId,
    /// Shares currently owned.
    pub shares: Shares,
}

/// One pending withdrawal of principal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnbondingEntry {
    /// When the withdrawal matures.
    pub completion_time: Timestamp,
    /// The token amount being withdrawn.
    pub initial_balance: Tokens,
}

/// Principal draining out of a validator for one delegator. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnbondingDelegation {
    /// The withdrawing delegator.
    pub delegator: DelegatorId,
    /// The validator being withdrawn from.
    pub validator: ValidatorId,
    /// Pending withdrawal entries, in store order.
    pub entries: Vec<UnbondingEntry>,
}

/// One pending tranche of moved principal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedelegationEntry {
    /// When the move matures.
    pub completion_time: Timestamp,
    /// Shares credited at the destination validator.
    pub shares_dst: Shares,
}

/// Principal in transit between two validators for one delegator. The only
/// mutable record kind: entries may be shrunk or removed during
/// reconciliation, and an emptied record is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redelegation {
    /// The moving delegator.
    pub delegator: DelegatorId,
    /// The validator the principal left.
    pub src_validator: ValidatorId,
    /// The validator the principal is arriving at.
    pub dst_validator: ValidatorId,
    /// Pending tranche entries, in store order.
    pub entries: Vec<RedelegationEntry>,
}

impl Redelegation {
    /// Checked sum of all entries' destination shares.
    pub fn total_shares(&self) -> Result<Shares, LedgerError> {
        self.entries
            .iter()
            .try_fold(Shares::ZERO, |acc, entry| acc.checked_add(entry.shares_dst))
    }
}
