//! # Excess Reconciler
//!
//! Combines a pair's timeline estimate with its current delegation record
//! to decide how many recorded redelegation shares exceed reality. Four
//! cases, by which of delegation/unbonding exist for the pair:
//!
//! | delegation | unbonding | excess                                   |
//! |------------|-----------|------------------------------------------|
//! | absent     | absent    | sum of all entries (nothing backs them)  |
//! | present    | absent    | sum of all entries − delegation shares   |
//! | absent     | present   | timeline estimate                        |
//! | present    | present   | timeline estimate − delegation shares    |
//!
//! A result of zero or less means the pair needs no repair.

use lsr_ledger::{
    Delegation, DelegatorId, LedgerError, Redelegation, Shares, UnbondingDelegation, Validator,
};

use crate::error::ReconcileError;
use crate::timeline::remaining_redelegated_shares;

/// Checked sum of every entry's destination shares across all records.
pub fn sum_redelegation_shares(records: &[Redelegation]) -> Result<Shares, LedgerError> {
    records
        .iter()
        .try_fold(Shares::ZERO, |acc, record| acc.checked_add(record.total_shares()?))
}

/// Compute the pair's excess recorded shares. May be zero or negative, in
/// which case the pair is already consistent and nothing is pruned.
pub fn excess_shares(
    validator: &Validator,
    delegator: &DelegatorId,
    delegation: Option<&Delegation>,
    unbonding: Option<&UnbondingDelegation>,
    records: &[Redelegation],
) -> Result<Shares, ReconcileError> {
    match (delegation, unbonding) {
        // Nothing backs the records at all: every entry is excess.
        (None, None) => Ok(sum_redelegation_shares(records)?),
        (Some(delegation), None) => {
            Ok(sum_redelegation_shares(records)?.checked_sub(delegation.shares)?)
        }
        (None, Some(unbonding)) => remaining_redelegated_shares(
            validator,
            delegator,
            &validator.operator,
            Some(unbonding),
            records,
        ),
        (Some(delegation), Some(unbonding)) => {
            let remaining = remaining_redelegated_shares(
                validator,
                delegator,
                &validator.operator,
                Some(unbonding),
                records,
            )?;
            Ok(remaining.checked_sub(delegation.shares)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use lsr_ledger::{
        RedelegationEntry, Timestamp, Tokens, UnbondingEntry, ValidatorId,
    };

    use super::*;

    fn timestamp(hours: i64) -> Timestamp {
        let base = Utc.with_ymd_and_hms(2023, 9, 13, 0, 0, 0).unwrap();
        Timestamp::from_datetime(base + chrono::Duration::hours(hours))
    }

    fn validator() -> Validator {
        Validator {
            operator: ValidatorId::new("dst-1"),
            tokens: Tokens::from(100),
            delegator_shares: Shares::from(100),
            liquid_shares: Shares::from(100),
        }
    }

    fn delegation(shares: i64) -> Delegation {
        Delegation {
            delegator: DelegatorId::new("del-1"),
            validator: ValidatorId::new("dst-1"),
            shares: Shares::from(shares),
        }
    }

    fn red(entries: &[(i64, i64)]) -> Redelegation {
        Redelegation {
            delegator: DelegatorId::new("del-1"),
            src_validator: ValidatorId::new("src-1"),
            dst_validator: ValidatorId::new("dst-1"),
            entries: entries
                .iter()
                .map(|&(hours, shares)| RedelegationEntry {
                    completion_time: timestamp(hours),
                    shares_dst: Shares::from(shares),
                })
                .collect(),
        }
    }

    fn ubd(entries: &[(i64, i64)]) -> UnbondingDelegation {
        UnbondingDelegation {
            delegator: DelegatorId::new("del-1"),
            validator: ValidatorId::new("dst-1"),
            entries: entries
                .iter()
                .map(|&(hours, balance)| UnbondingEntry {
                    completion_time: timestamp(hours),
                    initial_balance: Tokens::from(balance),
                })
                .collect(),
        }
    }

    #[test]
    fn neither_record_means_everything_is_excess() {
        let records = [red(&[(0, 10), (5, 10)])];
        let excess = excess_shares(&validator(), &DelegatorId::new("del-1"), None, None, &records)
            .unwrap();
        assert_eq!(excess, Shares::from(20));
    }

    #[test]
    fn delegation_only_subtracts_owned_shares() {
        let records = [red(&[(0, 5), (5, 5)])];
        let excess = excess_shares(
            &validator(),
            &DelegatorId::new("del-1"),
            Some(&delegation(2)),
            None,
            &records,
        )
        .unwrap();
        assert_eq!(excess, Shares::from(8));
    }

    #[test]
    fn covered_delegation_yields_non_positive_excess() {
        let records = [red(&[(0, 5)])];
        let excess = excess_shares(
            &validator(),
            &DelegatorId::new("del-1"),
            Some(&delegation(40)),
            None,
            &records,
        )
        .unwrap();
        assert_eq!(excess, Shares::from(-35));
        assert!(!excess.is_positive());
    }

    #[test]
    fn unbonding_only_uses_timeline_estimate() {
        // +1@0, -5@3 (floors), +2@5 => 2.
        let records = [red(&[(0, 1), (5, 2)])];
        let excess = excess_shares(
            &validator(),
            &DelegatorId::new("del-1"),
            None,
            Some(&ubd(&[(3, 5)])),
            &records,
        )
        .unwrap();
        assert_eq!(excess, Shares::from(2));
    }

    #[test]
    fn both_records_subtract_delegation_from_timeline() {
        // Timeline: +5@0, -5@3, +5@5, -4@8, +2@10, -1@12, +5@15 => 7.
        let records = [red(&[(0, 5), (5, 5)]), red(&[(10, 2)]), red(&[(15, 5)])];
        let excess = excess_shares(
            &validator(),
            &DelegatorId::new("del-1"),
            Some(&delegation(5)),
            Some(&ubd(&[(3, 5), (8, 4), (12, 1)])),
            &records,
        )
        .unwrap();
        assert_eq!(excess, Shares::from(2));
    }

    #[test]
    fn no_records_no_excess() {
        let excess =
            excess_shares(&validator(), &DelegatorId::new("del-1"), None, None, &[]).unwrap();
        assert_eq!(excess, Shares::ZERO);
    }

    #[test]
    fn sum_spans_records() {
        let records = [red(&[(0, 5), (5, 5)]), red(&[(10, 2)])];
        assert_eq!(sum_redelegation_shares(&records).unwrap(), Shares::from(12));
    }
}
