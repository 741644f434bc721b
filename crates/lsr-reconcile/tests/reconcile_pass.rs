//! # Whole-Pass Scenario Tests
//!
//! Drives `reconcile_redelegations` over a two-delegator, four-validator
//! state with interleaved redelegations and unbonding delegations, and
//! asserts the exact surviving entries, pass idempotence, and whole-pass
//! determinism.

use chrono::{TimeZone, Utc};

use lsr_ledger::{
    Delegation, DelegatorId, MemoryStore, Redelegation, RedelegationEntry, Shares, StakingStore,
    Timestamp, Tokens, UnbondingDelegation, UnbondingEntry, Validator, ValidatorId,
};
use lsr_reconcile::{excess_shares, reconcile_redelegations};

fn timestamp(hours: i64) -> Timestamp {
    let base = Utc.with_ymd_and_hms(2023, 9, 13, 0, 0, 0).unwrap();
    Timestamp::from_datetime(base + chrono::Duration::hours(hours))
}

fn validator(operator: &str, liquid: i64) -> Validator {
    Validator {
        operator: ValidatorId::new(operator),
        tokens: Tokens::from(100),
        delegator_shares: Shares::from(100),
        liquid_shares: Shares::from(liquid),
    }
}

fn delegation(delegator: &str, validator: &str, shares: i64) -> Delegation {
    Delegation {
        delegator: DelegatorId::new(delegator),
        validator: ValidatorId::new(validator),
        shares: Shares::from(shares),
    }
}

fn red(delegator: &str, src: &str, dst: &str, entries: &[(i64, i64)]) -> Redelegation {
    Redelegation {
        delegator: DelegatorId::new(delegator),
        src_validator: ValidatorId::new(src),
        dst_validator: ValidatorId::new(dst),
        entries: entries
            .iter()
            .map(|&(hours, shares)| RedelegationEntry {
                completion_time: timestamp(hours),
                shares_dst: Shares::from(shares),
            })
            .collect(),
    }
}

fn ubd(delegator: &str, validator: &str, entries: &[(i64, i64)]) -> UnbondingDelegation {
    UnbondingDelegation {
        delegator: DelegatorId::new(delegator),
        validator: ValidatorId::new(validator),
        entries: entries
            .iter()
            .map(|&(hours, balance)| UnbondingEntry {
                completion_time: timestamp(hours),
                initial_balance: Tokens::from(balance),
            })
            .collect(),
    }
}

/// Two delegators, four liquid validators, every reconciliation case at
/// once:
///
/// - (del-1, val-3): delegation 5, unbonding present, three records
///   totalling 17 — timeline estimate 7, excess 2, newest entry shrinks.
/// - (del-1, val-4): nothing backs the pair — both entries deleted.
/// - (del-2, val-1): no delegation, unbonding present — timeline 2,
///   newest entry removed whole, older entry survives at its exact value.
/// - (del-2, val-2): delegation 50, unbonding present — timeline 85,
///   excess 35, single entry shrinks 100 → 65.
/// - (del-2, val-3): delegation 40 covers the 22 recorded — untouched.
fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();

    for operator in ["val-1", "val-2", "val-3", "val-4"] {
        store.set_validator(validator(operator, 100));
    }

    store.set_delegation(delegation("del-1", "val-3", 5));
    store.set_delegation(delegation("del-2", "val-2", 50));
    store.set_delegation(delegation("del-2", "val-3", 40));

    store.set_redelegation(red("del-1", "src-1", "val-3", &[(0, 5), (5, 5)]));
    store.set_redelegation(red("del-1", "src-2", "val-3", &[(10, 2)]));
    store.set_redelegation(red("del-1", "src-3", "val-3", &[(15, 5)]));
    store.set_redelegation(red("del-1", "src-4", "val-4", &[(40, 10), (50, 10)]));

    store.set_redelegation(red("del-2", "src-1", "val-1", &[(0, 1), (5, 2)]));
    store.set_redelegation(red("del-2", "src-2", "val-2", &[(10, 100)]));
    store.set_redelegation(red("del-2", "src-3", "val-3", &[(15, 20), (20, 1), (30, 1)]));

    store.set_unbonding_delegation(ubd("del-1", "val-3", &[(3, 5), (8, 4), (12, 1)]));
    store.set_unbonding_delegation(ubd("del-2", "val-1", &[(3, 5)]));
    store.set_unbonding_delegation(ubd("del-2", "val-2", &[(8, 1), (12, 10), (25, 5)]));

    store
}

fn entry_shares(store: &MemoryStore, delegator: &str, src: &str, dst: &str) -> Vec<Shares> {
    store
        .redelegation(
            &DelegatorId::new(delegator),
            &ValidatorId::new(src),
            &ValidatorId::new(dst),
        )
        .unwrap_or_else(|| panic!("redelegation {delegator}/{src}/{dst} missing"))
        .entries
        .iter()
        .map(|e| e.shares_dst)
        .collect()
}

#[test]
fn pass_prunes_exactly_the_unbacked_excess() {
    let mut store = seeded_store();
    let report = reconcile_redelegations(&mut store).unwrap();

    assert_eq!(report.pairs_processed, 5);
    assert_eq!(report.pairs_repaired, 4);
    assert_eq!(report.pairs_skipped, 0);
    assert!(report.failures.is_empty());
    assert_eq!(report.records_updated, 3);
    assert_eq!(report.records_removed, 1);
    // 2 + 20 + 2 + 35 across the four repaired pairs.
    assert_eq!(report.shares_pruned, Shares::from(59));

    // (del-1, val-3): the two older records are untouched; only the
    // newest entry (the src-3 record) shrinks 5 → 3.
    assert_eq!(
        entry_shares(&store, "del-1", "src-1", "val-3"),
        vec![Shares::from(5), Shares::from(5)]
    );
    assert_eq!(entry_shares(&store, "del-1", "src-2", "val-3"), vec![Shares::from(2)]);
    assert_eq!(entry_shares(&store, "del-1", "src-3", "val-3"), vec![Shares::from(3)]);

    // (del-1, val-4): nothing backed the pair; the record is gone.
    assert!(store
        .redelegation(
            &DelegatorId::new("del-1"),
            &ValidatorId::new("src-4"),
            &ValidatorId::new("val-4"),
        )
        .is_none());

    // (del-2, val-1): the +2@5h entry is removed whole; +1@t0 survives.
    assert_eq!(entry_shares(&store, "del-2", "src-1", "val-1"), vec![Shares::from(1)]);

    // (del-2, val-2): single entry shrinks 100 → 65; the timeline over
    // the survivor then nets to exactly the 50 delegated shares.
    assert_eq!(entry_shares(&store, "del-2", "src-2", "val-2"), vec![Shares::from(65)]);

    // (del-2, val-3): already covered by the delegation; untouched.
    assert_eq!(
        entry_shares(&store, "del-2", "src-3", "val-3"),
        vec![Shares::from(20), Shares::from(1), Shares::from(1)]
    );
}

#[test]
fn repaired_pairs_have_no_excess_left() {
    let mut store = seeded_store();
    reconcile_redelegations(&mut store).unwrap();

    for (delegator, dst) in [
        ("del-1", "val-3"),
        ("del-2", "val-1"),
        ("del-2", "val-2"),
        ("del-2", "val-3"),
    ] {
        let delegator = DelegatorId::new(delegator);
        let dst = ValidatorId::new(dst);
        let validator = store.validator(&dst).unwrap();
        let records: Vec<Redelegation> = store
            .redelegations()
            .into_iter()
            .filter(|r| r.delegator == delegator && r.dst_validator == dst)
            .collect();
        let excess = excess_shares(
            &validator,
            &delegator,
            store.delegation(&delegator, &dst).as_ref(),
            store.unbonding_delegation(&delegator, &dst).as_ref(),
            &records,
        )
        .unwrap();
        assert!(
            !excess.is_positive(),
            "pair {delegator}/{dst} still has excess {excess}"
        );
    }
}

#[test]
fn second_pass_is_a_no_op() {
    let mut store = seeded_store();
    reconcile_redelegations(&mut store).unwrap();
    let after_first = serde_json::to_string(&store.to_snapshot()).unwrap();

    let report = reconcile_redelegations(&mut store).unwrap();
    let after_second = serde_json::to_string(&store.to_snapshot()).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.pairs_repaired, 0);
    assert_eq!(report.shares_pruned, Shares::ZERO);
    assert_eq!(after_first, after_second);
}

#[test]
fn independent_runs_produce_identical_state() {
    let mut a = seeded_store();
    let mut b = seeded_store();

    reconcile_redelegations(&mut a).unwrap();
    reconcile_redelegations(&mut b).unwrap();

    assert_eq!(
        serde_json::to_string(&a.to_snapshot()).unwrap(),
        serde_json::to_string(&b.to_snapshot()).unwrap()
    );
}

#[test]
fn non_liquid_cohort_is_never_touched() {
    let mut store = seeded_store();
    // A destination outside the cohort with obviously unbacked records.
    store.set_validator(validator("val-5", 0));
    store.set_redelegation(red("del-3", "src-1", "val-5", &[(0, 99)]));

    let report = reconcile_redelegations(&mut store).unwrap();

    assert_eq!(report.pairs_processed, 5);
    assert_eq!(entry_shares(&store, "del-3", "src-1", "val-5"), vec![Shares::from(99)]);
}
