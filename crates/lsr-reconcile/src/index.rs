//! # Redelegation Index
//!
//! Groups every outstanding redelegation by (delegator, destination
//! validator), built once per pass from the store and discarded afterward.
//!
//! ## Determinism
//!
//! Pair iteration order is strict **first-seen** order: delegators in the
//! order the store first yielded them, and within a delegator, destination
//! validators in the order they first appeared. The order is held in
//! `Vec`s; the `HashMap`s exist only for lookup during the build. The pass
//! replays identically on every node, so this order must be identical
//! across independent re-executions.
//!
//! ## Cohort Filter
//!
//! Only records whose destination validator currently has non-zero liquid
//! shares are indexed — pairs outside the liquid-staking cohort need no
//! reconciliation and are left untouched. A record whose destination
//! validator is missing entirely is still indexed, so the driver surfaces
//! the dangling reference as a recorded failure instead of silently
//! dropping it.

use std::collections::HashMap;

use lsr_ledger::{DelegatorId, Redelegation, StakingStore, ValidatorId};

/// One pair's worth of grouped redelegation records.
#[derive(Debug)]
pub struct PairRecords<'a> {
    /// The pair's delegator.
    pub delegator: &'a DelegatorId,
    /// The pair's destination validator.
    pub dst_validator: &'a ValidatorId,
    /// All indexed records for the pair, in store order.
    pub records: &'a [Redelegation],
}

#[derive(Debug, Default)]
struct DelegatorGroup {
    /// Destination validators in first-seen order.
    validators: Vec<ValidatorId>,
    records: HashMap<ValidatorId, Vec<Redelegation>>,
}

/// All outstanding redelegations grouped by (delegator, destination
/// validator), in first-seen order. An explicit value built once per pass —
/// never module state, never persisted.
#[derive(Debug, Default)]
pub struct RedelegationIndex {
    /// Delegators in first-seen order.
    delegators: Vec<DelegatorId>,
    groups: HashMap<DelegatorId, DelegatorGroup>,
}

impl RedelegationIndex {
    /// Build the index with a single pass over the store's redelegations,
    /// applying the liquid-shares cohort filter.
    pub fn build(store: &impl StakingStore) -> Self {
        let mut index = RedelegationIndex::default();
        for record in store.redelegations() {
            match store.validator(&record.dst_validator) {
                Some(validator) if validator.liquid_shares.is_zero() => {
                    tracing::debug!(
                        delegator = %record.delegator,
                        validator = %record.dst_validator,
                        "destination outside liquid-staking cohort, left untouched"
                    );
                    continue;
                }
                // Missing validators are indexed so the driver records the
                // dangling reference for the pair.
                Some(_) | None => index.insert(record),
            }
        }
        index
    }

    fn insert(&mut self, record: Redelegation) {
        if !self.groups.contains_key(&record.delegator) {
            self.delegators.push(record.delegator.clone());
        }
        let group = self.groups.entry(record.delegator.clone()).or_default();
        if !group.records.contains_key(&record.dst_validator) {
            group.validators.push(record.dst_validator.clone());
        }
        group
            .records
            .entry(record.dst_validator.clone())
            .or_default()
            .push(record);
    }

    /// Number of (delegator, destination validator) pairs indexed.
    pub fn pair_count(&self) -> usize {
        self.groups.values().map(|g| g.validators.len()).sum()
    }

    /// Whether the index holds no pairs at all.
    pub fn is_empty(&self) -> bool {
        self.delegators.is_empty()
    }

    /// Iterate all pairs in first-seen order.
    pub fn pairs(&self) -> impl Iterator<Item = PairRecords<'_>> {
        self.delegators.iter().flat_map(move |delegator| {
            let group = &self.groups[delegator];
            group.validators.iter().map(move |validator| PairRecords {
                delegator,
                dst_validator: validator,
                records: &group.records[validator],
            })
        })
    }
}
