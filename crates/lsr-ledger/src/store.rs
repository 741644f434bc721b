//! # Staking Store Interface
//!
//! [`StakingStore`] is the external boundary of the subsystem: the six
//! operations the host ledger exposes, and the only channel through which
//! the reconciliation pass touches state. [`MemoryStore`] is the
//! `BTreeMap`-backed implementation serving tests and the offline CLI.
//!
//! ## Determinism
//!
//! `redelegations()` must yield records in a stable, host-defined order —
//! the pass derives its pair iteration order from it. `MemoryStore` keys
//! redelegations by `(delegator, src_validator, dst_validator)` and iterates
//! in key order, matching the byte-ordered iteration of a KV-backed host
//! store.

use std::collections::BTreeMap;

use crate::address::{DelegatorId, ValidatorId};
use crate::records::{Delegation, Redelegation, UnbondingDelegation, Validator};

/// Host-ledger staking state, as seen by the reconciliation pass.
///
/// Lookups return `Option` — an absent delegation or unbonding delegation
/// is a normal case for the reconciler, not an error. Only redelegations
/// are ever written.
pub trait StakingStore {
    /// Every outstanding redelegation record, in a stable host-defined
    /// order.
    fn redelegations(&self) -> Vec<Redelegation>;

    /// The delegator's current delegation at `validator`, if any.
    fn delegation(&self, delegator: &DelegatorId, validator: &ValidatorId) -> Option<Delegation>;

    /// The delegator's unbonding delegation at `validator`, if any.
    fn unbonding_delegation(
        &self,
        delegator: &DelegatorId,
        validator: &ValidatorId,
    ) -> Option<UnbondingDelegation>;

    /// The validator with the given operator identifier, if it exists.
    fn validator(&self, validator: &ValidatorId) -> Option<Validator>;

    /// Persist a (possibly shrunk) redelegation record, replacing any
    /// record with the same `(delegator, src, dst)` key.
    fn set_redelegation(&mut self, record: Redelegation);

    /// Delete the redelegation record with `record`'s
    /// `(delegator, src, dst)` key.
    fn remove_redelegation(&mut self, record: &Redelegation);
}

type RedelegationKey = (DelegatorId, ValidatorId, ValidatorId);

/// In-memory [`StakingStore`] with deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    validators: BTreeMap<ValidatorId, Validator>,
    delegations: BTreeMap<(DelegatorId, ValidatorId), Delegation>,
    unbonding: BTreeMap<(DelegatorId, ValidatorId), UnbondingDelegation>,
    redelegations: BTreeMap<RedelegationKey, Redelegation>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a validator.
    pub fn set_validator(&mut self, validator: Validator) {
        self.validators.insert(validator.operator.clone(), validator);
    }

    /// Insert or replace a delegation.
    pub fn set_delegation(&mut self, delegation: Delegation) {
        self.delegations.insert(
            (delegation.delegator.clone(), delegation.validator.clone()),
            delegation,
        );
    }

    /// Insert or replace an unbonding delegation.
    pub fn set_unbonding_delegation(&mut self, unbonding: UnbondingDelegation) {
        self.unbonding.insert(
            (unbonding.delegator.clone(), unbonding.validator.clone()),
            unbonding,
        );
    }

    /// Look up one redelegation record by its full key.
    pub fn redelegation(
        &self,
        delegator: &DelegatorId,
        src_validator: &ValidatorId,
        dst_validator: &ValidatorId,
    ) -> Option<&Redelegation> {
        self.redelegations.get(&(
            delegator.clone(),
            src_validator.clone(),
            dst_validator.clone(),
        ))
    }

    /// Number of redelegation records currently held.
    pub fn redelegation_count(&self) -> usize {
        self.redelegations.len()
    }

    pub(crate) fn validators_ordered(&self) -> Vec<Validator> {
        self.validators.values().cloned().collect()
    }

    pub(crate) fn delegations_ordered(&self) -> Vec<Delegation> {
        self.delegations.values().cloned().collect()
    }

    pub(crate) fn unbonding_ordered(&self) -> Vec<UnbondingDelegation> {
        self.unbonding.values().cloned().collect()
    }
}

impl StakingStore for MemoryStore {
    fn redelegations(&self) -> Vec<Redelegation> {
        self.redelegations.values().cloned().collect()
    }

    fn delegation(&self, delegator: &DelegatorId, validator: &ValidatorId) -> Option<Delegation> {
        self.delegations
            .get(&(delegator.clone(), validator.clone()))
            .cloned()
    }

    fn unbonding_delegation(
        &self,
        delegator: &DelegatorId,
        validator: &ValidatorId,
    ) -> Option<UnbondingDelegation> {
        self.unbonding
            .get(&(delegator.clone(), validator.clone()))
            .cloned()
    }

    fn validator(&self, validator: &ValidatorId) -> Option<Validator> {
        self.validators.get(validator).cloned()
    }

    fn set_redelegation(&mut self, record: Redelegation) {
        self.redelegations.insert(
            (
                record.delegator.clone(),
                record.src_validator.clone(),
                record.dst_validator.clone(),
            ),
            record,
        );
    }

    fn remove_redelegation(&mut self, record: &Redelegation) {
        self.redelegations.remove(&(
            record.delegator.clone(),
            record.src_validator.clone(),
            record.dst_validator.clone(),
        ));
    }
}
