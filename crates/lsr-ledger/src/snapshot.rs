//! # State Snapshots
//!
//! A JSON snapshot of the staking state this subsystem touches: the four
//! record kinds, nothing else. Snapshots let the reconciliation pass run
//! offline against an exported state file and let tests assert on whole
//! resulting states. Export order follows the store's key order, so two
//! exports of the same state are byte-identical.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::records::{Delegation, Redelegation, UnbondingDelegation, Validator};
use crate::store::{MemoryStore, StakingStore};

/// The staking-state slice touched by redelegation reconciliation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// All validators, keyed by operator in the store.
    pub validators: Vec<Validator>,
    /// All delegations.
    pub delegations: Vec<Delegation>,
    /// All unbonding delegations.
    pub unbonding_delegations: Vec<UnbondingDelegation>,
    /// All outstanding redelegations.
    pub redelegations: Vec<Redelegation>,
}

impl StateSnapshot {
    /// Read a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the snapshot to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        fs::write(path, rendered)?;
        Ok(())
    }
}

impl MemoryStore {
    /// Build a store from a snapshot.
    pub fn from_snapshot(snapshot: StateSnapshot) -> Self {
        let mut store = MemoryStore::new();
        for validator in snapshot.validators {
            store.set_validator(validator);
        }
        for delegation in snapshot.delegations {
            store.set_delegation(delegation);
        }
        for unbonding in snapshot.unbonding_delegations {
            store.set_unbonding_delegation(unbonding);
        }
        for redelegation in snapshot.redelegations {
            store.set_redelegation(redelegation);
        }
        store
    }

    /// Export the store as a snapshot, in key order.
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            validators: self.validators_ordered(),
            delegations: self.delegations_ordered(),
            unbonding_delegations: self.unbonding_ordered(),
            redelegations: self.redelegations(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::address::{DelegatorId, ValidatorId};
    use crate::decimal::{Shares, Tokens};
    use crate::records::RedelegationEntry;
    use crate::temporal::Timestamp;

    fn snapshot() -> StateSnapshot {
        let t0 = Timestamp::from_datetime(Utc.with_ymd_and_hms(2023, 9, 13, 0, 0, 0).unwrap());
        StateSnapshot {
            validators: vec![Validator {
                operator: ValidatorId::new("val-1"),
                tokens: Tokens::from(100),
                delegator_shares: Shares::from(100),
                liquid_shares: Shares::from(100),
            }],
            delegations: vec![Delegation {
                delegator: DelegatorId::new("del-1"),
                validator: ValidatorId::new("val-1"),
                shares: Shares::from(5),
            }],
            unbonding_delegations: vec![],
            redelegations: vec![Redelegation {
                delegator: DelegatorId::new("del-1"),
                src_validator: ValidatorId::new("val-0"),
                dst_validator: ValidatorId::new("val-1"),
                entries: vec![RedelegationEntry {
                    completion_time: t0,
                    shares_dst: Shares::from(5),
                }],
            }],
        }
    }

    #[test]
    fn snapshot_round_trips_through_store() {
        let store = MemoryStore::from_snapshot(snapshot());
        let exported = store.to_snapshot();
        assert_eq!(exported.validators.len(), 1);
        assert_eq!(exported.delegations.len(), 1);
        assert_eq!(exported.redelegations.len(), 1);
        assert_eq!(
            exported.redelegations[0].entries[0].shares_dst,
            Shares::from(5)
        );
    }

    #[test]
    fn export_is_deterministic() {
        let store = MemoryStore::from_snapshot(snapshot());
        let a = serde_json::to_string(&store.to_snapshot()).unwrap();
        let b = serde_json::to_string(&store.to_snapshot()).unwrap();
        assert_eq!(a, b);
    }
}
