//! # Identifier Newtypes
//!
//! Opaque identifiers for delegators and validator operators. The host
//! ledger owns address syntax and validation (bech32 or otherwise); this
//! subsystem only ever compares, orders, and hashes identifiers, so they
//! are carried verbatim as strings behind distinct types.

use serde::{Deserialize, Serialize};

/// A delegator account identifier, opaque to this subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DelegatorId(String);

impl DelegatorId {
    /// Wrap a host-ledger delegator address.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DelegatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DelegatorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A validator operator identifier, opaque to this subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValidatorId(String);

impl ValidatorId {
    /// Wrap a host-ledger validator operator address.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ValidatorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_order_lexicographically() {
        let a = ValidatorId::new("val-a");
        let b = ValidatorId::new("val-b");
        assert!(a < b);
    }

    #[test]
    fn identifiers_serialize_as_plain_strings() {
        let id = DelegatorId::new("del-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"del-1\"");
    }
}
