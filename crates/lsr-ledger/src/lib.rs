#![deny(missing_docs)]

//! # lsr-ledger — Staking Ledger Foundation
//!
//! This crate defines the types every other crate in the workspace depends
//! on: the fixed-point amount newtypes, the staking record kinds, and the
//! [`StakingStore`] interface through which the reconciliation engine reads
//! and writes ledger state. It has no internal crate dependencies — only
//! `serde`, `serde_json`, `rust_decimal`, `thiserror`, and `chrono` from the
//! external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`Shares`] and [`Tokens`]
//!    are distinct types over the same fixed-point decimal; you cannot pass
//!    a token amount where a share amount is expected. Identifiers
//!    ([`DelegatorId`], [`ValidatorId`]) are likewise distinct.
//!
//! 2. **Checked arithmetic only.** Every amount operation that can overflow
//!    returns a `Result`; nothing wraps or clamps silently. The engine built
//!    on top of this crate runs as a replicated deterministic computation,
//!    where a silent wrap is a consensus fault.
//!
//! 3. **No floats.** All amounts are `rust_decimal::Decimal` — a 96-bit
//!    fixed-point mantissa with deterministic arithmetic and string
//!    serialization.
//!
//! 4. **[`LedgerError`] hierarchy.** Structured errors with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod address;
pub mod decimal;
pub mod error;
pub mod records;
pub mod snapshot;
pub mod store;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use address::{DelegatorId, ValidatorId};
pub use decimal::{Shares, Tokens};
pub use error::LedgerError;
pub use records::{
    Delegation, Redelegation, RedelegationEntry, UnbondingDelegation, UnbondingEntry, Validator,
};
pub use snapshot::StateSnapshot;
pub use store::{MemoryStore, StakingStore};
pub use temporal::Timestamp;
