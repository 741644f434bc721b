//! # Fixed-Point Amounts
//!
//! [`Shares`] and [`Tokens`] wrap `rust_decimal::Decimal`: a 96-bit
//! fixed-point mantissa with deterministic arithmetic and string
//! serialization. Floats never appear in ledger arithmetic — two
//! independently compiled binaries folding the same entries must produce
//! bit-identical totals.
//!
//! ## Signedness
//!
//! A [`Shares`] value is an accounting quantity, not a balance: timeline
//! deltas and reconciliation excesses legitimately go negative
//! mid-computation, so negation and subtraction are first-class. Persisted
//! record entries are always positive; the engine enforces that invariant,
//! not the type.

use std::ops::Neg;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// A validator-relative share amount (or signed share delta).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(Decimal);

impl Shares {
    /// The zero share amount.
    pub const ZERO: Shares = Shares(Decimal::ZERO);

    /// Wrap a raw decimal share amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whether the amount is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Checked addition.
    pub fn checked_add(self, rhs: Shares) -> Result<Shares, LedgerError> {
        self.0
            .checked_add(rhs.0)
            .map(Shares)
            .ok_or(LedgerError::Overflow { op: "share addition" })
    }

    /// Checked subtraction.
    pub fn checked_sub(self, rhs: Shares) -> Result<Shares, LedgerError> {
        self.0
            .checked_sub(rhs.0)
            .map(Shares)
            .ok_or(LedgerError::Overflow { op: "share subtraction" })
    }
}

impl Neg for Shares {
    type Output = Shares;

    fn neg(self) -> Shares {
        Shares(-self.0)
    }
}

impl From<i64> for Shares {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl std::fmt::Display for Shares {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An underlying token (currency) amount.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tokens(Decimal);

impl Tokens {
    /// The zero token amount.
    pub const ZERO: Tokens = Tokens(Decimal::ZERO);

    /// Wrap a raw decimal token amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<i64> for Tokens {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl std::fmt::Display for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
