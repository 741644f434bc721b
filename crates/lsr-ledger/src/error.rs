//! # Error Hierarchy
//!
//! Structured error types for ledger state access and amount arithmetic,
//! built with `thiserror`. Variants carry the identifiers and operation
//! names an operator needs to diagnose a failed pair without guesswork.

use thiserror::Error;

use crate::address::ValidatorId;

/// Errors from ledger reads and fixed-point amount arithmetic.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A referenced validator does not exist in the store. Dangling
    /// references are reported per pair, never silently dropped.
    #[error("validator {0} not found")]
    ValidatorNotFound(ValidatorId),

    /// A validator has zero bonded tokens, so its share↔token exchange
    /// rate is undefined and token amounts cannot be converted.
    #[error("validator {validator} has no bonded tokens; token amounts cannot be converted to shares")]
    ZeroBondedTokens {
        /// The validator whose exchange rate is undefined.
        validator: ValidatorId,
    },

    /// A checked decimal operation overflowed. Amount arithmetic never
    /// wraps or clamps; an overflow surfaces as an explicit error.
    #[error("decimal overflow during {op}")]
    Overflow {
        /// The operation that overflowed.
        op: &'static str,
    },

    /// I/O error while reading or writing a state snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while reading or writing a state snapshot.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
