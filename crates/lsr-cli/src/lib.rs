//! # lsr-cli — CLI Tool for LSR
//!
//! Provides the `lsr` command-line interface for running the redelegation
//! reconciliation pass offline, against a JSON snapshot of the staking
//! state instead of a live chain store.
//!
//! ## Subcommands
//!
//! - `lsr reconcile` — run the pass and write the repaired snapshot.
//! - `lsr check` — dry-run: report what the pass would prune, exit
//!   non-zero if repairs are needed.

pub mod check;
pub mod reconcile;
