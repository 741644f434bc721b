//! # lsr-reconcile — Redelegation Reconciliation Engine
//!
//! Restores the redelegation-ledger invariant after liquid-staking share
//! totals were invalidated: for every (delegator, destination validator)
//! pair, the recorded in-transit shares must not exceed what is still
//! backed by the pair's delegation plus its draining unbonding entries.
//! Unbacked excess is pruned newest-first.
//!
//! - **Index** ([`index`]): groups outstanding redelegations by
//!   (delegator, destination validator) in strict first-seen order.
//!
//! - **Timeline** ([`timeline`]): merges a pair's redelegation and
//!   unbonding entries into one time-ordered ledger and folds it into the
//!   remaining in-transit share estimate, flooring at zero.
//!
//! - **Reconciler** ([`reconcile`]): the four-case excess computation over
//!   delegation/unbonding presence.
//!
//! - **Pruner** ([`prune`]): deletes or shrinks entries newest-first until
//!   the excess is absorbed, rebuilding each record's entry list fresh.
//!
//! - **Driver** ([`driver`]): the single deterministic pass over all pairs,
//!   aggregating per-pair failures into a report instead of aborting.
//!
//! ## Determinism
//!
//! The pass replays identically on every node of a replicated ledger:
//! iteration order is first-seen, sorts are stable with explicit
//! tie-breaks, and all arithmetic is checked fixed-point. The only
//! intentional clamp is the timeline's floor-at-zero fold.

pub mod driver;
pub mod error;
pub mod index;
pub mod prune;
pub mod reconcile;
pub mod timeline;

// Re-export primary types.
pub use driver::{reconcile_redelegations, MigrationReport, PairFailure};
pub use error::ReconcileError;
pub use index::{PairRecords, RedelegationIndex};
pub use prune::{prune_excess, PruneOutcome};
pub use reconcile::{excess_shares, sum_redelegation_shares};
pub use timeline::{remaining_redelegated_shares, ShareTimeline};
