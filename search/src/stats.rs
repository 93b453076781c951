//! Per-invocation search statistics.

use std::time::Duration;

use lodestar_kernel::proof::canon::{canonical_json_bytes, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_STATS};

/// Why a search invocation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A goal node survived the cost bound and was returned.
    GoalReached,
    /// Every reachable node under the cost bound was expanded or pruned.
    FrontierExhausted,
    /// The wall-clock budget ran out first.
    TimedOut,
}

impl Termination {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::TimedOut => "timed_out",
        }
    }
}

/// Counters for one `search` call (or, merged, for a sequence of calls).
///
/// Everything except `total_time` is a pure function of the problem and the
/// configuration, which is what [`SearchStats::digest`] binds.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    /// Nodes popped that passed the bound and duplicate checks.
    pub states_expanded: u64,
    /// Successors produced by expanded states.
    pub states_generated: u64,
    /// Nodes discarded by path or explored-table duplicate detection.
    pub states_pruned_by_cycle_check: u64,
    /// Nodes discarded because they violated the cost bound.
    pub states_pruned_by_cost: u64,
    /// Nodes discarded because their heuristic was `+inf`.
    pub states_pruned_as_dead_end: u64,
    /// Largest frontier size reached.
    pub frontier_high_water: u64,
    /// How the (last) invocation ended.
    pub termination: Termination,
    /// Wall-clock time spent.
    pub total_time: Duration,
}

impl SearchStats {
    /// Zeroed counters. `termination` is overwritten when a run ends.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states_expanded: 0,
            states_generated: 0,
            states_pruned_by_cycle_check: 0,
            states_pruned_by_cost: 0,
            states_pruned_as_dead_end: 0,
            frontier_high_water: 0,
            termination: Termination::FrontierExhausted,
            total_time: Duration::ZERO,
        }
    }

    /// Accumulate another invocation's counters into these.
    ///
    /// Counters and time add up, the high-water mark takes the maximum, and
    /// the termination reason becomes `other`'s.
    pub fn merge(&mut self, other: &Self) {
        self.states_expanded += other.states_expanded;
        self.states_generated += other.states_generated;
        self.states_pruned_by_cycle_check += other.states_pruned_by_cycle_check;
        self.states_pruned_by_cost += other.states_pruned_by_cost;
        self.states_pruned_as_dead_end += other.states_pruned_as_dead_end;
        self.frontier_high_water = self.frontier_high_water.max(other.frontier_high_water);
        self.termination = other.termination;
        self.total_time += other.total_time;
    }

    /// JSON view of the reproducible counters (no timing).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "frontier_high_water": self.frontier_high_water,
            "states_expanded": self.states_expanded,
            "states_generated": self.states_generated,
            "states_pruned_as_dead_end": self.states_pruned_as_dead_end,
            "states_pruned_by_cost": self.states_pruned_by_cost,
            "states_pruned_by_cycle_check": self.states_pruned_by_cycle_check,
            "termination": self.termination.name(),
        })
    }

    /// Digest of the reproducible counters.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(DOMAIN_SEARCH_STATS, &bytes))
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}
