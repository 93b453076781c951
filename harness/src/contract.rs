//! World contract: what the runner needs from a reference world.
//!
//! A world supplies a start state, a goal test, a heuristic and a stable
//! label for each state. Worlds may NOT run searches, count anything, or
//! build reports; those are engine and runner concerns.

use lodestar_kernel::space::SearchState;

/// The contract a world must implement to be run by the harness runner.
pub trait SearchWorldV1 {
    /// State type explored by the engine.
    type State: SearchState;

    /// Unique world identifier (e.g., `"grid:5x5"`). Bound into run reports.
    fn world_id(&self) -> &str;

    /// The state every run starts from.
    fn initial_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Default heuristic estimate for `state` (`+inf` for a known dead end).
    fn heuristic(&self, state: &Self::State) -> f64;

    /// Stable, human-readable label used in reports and traces.
    ///
    /// Labels must be deterministic: they feed report digests.
    fn state_label(&self, state: &Self::State) -> String;
}
