//! The state-space contract consumed by the search layer.

pub mod heuristic;
pub mod state;

pub use heuristic::{Heuristic, Max, Memoized, ZeroHeuristic};
pub use state::{GoalTest, SearchState, StateError, Successor};
