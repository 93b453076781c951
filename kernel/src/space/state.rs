//! `SearchState`: the successor-generation contract.
//!
//! The search layer never mutates a state. It only asks a state for its
//! successors and compares states for equality when detecting duplicates,
//! so any immutable value type with a deterministic successor order can be
//! searched.

use std::fmt::Debug;
use std::hash::Hash;

/// Failure raised by a state while generating successors.
///
/// The search engine does not recover from these: a state that cannot
/// enumerate its successors is a bug in the caller's state representation,
/// and the error is propagated to whoever started the search.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The state is internally inconsistent.
    #[error("malformed state: {detail}")]
    Malformed { detail: String },

    /// A successor declared a step cost that is negative or not a number.
    #[error("step cost must be a non-negative number, got {cost}")]
    InvalidStepCost { cost: f64 },

    /// An error raised by a collaborator the state delegates to.
    #[error(transparent)]
    Collaborator(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// One transition out of a state: the action taken, the state reached, and
/// the cost of the step.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S: SearchState> {
    /// Label of the action that produces `state`.
    pub action: S::Action,
    /// The resulting state.
    pub state: S,
    /// Step cost (`>= 0`).
    pub cost: f64,
}

impl<S: SearchState> Successor<S> {
    /// Construct a successor.
    #[must_use]
    pub fn new(action: S::Action, state: S, cost: f64) -> Self {
        Self {
            action,
            state,
            cost,
        }
    }

    /// Reject step costs the search cannot order by.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidStepCost`] for negative or NaN costs.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.cost.is_nan() || self.cost < 0.0 {
            return Err(StateError::InvalidStepCost { cost: self.cost });
        }
        Ok(())
    }
}

/// A state that can be searched.
///
/// # Contract
///
/// - `successors` must be deterministic: the same state yields the same
///   successors in the same order on every call. Expansion order, and with it
///   every reproducibility digest, depends on it.
/// - `Eq` and `Hash` define the duplicate-detection key. Two states that
///   compare equal are the same search state regardless of how they were
///   reached.
pub trait SearchState: Clone + Eq + Hash + Debug {
    /// Label attached to each transition (used for path reconstruction).
    type Action: Clone + Debug;

    /// Enumerate the transitions out of this state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the state cannot be expanded.
    fn successors(&self) -> Result<Vec<Successor<Self>>, StateError>;
}

/// Goal predicate over states.
pub trait GoalTest<S> {
    /// Returns `true` if `state` satisfies the goal.
    fn is_goal(&self, state: &S) -> bool;
}

impl<S, F> GoalTest<S> for F
where
    F: Fn(&S) -> bool,
{
    fn is_goal(&self, state: &S) -> bool {
        self(state)
    }
}
