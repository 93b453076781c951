//! Typed search errors.
//!
//! `SearchError` covers configuration mistakes and broken collaborators only.
//! Finding no solution, exhausting the frontier, and running out of time are
//! ordinary outcomes reported through [`crate::search::SearchOutcome`] and
//! [`crate::stats::Termination`], never through this type.

use lodestar_kernel::space::StateError;

/// Configuration rejected before any search step was taken.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// A strategy name did not match any known strategy.
    #[error("unknown search strategy `{name}`")]
    UnknownStrategy { name: String },

    /// A duplicate-policy name did not match any known policy.
    #[error("unknown duplicate policy `{name}`")]
    UnknownDuplicatePolicy { name: String },

    /// The `custom` strategy was selected without an f-value function.
    #[error("strategy `custom` requires an f-value function")]
    MissingFValueFunction,

    /// A heuristic weight was negative, NaN, or infinite.
    #[error("heuristic weight must be finite and non-negative, got {weight}")]
    InvalidWeight { weight: f64 },

    /// An anytime weight decay factor outside `(0, 1]`.
    #[error("weight decay must be in (0, 1], got {decay}")]
    InvalidDecay { decay: f64 },
}

/// Failure of a search invocation.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The engine or a wrapper was configured incorrectly.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// `search` was called before `init_search`.
    #[error("search called before init_search")]
    NotInitialized,

    /// A state failed to generate its successors. Propagated unmodified.
    #[error("successor generation failed")]
    MalformedState {
        #[source]
        source: StateError,
    },
}

impl From<StateError> for SearchError {
    fn from(source: StateError) -> Self {
        Self::MalformedState { source }
    }
}
