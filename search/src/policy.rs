//! Search policy types.

use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::strategy::Strategy;

/// Engine configuration fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchPolicyV1 {
    /// Frontier ordering.
    pub strategy: Strategy,
    /// How repeated states are detected.
    pub duplicate_policy: DuplicatePolicy,
    /// Record one [`crate::trace::ExpansionRecord`] per expansion.
    pub record_trace: bool,
}

impl SearchPolicyV1 {
    #[must_use]
    pub fn new(strategy: Strategy, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            strategy,
            duplicate_policy,
            record_trace: false,
        }
    }

    /// Enable expansion tracing.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.record_trace = true;
        self
    }

    /// Validate the policy before any search runs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidWeight`] if a weighted strategy
    /// carries an unusable weight.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.strategy.validate()
    }

    /// Canonical JSON form, used to bind run reports to their configuration.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "duplicate_policy": self.duplicate_policy.name(),
            "record_trace": self.record_trace,
            "strategy": self.strategy.name(),
        });
        if let Strategy::WeightedAStar { weight } = self.strategy {
            obj["weight"] = serde_json::json!(lodestar_kernel::proof::canon::cost_str(weight));
        }
        obj
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self::new(Strategy::AStar, DuplicatePolicy::Full)
    }
}

/// Duplicate-state detection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// No detection: every generated path is kept (tree search).
    None,
    /// Reject a successor whose state already lies on its own path.
    Path,
    /// Explored table with dominance pruning. Default.
    Full,
}

impl DuplicatePolicy {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Path => "path",
            Self::Full => "full",
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "path" => Ok(Self::Path),
            "full" | "default" => Ok(Self::Full),
            other => Err(ConfigurationError::UnknownDuplicatePolicy {
                name: other.to_string(),
            }),
        }
    }
}
