//! Expansion trace: an ordered log of every node the engine expanded.
//!
//! Recording is opt-in (`SearchPolicyV1::record_trace`). The trace is the
//! observable form of expansion order; tests use it to check tie-breaking and
//! duplicate dominance, and its digest pins a run for regression fixtures.

use lodestar_kernel::proof::canon::{canonical_json_bytes, cost_str, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_TRACE};
use lodestar_kernel::space::SearchState;

/// One expansion.
#[derive(Debug, Clone)]
pub struct ExpansionRecord<S> {
    /// Position in expansion order (0 = first).
    pub order: u64,
    pub state: S,
    pub gval: f64,
    pub hval: f64,
    pub fval: f64,
    pub depth: u32,
}

/// The ordered list of expansions of one `search` call.
#[derive(Debug, Clone)]
pub struct SearchTrace<S> {
    expansions: Vec<ExpansionRecord<S>>,
}

impl<S: SearchState> SearchTrace<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expansions: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, state: S, gval: f64, hval: f64, fval: f64, depth: u32) {
        let order = self.expansions.len() as u64;
        self.expansions.push(ExpansionRecord {
            order,
            state,
            gval,
            hval,
            fval,
            depth,
        });
    }

    #[must_use]
    pub fn expansions(&self) -> &[ExpansionRecord<S>] {
        &self.expansions
    }

    /// Expanded states, in order.
    #[must_use]
    pub fn states(&self) -> Vec<&S> {
        self.expansions.iter().map(|r| &r.state).collect()
    }

    /// Every expansion of `state`.
    pub fn expansions_of<'a>(&'a self, state: &'a S) -> impl Iterator<Item = &'a ExpansionRecord<S>> {
        self.expansions.iter().filter(move |r| &r.state == state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }

    /// JSON view with states rendered by `label`.
    pub fn to_json_value(&self, label: impl Fn(&S) -> String) -> serde_json::Value {
        let records: Vec<serde_json::Value> = self
            .expansions
            .iter()
            .map(|r| {
                serde_json::json!({
                    "depth": r.depth,
                    "fval": cost_str(r.fval),
                    "gval": cost_str(r.gval),
                    "hval": cost_str(r.hval),
                    "order": r.order,
                    "state": label(&r.state),
                })
            })
            .collect();
        serde_json::json!({ "expansions": records })
    }

    /// Digest of the trace, labelling states with their `Debug` form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value(|s| format!("{s:?}")))?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }
}

impl<S: SearchState> Default for SearchTrace<S> {
    fn default() -> Self {
        Self::new()
    }
}
