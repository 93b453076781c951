//! Explored table: best known path cost per state.
//!
//! The table answers one question for the engine: has this state already
//! been expanded along a path at least as cheap? If so the new path is
//! dominated and is discarded. A strictly cheaper path is re-admitted and
//! lowers the recorded cost.

use std::collections::HashMap;

use lodestar_kernel::space::SearchState;

/// Mapping from state to the lowest `gval` at which it has been expanded.
///
/// Lookups only; the table is never iterated, so `HashMap` ordering cannot
/// leak into expansion order.
#[derive(Debug)]
pub struct ExploredTable<S: SearchState> {
    best_g: HashMap<S, f64>,
}

impl<S: SearchState> ExploredTable<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            best_g: HashMap::new(),
        }
    }

    /// Returns `true` if `state` is recorded with a cost `<= gval`.
    #[must_use]
    pub fn is_dominated(&self, state: &S, gval: f64) -> bool {
        self.best_g.get(state).is_some_and(|&best| best <= gval)
    }

    /// Record `state` at `gval` unless an equal or cheaper entry exists.
    ///
    /// Returns `true` if the table changed.
    pub fn record(&mut self, state: &S, gval: f64) -> bool {
        match self.best_g.get_mut(state) {
            Some(best) if *best <= gval => false,
            Some(best) => {
                *best = gval;
                true
            }
            None => {
                self.best_g.insert(state.clone(), gval);
                true
            }
        }
    }

    /// Lowest recorded cost for `state`.
    #[must_use]
    pub fn best_g(&self, state: &S) -> Option<f64> {
        self.best_g.get(state).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.best_g.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best_g.is_empty()
    }

    /// Forget every recorded state.
    pub fn clear(&mut self) {
        self.best_g.clear();
    }
}

impl<S: SearchState> Default for ExploredTable<S> {
    fn default() -> Self {
        Self::new()
    }
}
