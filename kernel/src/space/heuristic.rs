//! Heuristic capability: a function from state to a remaining-cost estimate.
//!
//! Heuristics take `&mut self` so an implementation can keep a cache. That
//! cache is a field of the heuristic value, never ambient state, and
//! [`Heuristic::reset`] clears it when a new problem is started.

use std::collections::HashMap;
use std::hash::Hash;

/// Estimate of the remaining cost from a state to the nearest goal.
///
/// Estimates must be `>= 0`. `f64::INFINITY` declares the state a proven dead
/// end; the search prunes such states without expanding them. Admissibility
/// (never overestimating) is not required, but optimality guarantees of A*
/// depend on it.
pub trait Heuristic<S> {
    /// Estimate the remaining cost from `state`.
    fn estimate(&mut self, state: &S) -> f64;

    /// Discard any cached estimates.
    ///
    /// Called by the engine whenever a new problem is initialized.
    fn reset(&mut self) {}
}

impl<S, F> Heuristic<S> for F
where
    F: FnMut(&S) -> f64,
{
    fn estimate(&mut self, state: &S) -> f64 {
        self(state)
    }
}

/// The null heuristic. Turns A* into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    fn estimate(&mut self, _state: &S) -> f64 {
        0.0
    }
}

/// Memoizing wrapper: evaluates the inner heuristic once per distinct state.
#[derive(Debug, Clone)]
pub struct Memoized<S, H> {
    inner: H,
    cache: HashMap<S, f64>,
    hits: u64,
    misses: u64,
}

impl<S: Eq + Hash + Clone, H: Heuristic<S>> Memoized<S, H> {
    /// Wrap `inner` with an empty cache.
    #[must_use]
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Number of estimates served from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of estimates computed by the inner heuristic.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of cached states.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Unwrap the inner heuristic, dropping the cache.
    #[must_use]
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<S: Eq + Hash + Clone, H: Heuristic<S>> Heuristic<S> for Memoized<S, H> {
    fn estimate(&mut self, state: &S) -> f64 {
        if let Some(&h) = self.cache.get(state) {
            self.hits += 1;
            return h;
        }
        self.misses += 1;
        let h = self.inner.estimate(state);
        self.cache.insert(state.clone(), h);
        h
    }

    fn reset(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
        self.inner.reset();
    }
}

/// Pointwise maximum of two heuristics.
///
/// Admissible whenever both parts are.
#[derive(Debug, Clone)]
pub struct Max<A, B> {
    first: A,
    second: B,
}

impl<A, B> Max<A, B> {
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<S, A: Heuristic<S>, B: Heuristic<S>> Heuristic<S> for Max<A, B> {
    fn estimate(&mut self, state: &S) -> f64 {
        self.first.estimate(state).max(self.second.estimate(state))
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}
