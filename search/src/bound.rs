//! Cost bound: the `(g, h, f)` pruning threshold.

use lodestar_kernel::proof::canon::cost_str;

/// Three-component pruning threshold.
///
/// A node is pruned when its path cost exceeds `g`, its heuristic estimate
/// exceeds `h`, or its `g + h` exceeds `f`. Comparisons are strict, so a node
/// sitting exactly on a bound survives; use [`CostBound::g_below`] and
/// [`CostBound::f_below`] for strict upper limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBound {
    pub g: f64,
    pub h: f64,
    pub f: f64,
}

impl CostBound {
    /// No pruning: every component is `+inf`.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            g: f64::INFINITY,
            h: f64::INFINITY,
            f: f64::INFINITY,
        }
    }

    #[must_use]
    pub const fn new(g: f64, h: f64, f: f64) -> Self {
        Self { g, h, f }
    }

    /// Only paths strictly cheaper than `g` survive.
    #[must_use]
    pub fn g_below(g: f64) -> Self {
        Self {
            g: just_below(g),
            ..Self::unbounded()
        }
    }

    /// Only nodes whose `g + h` is strictly below `f` survive.
    #[must_use]
    pub fn f_below(f: f64) -> Self {
        Self {
            f: just_below(f),
            ..Self::unbounded()
        }
    }

    /// Returns `true` if a node with these values must be pruned.
    ///
    /// `f` is the node's `g + h`, independent of the ordering strategy, so
    /// the same bound means the same thing under uniform-cost, greedy and
    /// weighted orderings.
    #[must_use]
    pub fn violated_by(&self, g: f64, h: f64, f: f64) -> bool {
        g > self.g || h > self.h || f > self.f
    }

    /// Returns `true` if no component prunes anything.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.g == f64::INFINITY && self.h == f64::INFINITY && self.f == f64::INFINITY
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "f": cost_str(self.f),
            "g": cost_str(self.g),
            "h": cost_str(self.h),
        })
    }
}

impl Default for CostBound {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// The largest `f64` strictly less than `x`.
///
/// Infinities and NaN are returned unchanged.
#[must_use]
pub fn just_below(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    if x == 0.0 {
        // Smallest negative subnormal.
        return -f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}
