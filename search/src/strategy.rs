//! Ordering strategies: which f-value the frontier sorts by.
//!
//! The engine never branches on the strategy inside its loop. A strategy is
//! resolved once, at `init_search`, into a boxed [`FValueFn`] and a
//! [`TieBreak`]; the loop only calls `fval`.

use std::str::FromStr;

use lodestar_kernel::space::SearchState;

use crate::error::ConfigurationError;
use crate::frontier::TieBreak;
use crate::node::SearchNode;

/// Computes the frontier ordering key for a node.
pub trait FValueFn<S: SearchState> {
    fn fval(&self, node: &SearchNode<S>) -> f64;
}

impl<S, F> FValueFn<S> for F
where
    S: SearchState,
    F: Fn(&SearchNode<S>) -> f64,
{
    fn fval(&self, node: &SearchNode<S>) -> f64 {
        self(node)
    }
}

/// Orders by path cost (uniform-cost search).
#[derive(Debug, Clone, Copy)]
pub struct PathCost;

impl<S: SearchState> FValueFn<S> for PathCost {
    fn fval(&self, node: &SearchNode<S>) -> f64 {
        node.gval
    }
}

/// Orders by heuristic estimate alone (greedy best-first).
#[derive(Debug, Clone, Copy)]
pub struct HeuristicOnly;

impl<S: SearchState> FValueFn<S> for HeuristicOnly {
    fn fval(&self, node: &SearchNode<S>) -> f64 {
        node.hval
    }
}

/// Orders by `g + weight * h`. `weight = 1` is A*.
#[derive(Debug, Clone, Copy)]
pub struct WeightedSum {
    pub weight: f64,
}

impl<S: SearchState> FValueFn<S> for WeightedSum {
    fn fval(&self, node: &SearchNode<S>) -> f64 {
        // Keeps 0 * inf from turning a dead end into NaN.
        if node.hval.is_infinite() {
            return f64::INFINITY;
        }
        node.gval + self.weight * node.hval
    }
}

/// Constant key: ordering falls entirely to the tie-break, giving
/// breadth-first (FIFO) or depth-first (LIFO) expansion.
#[derive(Debug, Clone, Copy)]
pub struct Constant;

impl<S: SearchState> FValueFn<S> for Constant {
    fn fval(&self, _node: &SearchNode<S>) -> f64 {
        0.0
    }
}

/// Search strategy selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// `f = g`.
    UniformCost,
    /// `f = h` (greedy best-first).
    BestFirst,
    /// `f = g + h`.
    AStar,
    /// `f = g + weight * h`.
    WeightedAStar { weight: f64 },
    /// Caller-supplied f-value function.
    Custom,
    /// Generation order, oldest first.
    BreadthFirst,
    /// Generation order, newest first.
    DepthFirst,
}

impl Strategy {
    /// Stable lowercase name.
    ///
    /// Every name except `weighted_astar` parses back through [`FromStr`];
    /// weighted A* needs its weight and is built directly.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UniformCost => "uniform_cost",
            Self::BestFirst => "best_first",
            Self::AStar => "astar",
            Self::WeightedAStar { .. } => "weighted_astar",
            Self::Custom => "custom",
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
        }
    }

    /// Tie-break rule among equal f-values.
    #[must_use]
    pub fn tie_break(&self) -> TieBreak {
        match self {
            Self::DepthFirst => TieBreak::Lifo,
            _ => TieBreak::Fifo,
        }
    }

    /// Reject weights the ordering cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidWeight`] for a negative or
    /// non-finite weight.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Self::WeightedAStar { weight } = *self {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidWeight { weight });
            }
        }
        Ok(())
    }

    /// The built-in f-value function for this strategy.
    ///
    /// `Custom` has none; the caller must supply one.
    #[must_use]
    pub fn default_fval<'a, S: SearchState + 'a>(&self) -> Option<Box<dyn FValueFn<S> + 'a>> {
        match *self {
            Self::UniformCost => Some(Box::new(PathCost)),
            Self::BestFirst => Some(Box::new(HeuristicOnly)),
            Self::AStar => Some(Box::new(WeightedSum { weight: 1.0 })),
            Self::WeightedAStar { weight } => Some(Box::new(WeightedSum { weight })),
            Self::BreadthFirst | Self::DepthFirst => Some(Box::new(Constant)),
            Self::Custom => None,
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfigurationError;

    /// Parse a strategy name. Weighted A* is not nameable; construct it
    /// directly with its weight.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform_cost" | "ucs" => Ok(Self::UniformCost),
            "best_first" => Ok(Self::BestFirst),
            "astar" => Ok(Self::AStar),
            "custom" => Ok(Self::Custom),
            "breadth_first" => Ok(Self::BreadthFirst),
            "depth_first" => Ok(Self::DepthFirst),
            other => Err(ConfigurationError::UnknownStrategy {
                name: other.to_string(),
            }),
        }
    }
}
