//! Anytime wrappers: repeated searches under a tightening cost bound.
//!
//! Each round runs the engine on the same problem with the bound set just
//! below the best solution so far, so every accepted round strictly improves
//! the returned solution. One engine serves all rounds: the heuristic (and any
//! cache it keeps) is installed once and shared by every round.

use std::rc::Rc;
use std::time::{Duration, Instant};

use lodestar_kernel::proof::canon::{canonical_json_bytes, cost_str, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_ANYTIME_ROUNDS};
use lodestar_kernel::space::{GoalTest, Heuristic, SearchState};
use tracing::debug;

use crate::bound::CostBound;
use crate::error::{ConfigurationError, SearchError};
use crate::node::SearchNode;
use crate::policy::{DuplicatePolicy, SearchPolicyV1};
use crate::search::SearchEngine;
use crate::stats::{SearchStats, Termination};
use crate::strategy::{Strategy, WeightedSum};

/// What to do when a round finds nothing under the current bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    /// Stop and return the best solution so far. Default.
    StopOnFailure,
    /// Lower the weight by `weight_decay` and retry under the same bound,
    /// until the weight reaches 1.0 or time runs out.
    RelaxWeight,
}

/// Anytime weighted A* configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnytimeConfig {
    /// Initial heuristic weight (`f = g + weight * h`). Must be ≥ 1.
    pub weight: f64,
    /// Overall wall-clock budget, shared by all rounds.
    pub timebound: Duration,
    /// Factor applied to the weight after each round, in `(0, 1]`. The
    /// weight never drops below 1.0.
    pub weight_decay: f64,
    pub restart: RestartPolicy,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for AnytimeConfig {
    fn default() -> Self {
        Self {
            weight: 1.0,
            timebound: Duration::from_secs(10),
            weight_decay: 1.0,
            restart: RestartPolicy::StopOnFailure,
            duplicate_policy: DuplicatePolicy::Full,
        }
    }
}

impl AnytimeConfig {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidWeight`] for a weight that is not
    /// finite or below 1, and [`ConfigurationError::InvalidDecay`] for a
    /// decay outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.weight.is_finite() || self.weight < 1.0 {
            return Err(ConfigurationError::InvalidWeight {
                weight: self.weight,
            });
        }
        if !(self.weight_decay > 0.0 && self.weight_decay <= 1.0) {
            return Err(ConfigurationError::InvalidDecay {
                decay: self.weight_decay,
            });
        }
        Ok(())
    }

    fn next_weight(&self, weight: f64) -> f64 {
        (weight * self.weight_decay).max(1.0)
    }
}

/// One engine invocation inside an anytime run.
#[derive(Debug, Clone)]
pub struct AnytimeRound {
    pub index: u32,
    /// Weight used for the round; `None` for greedy rounds.
    pub weight: Option<f64>,
    pub bound: CostBound,
    pub solution_gval: Option<f64>,
    pub solution_hval: Option<f64>,
    pub stats: SearchStats,
}

impl AnytimeRound {
    #[must_use]
    pub fn found_solution(&self) -> bool {
        self.solution_gval.is_some()
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "bound": self.bound.to_json_value(),
            "index": self.index,
            "solution_gval": self.solution_gval.map(cost_str),
            "solution_hval": self.solution_hval.map(cost_str),
            "stats": self.stats.to_json_value(),
            "weight": self.weight.map(cost_str),
        })
    }
}

/// Result of an anytime run.
#[derive(Debug)]
pub struct AnytimeOutcome<S: SearchState> {
    /// Best (last accepted) goal node.
    pub best: Option<Rc<SearchNode<S>>>,
    pub rounds: Vec<AnytimeRound>,
    /// Counters merged over all rounds.
    pub stats: SearchStats,
}

impl<S: SearchState> AnytimeOutcome<S> {
    #[must_use]
    pub fn best_gval(&self) -> Option<f64> {
        self.best.as_ref().map(|n| n.gval)
    }

    /// Path costs of the accepted solutions, in discovery order.
    #[must_use]
    pub fn solution_costs(&self) -> Vec<f64> {
        self.rounds.iter().filter_map(|r| r.solution_gval).collect()
    }

    #[must_use]
    pub fn rounds_json(&self) -> serde_json::Value {
        let rounds: Vec<serde_json::Value> =
            self.rounds.iter().map(AnytimeRound::to_json_value).collect();
        serde_json::json!({ "rounds": rounds })
    }

    /// Digest of the round log (timing excluded).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn rounds_digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.rounds_json())?;
        Ok(canonical_hash(DOMAIN_ANYTIME_ROUNDS, &bytes))
    }
}

/// Anytime weighted A*.
///
/// The first round orders by `g + weight * h` with no bound. After each
/// solution the bound becomes "`g + h` strictly below the incumbent's
/// `g + h`" (g and h stay unbounded), and the weight is multiplied by
/// `weight_decay`. The run ends
/// when the overall time budget is spent or, under
/// [`RestartPolicy::StopOnFailure`], at the first round that finds nothing.
///
/// # Errors
///
/// Returns [`SearchError::Configuration`] for an invalid config and
/// propagates [`SearchError::MalformedState`] from any round.
pub fn anytime_weighted_astar<'a, S, G, H>(
    initial: S,
    goal_fn: G,
    heur_fn: H,
    config: &AnytimeConfig,
) -> Result<AnytimeOutcome<S>, SearchError>
where
    S: SearchState + 'a,
    G: GoalTest<S> + 'a,
    H: Heuristic<S> + 'a,
{
    config.validate()?;
    let policy = SearchPolicyV1::new(
        Strategy::WeightedAStar {
            weight: config.weight,
        },
        config.duplicate_policy,
    );
    let mut engine = SearchEngine::with_policy(policy)?;
    engine.init_search(initial, goal_fn, heur_fn, None)?;

    let mut weight = config.weight;
    run_rounds(&mut engine, config.timebound, |engine, outcome| {
        let round_weight = weight;
        let accepted = outcome.is_some();
        let next = config.next_weight(weight);
        let keep_going = accepted
            || (config.restart == RestartPolicy::RelaxWeight && next < weight);
        if keep_going && next < weight {
            weight = next;
            engine.set_fval_function(Box::new(WeightedSum { weight }))?;
        }
        Ok(RoundPlan {
            weight: Some(round_weight),
            keep_going,
            next_bound: outcome.map(|best| CostBound::f_below(best.gval + best.hval)),
        })
    })
}

/// Anytime greedy best-first search.
///
/// Rounds order by `h` alone; after each solution only paths strictly
/// cheaper than the best one survive. Stops on the first round that finds
/// nothing or when `timebound` is spent.
///
/// # Errors
///
/// Propagates [`SearchError::MalformedState`] from any round.
pub fn anytime_gbfs<'a, S, G, H>(
    initial: S,
    goal_fn: G,
    heur_fn: H,
    timebound: Duration,
) -> Result<AnytimeOutcome<S>, SearchError>
where
    S: SearchState + 'a,
    G: GoalTest<S> + 'a,
    H: Heuristic<S> + 'a,
{
    let mut engine = SearchEngine::new(Strategy::BestFirst, DuplicatePolicy::Full);
    engine.init_search(initial, goal_fn, heur_fn, None)?;

    run_rounds(&mut engine, timebound, |_, outcome| {
        Ok(RoundPlan {
            weight: None,
            keep_going: outcome.is_some(),
            next_bound: outcome.map(|best| CostBound::g_below(best.gval)),
        })
    })
}

/// Decision taken after a round.
struct RoundPlan {
    /// Weight the finished round ran with.
    weight: Option<f64>,
    keep_going: bool,
    /// Replacement bound; `None` keeps the current one.
    next_bound: Option<CostBound>,
}

/// Shared restart loop. `after_round` sees the round's goal (if any) and
/// decides whether and how to continue.
fn run_rounds<'a, S, F>(
    engine: &mut SearchEngine<'a, S>,
    timebound: Duration,
    mut after_round: F,
) -> Result<AnytimeOutcome<S>, SearchError>
where
    S: SearchState + 'a,
    F: FnMut(&mut SearchEngine<'a, S>, Option<&SearchNode<S>>) -> Result<RoundPlan, SearchError>,
{
    let start = Instant::now();
    let mut bound = CostBound::unbounded();
    let mut best: Option<Rc<SearchNode<S>>> = None;
    let mut rounds = Vec::new();
    let mut stats = SearchStats::new();

    for index in 0u32.. {
        let remaining = timebound.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            stats.termination = Termination::TimedOut;
            break;
        }

        let outcome = engine.search(remaining, bound)?;
        stats.merge(&outcome.stats);
        let plan = after_round(engine, outcome.goal.as_deref())?;

        debug!(
            round = index,
            found = outcome.goal.is_some(),
            gval = %outcome.goal.as_ref().map_or_else(|| "-".to_string(), |g| cost_str(g.gval)),
            expanded = outcome.stats.states_expanded,
            termination = outcome.stats.termination.name(),
            "anytime round finished"
        );

        rounds.push(AnytimeRound {
            index,
            weight: plan.weight,
            bound,
            solution_gval: outcome.goal.as_ref().map(|g| g.gval),
            solution_hval: outcome.goal.as_ref().map(|g| g.hval),
            stats: outcome.stats,
        });
        if let Some(next) = plan.next_bound {
            bound = next;
        }
        if outcome.goal.is_some() {
            best = outcome.goal;
        }
        if !plan.keep_going {
            break;
        }
    }

    stats.total_time = start.elapsed();
    Ok(AnytimeOutcome {
        best,
        rounds,
        stats,
    })
}
