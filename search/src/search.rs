//! Search entry point and expansion loop.

use std::rc::Rc;
use std::time::{Duration, Instant};

use lodestar_kernel::proof::canon::cost_str;
use lodestar_kernel::space::{GoalTest, Heuristic, SearchState};
use tracing::{debug, trace};

use crate::bound::CostBound;
use crate::error::{ConfigurationError, SearchError};
use crate::explored::ExploredTable;
use crate::frontier::BestFirstFrontier;
use crate::node::SearchNode;
use crate::policy::{DuplicatePolicy, SearchPolicyV1};
use crate::stats::{SearchStats, Termination};
use crate::strategy::{FValueFn, Strategy};
use crate::trace::SearchTrace;

/// Result of one `search` call.
///
/// `goal` is `None` when no goal was found within the time and cost bounds;
/// `stats.termination` says which bound stopped the search.
#[derive(Debug)]
pub struct SearchOutcome<S: SearchState> {
    /// The goal node (if found). Its parent chain is the solution path.
    pub goal: Option<Rc<SearchNode<S>>>,
    /// Counters for this invocation.
    pub stats: SearchStats,
    /// Expansion log, when the policy records one.
    pub trace: Option<SearchTrace<S>>,
}

impl<S: SearchState> SearchOutcome<S> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.goal.is_some()
    }

    /// Path cost of the goal, if one was found.
    #[must_use]
    pub fn goal_gval(&self) -> Option<f64> {
        self.goal.as_ref().map(|g| g.gval)
    }
}

/// Problem-specific callbacks installed by `init_search`.
struct Session<'a, S: SearchState> {
    initial: S,
    goal: Box<dyn GoalTest<S> + 'a>,
    heuristic: Box<dyn Heuristic<S> + 'a>,
    fval: Box<dyn FValueFn<S> + 'a>,
}

/// Best-first search engine.
///
/// Configure once with a strategy and duplicate policy, install a problem
/// with [`SearchEngine::init_search`], then call [`SearchEngine::search`] as
/// many times as needed (for example with successively tighter cost bounds).
/// Every `search` call starts from the initial state with an empty frontier
/// and explored table; only the heuristic's own cache carries over between
/// calls on the same problem.
pub struct SearchEngine<'a, S: SearchState> {
    policy: SearchPolicyV1,
    session: Option<Session<'a, S>>,
    frontier: BestFirstFrontier<S>,
    explored: ExploredTable<S>,
}

impl<'a, S: SearchState + 'a> SearchEngine<'a, S> {
    /// Engine with the given strategy and duplicate policy, tracing off.
    ///
    /// Weighted strategies are validated at `init_search`.
    #[must_use]
    pub fn new(strategy: Strategy, duplicate_policy: DuplicatePolicy) -> Self {
        Self::from_policy(SearchPolicyV1::new(strategy, duplicate_policy))
    }

    /// Engine from a full policy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Configuration`] if the policy fails validation.
    pub fn with_policy(policy: SearchPolicyV1) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self::from_policy(policy))
    }

    fn from_policy(policy: SearchPolicyV1) -> Self {
        Self {
            policy,
            session: None,
            frontier: BestFirstFrontier::new(policy.strategy.tie_break()),
            explored: ExploredTable::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    /// Install a new problem, discarding everything left from the previous one.
    ///
    /// `fval_fn` overrides the strategy's ordering; it is required for
    /// [`Strategy::Custom`]. The heuristic's cache is reset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingFValueFunction`] for `Custom`
    /// without `fval_fn`, or [`ConfigurationError::InvalidWeight`] for an
    /// unusable weighted strategy.
    pub fn init_search<G, H>(
        &mut self,
        initial: S,
        goal_fn: G,
        heur_fn: H,
        fval_fn: Option<Box<dyn FValueFn<S> + 'a>>,
    ) -> Result<(), SearchError>
    where
        G: GoalTest<S> + 'a,
        H: Heuristic<S> + 'a,
    {
        self.session = None;
        self.frontier.clear();
        self.explored.clear();

        self.policy.validate()?;
        let fval = match fval_fn {
            Some(f) => f,
            None => self
                .policy
                .strategy
                .default_fval::<S>()
                .ok_or(ConfigurationError::MissingFValueFunction)?,
        };

        let mut heuristic: Box<dyn Heuristic<S> + 'a> = Box::new(heur_fn);
        heuristic.reset();

        self.session = Some(Session {
            initial,
            goal: Box::new(goal_fn),
            heuristic,
            fval,
        });
        Ok(())
    }

    /// Replace the ordering of the installed problem (used by anytime
    /// wrappers to change the weight between rounds).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotInitialized`] if no problem is installed.
    pub fn set_fval_function(&mut self, fval: Box<dyn FValueFn<S> + 'a>) -> Result<(), SearchError> {
        let session = self.session.as_mut().ok_or(SearchError::NotInitialized)?;
        session.fval = fval;
        Ok(())
    }

    /// Number of states in the explored table after the last `search`.
    #[must_use]
    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }

    /// Run the expansion loop.
    ///
    /// Returns the first goal node that satisfies the goal test and survives
    /// `costbound`, or `goal: None` if the frontier empties or `timebound`
    /// elapses first. The clock is checked once per iteration, so the call
    /// can overrun `timebound` by the cost of one expansion.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotInitialized`] before `init_search`, and
    /// [`SearchError::MalformedState`] if a state fails to produce its
    /// successors.
    pub fn search(
        &mut self,
        timebound: Duration,
        costbound: CostBound,
    ) -> Result<SearchOutcome<S>, SearchError> {
        let start = Instant::now();
        let policy = self.policy;
        let session = self.session.as_mut().ok_or(SearchError::NotInitialized)?;
        let frontier = &mut self.frontier;
        let explored = &mut self.explored;
        frontier.clear();
        explored.clear();

        let mut stats = SearchStats::new();
        let mut expansion_log = policy.record_trace.then(SearchTrace::new);
        let mut next_creation_order: u64 = 0;

        debug!(
            strategy = policy.strategy.name(),
            duplicate_policy = policy.duplicate_policy.name(),
            timebound_ms = u64::try_from(timebound.as_millis()).unwrap_or(u64::MAX),
            g_bound = %cost_str(costbound.g),
            h_bound = %cost_str(costbound.h),
            f_bound = %cost_str(costbound.f),
            "search started"
        );

        // Root node
        let root_h = session.heuristic.estimate(&session.initial);
        let mut root = SearchNode::root(session.initial.clone(), root_h);
        root.fval = session.fval.fval(&root);
        next_creation_order += 1;
        if root_h.is_infinite() {
            stats.states_pruned_as_dead_end += 1;
        } else if costbound.violated_by(root.gval, root.hval, root.gval + root.hval) {
            stats.states_pruned_by_cost += 1;
        } else {
            frontier.push(Rc::new(root));
        }

        let mut goal = None;
        let termination = loop {
            if start.elapsed() >= timebound {
                break Termination::TimedOut;
            }

            let Some(current) = frontier.pop() else {
                break Termination::FrontierExhausted;
            };

            if costbound.violated_by(current.gval, current.hval, current.gval + current.hval) {
                stats.states_pruned_by_cost += 1;
                continue;
            }

            if policy.duplicate_policy == DuplicatePolicy::Full {
                if explored.is_dominated(&current.state, current.gval) {
                    stats.states_pruned_by_cycle_check += 1;
                    continue;
                }
                explored.record(&current.state, current.gval);
            }

            stats.states_expanded += 1;
            if let Some(log) = expansion_log.as_mut() {
                log.push(
                    current.state.clone(),
                    current.gval,
                    current.hval,
                    current.fval,
                    current.depth,
                );
            }

            if session.goal.is_goal(&current.state) {
                trace!(gval = %cost_str(current.gval), depth = current.depth, "goal reached");
                goal = Some(current);
                break Termination::GoalReached;
            }

            for successor in current.state.successors()? {
                successor.validate()?;
                stats.states_generated += 1;
                let child_g = current.gval + successor.cost;

                let duplicate = match policy.duplicate_policy {
                    DuplicatePolicy::None => false,
                    DuplicatePolicy::Path => current.path_contains(&successor.state),
                    DuplicatePolicy::Full => explored.is_dominated(&successor.state, child_g),
                };
                if duplicate {
                    stats.states_pruned_by_cycle_check += 1;
                    continue;
                }

                let child_h = session.heuristic.estimate(&successor.state);
                if child_h.is_infinite() {
                    stats.states_pruned_as_dead_end += 1;
                    continue;
                }
                if costbound.violated_by(child_g, child_h, child_g + child_h) {
                    stats.states_pruned_by_cost += 1;
                    continue;
                }

                let mut child = SearchNode::child(
                    &current,
                    successor.action,
                    successor.state,
                    successor.cost,
                    child_h,
                    next_creation_order,
                );
                next_creation_order += 1;
                child.fval = session.fval.fval(&child);
                frontier.push(Rc::new(child));
            }
        };

        stats.termination = termination;
        stats.frontier_high_water = frontier.high_water();
        stats.total_time = start.elapsed();
        // Queued nodes hold their whole parent chains; release them now.
        frontier.clear();

        debug!(
            termination = termination.name(),
            expanded = stats.states_expanded,
            generated = stats.states_generated,
            pruned_by_cost = stats.states_pruned_by_cost,
            pruned_by_cycle_check = stats.states_pruned_by_cycle_check,
            "search finished"
        );

        Ok(SearchOutcome {
            goal,
            stats,
            trace: expansion_log,
        })
    }
}
