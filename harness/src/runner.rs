//! Harness runner: drives the search crate over a world and packages the
//! result as a [`RunReportV1`].
//!
//! The runner uses ONLY search-crate entry points (`SearchEngine`,
//! `anytime_weighted_astar`, `anytime_gbfs`). It never inspects the frontier
//! or counts anything itself; every number in a report comes from
//! [`SearchStats`].
//!
//! # Report layout
//!
//! ```text
//! {
//!   "schema_version": "run_report.v1",
//!   "world_id": ...,
//!   "config": { mode, policy / anytime parameters, costbound },
//!   "result": { solution_cost, path, path_len },
//!   "stats": { counters, termination },
//!   "trace_digest": "sha256:..." | null,
//!   "rounds": [...]            (anytime modes only)
//! }
//! ```
//!
//! Wall-clock values never enter the report, so two runs that stop for the
//! same reason produce byte-identical reports.

use std::time::Duration;

use lodestar_kernel::proof::canon::{canonical_json_bytes, cost_str, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT};
use lodestar_kernel::space::Memoized;
use lodestar_search::anytime::{anytime_gbfs, anytime_weighted_astar, AnytimeConfig, RestartPolicy};
use lodestar_search::{
    CostBound, DuplicatePolicy, SearchEngine, SearchError, SearchNode, SearchPolicyV1,
    SearchStats, Strategy,
};
use tracing::debug;

use crate::contract::SearchWorldV1;

/// Report schema tag.
pub const RUN_REPORT_SCHEMA: &str = "run_report.v1";

/// Default wall-clock budget for one run.
pub const DEFAULT_TIMEBOUND: Duration = Duration::from_secs(10);

/// Run configuration. Every `None` falls back to a default.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// `None` uses A*.
    pub strategy: Option<Strategy>,
    /// `None` uses [`DuplicatePolicy::Full`].
    pub duplicate_policy: Option<DuplicatePolicy>,
    /// `None` uses [`DEFAULT_TIMEBOUND`].
    pub timebound: Option<Duration>,
    /// `None` searches unbounded.
    pub costbound: Option<CostBound>,
    /// Record the expansion trace and bind its digest into the report.
    pub record_trace: bool,
    /// Wrap the world heuristic in [`Memoized`].
    pub memoize_heuristic: bool,
}

impl RunConfig {
    fn policy(&self) -> SearchPolicyV1 {
        let defaults = SearchPolicyV1::default();
        SearchPolicyV1 {
            strategy: self.strategy.unwrap_or(defaults.strategy),
            duplicate_policy: self.duplicate_policy.unwrap_or(defaults.duplicate_policy),
            record_trace: self.record_trace,
        }
    }
}

/// Error during a harness run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Configuration or state failure from the engine.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// Report serialization failed.
    #[error("report serialization failed: {0}")]
    Canon(#[from] CanonError),
}

/// A finished run: the canonical report bytes and their digest, plus the
/// parsed-out fields tests usually want.
#[derive(Debug, Clone)]
pub struct RunReportV1 {
    pub world_id: String,
    /// Goal path cost, `None` if no solution was found.
    pub solution_cost: Option<f64>,
    /// State labels from the start state to the goal (empty without a solution).
    pub path: Vec<String>,
    pub stats: SearchStats,
    pub trace_digest: Option<ContentHash>,
    /// Canonical JSON bytes of the report.
    pub bytes: Vec<u8>,
    /// `canonical_hash(DOMAIN_RUN_REPORT, bytes)`.
    pub digest: ContentHash,
}

impl RunReportV1 {
    #[must_use]
    pub fn solved(&self) -> bool {
        self.solution_cost.is_some()
    }
}

/// Run one configured search over `world`.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the policy is invalid or a state fails to
/// expand, and [`RunError::Canon`] if the report cannot be serialized.
pub fn run_search<W: SearchWorldV1>(world: &W, config: &RunConfig) -> Result<RunReportV1, RunError> {
    let policy = config.policy();
    let costbound = config.costbound.unwrap_or_default();
    let timebound = config.timebound.unwrap_or(DEFAULT_TIMEBOUND);

    let mut engine = SearchEngine::with_policy(policy)?;
    let goal_fn = |s: &W::State| world.is_goal(s);
    let heur_fn = |s: &W::State| world.heuristic(s);
    if config.memoize_heuristic {
        engine.init_search(world.initial_state(), goal_fn, Memoized::new(heur_fn), None)?;
    } else {
        engine.init_search(world.initial_state(), goal_fn, heur_fn, None)?;
    }
    let outcome = engine.search(timebound, costbound)?;

    let trace_digest = match &outcome.trace {
        Some(trace) => Some(trace.digest()?),
        None => None,
    };
    let mut config_json = policy.to_json_value();
    config_json["mode"] = serde_json::json!("single");
    config_json["costbound"] = costbound.to_json_value();
    config_json["memoize_heuristic"] = serde_json::json!(config.memoize_heuristic);

    build_report(
        world,
        config_json,
        outcome.goal.as_deref(),
        outcome.stats,
        trace_digest,
        None,
    )
}

/// Run anytime weighted A* over `world` with its default heuristic.
///
/// # Errors
///
/// Returns [`RunError::Search`] for an invalid config or a failing state,
/// and [`RunError::Canon`] if the report cannot be serialized.
pub fn run_anytime_weighted_astar<W: SearchWorldV1>(
    world: &W,
    config: &AnytimeConfig,
) -> Result<RunReportV1, RunError> {
    let outcome = anytime_weighted_astar(
        world.initial_state(),
        |s: &W::State| world.is_goal(s),
        |s: &W::State| world.heuristic(s),
        config,
    )?;
    let config_json = serde_json::json!({
        "duplicate_policy": config.duplicate_policy.name(),
        "mode": "anytime_weighted_astar",
        "restart": match config.restart {
            RestartPolicy::StopOnFailure => "stop_on_failure",
            RestartPolicy::RelaxWeight => "relax_weight",
        },
        "weight": cost_str(config.weight),
        "weight_decay": cost_str(config.weight_decay),
    });
    build_report(
        world,
        config_json,
        outcome.best.as_deref(),
        outcome.stats.clone(),
        None,
        Some(outcome.rounds_json()["rounds"].clone()),
    )
}

/// Run anytime greedy best-first search over `world`.
///
/// # Errors
///
/// Returns [`RunError::Search`] if a state fails to expand, and
/// [`RunError::Canon`] if the report cannot be serialized.
pub fn run_anytime_gbfs<W: SearchWorldV1>(
    world: &W,
    timebound: Option<Duration>,
) -> Result<RunReportV1, RunError> {
    let outcome = anytime_gbfs(
        world.initial_state(),
        |s: &W::State| world.is_goal(s),
        |s: &W::State| world.heuristic(s),
        timebound.unwrap_or(DEFAULT_TIMEBOUND),
    )?;
    build_report(
        world,
        serde_json::json!({ "mode": "anytime_gbfs" }),
        outcome.best.as_deref(),
        outcome.stats.clone(),
        None,
        Some(outcome.rounds_json()["rounds"].clone()),
    )
}

fn build_report<W: SearchWorldV1>(
    world: &W,
    config_json: serde_json::Value,
    goal: Option<&SearchNode<W::State>>,
    stats: SearchStats,
    trace_digest: Option<ContentHash>,
    rounds: Option<serde_json::Value>,
) -> Result<RunReportV1, RunError> {
    let path: Vec<String> = goal
        .map(|g| g.states().into_iter().map(|s| world.state_label(s)).collect())
        .unwrap_or_default();
    let solution_cost = goal.map(|g| g.gval);

    let mut report = serde_json::json!({
        "config": config_json,
        "result": {
            "path": path,
            "path_len": path.len(),
            "solution_cost": solution_cost.map(cost_str),
        },
        "schema_version": RUN_REPORT_SCHEMA,
        "stats": stats.to_json_value(),
        "trace_digest": trace_digest.as_ref().map(ContentHash::as_str),
        "world_id": world.world_id(),
    });
    if let Some(rounds) = rounds {
        report["rounds"] = rounds;
    }

    let bytes = canonical_json_bytes(&report)?;
    let digest = canonical_hash(DOMAIN_RUN_REPORT, &bytes);

    debug!(
        world_id = world.world_id(),
        solved = solution_cost.is_some(),
        expanded = stats.states_expanded,
        digest = digest.as_str(),
        "run report built"
    );

    Ok(RunReportV1 {
        world_id: world.world_id().to_string(),
        solution_cost,
        path,
        stats,
        trace_digest,
        bytes,
        digest,
    })
}
