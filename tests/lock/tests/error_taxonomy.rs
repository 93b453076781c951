//! Error taxonomy lock tests.
//!
//! Configuration mistakes and broken states are errors; running out of
//! frontier, time or bound is not.

use std::error::Error;
use std::str::FromStr;
use std::time::Duration;

use lodestar_harness::contract::SearchWorldV1;
use lodestar_harness::runner::{run_search, RunConfig, RunError};
use lodestar_harness::worlds::graph::{GraphBuilder, GraphState, WeightedGraph};
use lodestar_kernel::space::{StateError, ZeroHeuristic};
use lodestar_search::{
    anytime_weighted_astar, AnytimeConfig, ConfigurationError, CostBound, DuplicatePolicy,
    SearchEngine, SearchError, Strategy, Termination,
};

const BUDGET: Duration = Duration::from_secs(10);

fn start(world: &WeightedGraph) -> SearchEngine<'_, GraphState> {
    let mut engine = SearchEngine::new(Strategy::UniformCost, DuplicatePolicy::Full);
    engine
        .init_search(
            world.initial_state(),
            move |s: &GraphState| world.is_goal(s),
            ZeroHeuristic,
            None,
        )
        .unwrap();
    engine
}

#[test]
fn broken_state_aborts_the_search() {
    let world = GraphBuilder::new()
        .edge("A", "B", 1.0)
        .edge("B", "Z", 1.0)
        .broken("B")
        .build("broken", "A", &["Z"])
        .unwrap();
    let err = start(&world)
        .search(BUDGET, CostBound::unbounded())
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::MalformedState {
            source: StateError::Malformed { .. }
        }
    ));
    assert!(err.source().unwrap().to_string().contains("B"));
}

#[test]
fn negative_and_nan_step_costs_are_malformed() {
    for cost in [-1.0, f64::NAN] {
        let world = GraphBuilder::new()
            .edge("A", "B", cost)
            .build("bad_cost", "A", &["B"])
            .unwrap();
        let err = start(&world)
            .search(BUDGET, CostBound::unbounded())
            .unwrap_err();
        assert!(
            matches!(
                err,
                SearchError::MalformedState {
                    source: StateError::InvalidStepCost { .. }
                }
            ),
            "{err:?}"
        );
    }
}

#[test]
fn malformed_state_surfaces_through_the_runner() {
    let world = GraphBuilder::new()
        .edge("A", "B", 1.0)
        .broken("A")
        .build("broken_root", "A", &["B"])
        .unwrap();
    let err = run_search(&world, &RunConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        RunError::Search(SearchError::MalformedState { .. })
    ));
}

#[test]
fn malformed_state_surfaces_through_anytime() {
    let world = GraphBuilder::new()
        .edge("A", "B", 1.0)
        .broken("A")
        .build("broken_root", "A", &["B"])
        .unwrap();
    let err = anytime_weighted_astar(
        world.initial_state(),
        |s: &GraphState| world.is_goal(s),
        ZeroHeuristic,
        &AnytimeConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::MalformedState { .. }));
}

#[test]
fn search_before_init_is_rejected() {
    let mut engine: SearchEngine<'_, GraphState> =
        SearchEngine::new(Strategy::AStar, DuplicatePolicy::Full);
    assert!(matches!(
        engine.search(BUDGET, CostBound::unbounded()),
        Err(SearchError::NotInitialized)
    ));
}

#[test]
fn custom_strategy_needs_an_fvalue_function() {
    let world = WeightedGraph::line().unwrap();
    let mut engine = SearchEngine::new(Strategy::Custom, DuplicatePolicy::Full);
    let err = engine
        .init_search(
            world.initial_state(),
            |s: &GraphState| world.is_goal(s),
            ZeroHeuristic,
            None,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Configuration(ConfigurationError::MissingFValueFunction)
    ));
}

#[test]
fn unknown_names_are_configuration_errors() {
    assert_eq!(
        Strategy::from_str("hill_climb"),
        Err(ConfigurationError::UnknownStrategy {
            name: "hill_climb".into()
        })
    );
    assert_eq!(
        DuplicatePolicy::from_str("sometimes"),
        Err(ConfigurationError::UnknownDuplicatePolicy {
            name: "sometimes".into()
        })
    );
}

#[test]
fn invalid_weights_are_rejected_before_searching() {
    let world = WeightedGraph::line().unwrap();
    let mut engine = SearchEngine::new(
        Strategy::WeightedAStar { weight: -2.0 },
        DuplicatePolicy::Full,
    );
    let err = engine
        .init_search(
            world.initial_state(),
            |s: &GraphState| world.is_goal(s),
            ZeroHeuristic,
            None,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Configuration(ConfigurationError::InvalidWeight { .. })
    ));

    for config in [
        AnytimeConfig {
            weight: 0.5,
            ..AnytimeConfig::default()
        },
        AnytimeConfig {
            weight: f64::INFINITY,
            ..AnytimeConfig::default()
        },
        AnytimeConfig {
            weight_decay: 0.0,
            ..AnytimeConfig::default()
        },
        AnytimeConfig {
            weight_decay: 1.5,
            ..AnytimeConfig::default()
        },
    ] {
        let result = anytime_weighted_astar(
            world.initial_state(),
            |s: &GraphState| world.is_goal(s),
            ZeroHeuristic,
            &config,
        );
        assert!(
            matches!(result, Err(SearchError::Configuration(_))),
            "{config:?}"
        );
    }
}

#[test]
fn exhaustion_and_timeout_are_outcomes() {
    let world = GraphBuilder::new()
        .edge("A", "B", 1.0)
        .node("Z")
        .build("unreachable", "A", &["Z"])
        .unwrap();
    let mut engine = start(&world);
    let exhausted = engine.search(BUDGET, CostBound::unbounded()).unwrap();
    assert!(!exhausted.is_goal_reached());
    assert_eq!(exhausted.stats.termination, Termination::FrontierExhausted);

    let timed_out = engine.search(Duration::ZERO, CostBound::unbounded()).unwrap();
    assert_eq!(timed_out.stats.termination, Termination::TimedOut);
}
