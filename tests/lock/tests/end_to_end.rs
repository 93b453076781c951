//! End-to-end scenarios on the four-node path graph.
//!
//! `A -1-> B -1-> C -1-> D`, goal `D`, zero heuristic; then the same graph
//! with a direct `A -10-> D` edge.

use std::time::Duration;

use lodestar_harness::contract::SearchWorldV1;
use lodestar_harness::worlds::graph::{GraphState, WeightedGraph};
use lodestar_kernel::space::ZeroHeuristic;
use lodestar_search::{
    CostBound, DuplicatePolicy, SearchEngine, SearchPolicyV1, Strategy, Termination,
};

const BUDGET: Duration = Duration::from_secs(30);

#[test]
fn uniform_cost_on_path_graph() {
    let world = WeightedGraph::line().unwrap();
    let policy = SearchPolicyV1::new(Strategy::UniformCost, DuplicatePolicy::Full).with_trace();
    let mut engine = SearchEngine::with_policy(policy).unwrap();
    engine
        .init_search(
            world.initial_state(),
            |s: &GraphState| world.is_goal(s),
            ZeroHeuristic,
            None,
        )
        .unwrap();

    let outcome = engine.search(BUDGET, CostBound::unbounded()).unwrap();
    let goal = outcome.goal.as_ref().expect("D is reachable");
    assert!((goal.gval - 3.0).abs() < f64::EPSILON);
    assert_eq!(outcome.stats.states_expanded, 4);
    assert_eq!(outcome.stats.termination, Termination::GoalReached);

    let order: Vec<&str> = outcome
        .trace
        .as_ref()
        .unwrap()
        .states()
        .into_iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(order, vec!["A", "B", "C", "D"]);

    let path: Vec<&str> = goal.states().into_iter().map(|s| s.name()).collect();
    assert_eq!(path, vec!["A", "B", "C", "D"]);
    let actions: Vec<&String> = goal.actions();
    assert_eq!(actions, vec!["B", "C", "D"]);
}

#[test]
fn astar_with_zero_heuristic_ignores_expensive_shortcut() {
    let world = WeightedGraph::line_with_shortcut().unwrap();
    let mut engine = SearchEngine::new(Strategy::AStar, DuplicatePolicy::Full);
    engine
        .init_search(
            world.initial_state(),
            |s: &GraphState| world.is_goal(s),
            ZeroHeuristic,
            None,
        )
        .unwrap();

    let outcome = engine.search(BUDGET, CostBound::unbounded()).unwrap();
    let goal = outcome.goal.expect("D is reachable");
    assert!((goal.gval - 3.0).abs() < f64::EPSILON);
    let path: Vec<&str> = goal.states().into_iter().map(|s| s.name()).collect();
    assert_eq!(path, vec!["A", "B", "C", "D"]);
}

#[test]
fn path_reconstruction_is_restartable() {
    let world = WeightedGraph::line().unwrap();
    let mut engine = SearchEngine::new(Strategy::UniformCost, DuplicatePolicy::Full);
    engine
        .init_search(
            world.initial_state(),
            |s: &GraphState| world.is_goal(s),
            ZeroHeuristic,
            None,
        )
        .unwrap();
    let goal = engine
        .search(BUDGET, CostBound::unbounded())
        .unwrap()
        .goal
        .unwrap();

    let first: Vec<&str> = goal.ancestors().map(|n| n.state.name()).collect();
    let second: Vec<&str> = goal.ancestors().map(|n| n.state.name()).collect();
    assert_eq!(first, vec!["D", "C", "B", "A"]);
    assert_eq!(first, second);
}
