//! Anytime lock tests: accepted solutions only ever get cheaper.

use std::cell::Cell as Counter;
use std::rc::Rc;
use std::time::Duration;

use lodestar_harness::contract::SearchWorldV1;
use lodestar_harness::worlds::graph::{GraphBuilder, GraphState, WeightedGraph};
use lodestar_harness::worlds::grid::{Cell, GridWorld};
use lodestar_kernel::space::Heuristic;
use lodestar_search::{
    anytime_gbfs, anytime_weighted_astar, AnytimeConfig, DuplicatePolicy, RestartPolicy,
};

const BUDGET: Duration = Duration::from_secs(60);

/// Three routes from S to T costing 12, 8 and 5; the heuristic favours the
/// most expensive one first.
fn three_routes() -> WeightedGraph {
    GraphBuilder::new()
        .edge("S", "x1", 6.0)
        .edge("S", "y1", 2.0)
        .edge("S", "z1", 1.0)
        .edge("x1", "T", 6.0)
        .edge("y1", "y2", 3.0)
        .edge("y2", "T", 3.0)
        .edge("z1", "z2", 1.0)
        .edge("z2", "z3", 1.0)
        .edge("z3", "z4", 1.0)
        .edge("z4", "T", 1.0)
        .heuristic("S", 5.0)
        .heuristic("x1", 0.0)
        .heuristic("y1", 1.0)
        .heuristic("y2", 1.0)
        .heuristic("z1", 4.0)
        .heuristic("z2", 3.0)
        .heuristic("z3", 2.0)
        .heuristic("z4", 1.0)
        .build("three_routes", "S", &["T"])
        .unwrap()
}

fn weighted(world: &WeightedGraph, config: &AnytimeConfig) -> lodestar_search::AnytimeOutcome<GraphState> {
    anytime_weighted_astar(
        world.initial_state(),
        |s: &GraphState| world.is_goal(s),
        |s: &GraphState| world.heuristic(s),
        config,
    )
    .unwrap()
}

#[test]
fn weighted_astar_costs_never_increase() {
    let world = three_routes();
    let config = AnytimeConfig {
        weight: 4.0,
        timebound: BUDGET,
        ..AnytimeConfig::default()
    };
    let outcome = weighted(&world, &config);
    let costs = outcome.solution_costs();
    assert!(costs.len() >= 2, "expected refinement, got {costs:?}");
    assert!(costs.windows(2).all(|w| w[1] <= w[0]), "{costs:?}");
    assert_eq!(outcome.best_gval(), Some(5.0));
}

#[test]
fn final_weighted_value_does_not_exceed_first_round() {
    let world = three_routes();
    let config = AnytimeConfig {
        weight: 4.0,
        weight_decay: 0.5,
        timebound: BUDGET,
        ..AnytimeConfig::default()
    };
    let outcome = weighted(&world, &config);
    let solved: Vec<_> = outcome.rounds.iter().filter(|r| r.found_solution()).collect();
    let first = solved.first().unwrap();
    let last = solved.last().unwrap();
    let value = |r: &lodestar_search::AnytimeRound| {
        r.solution_gval.unwrap() + r.weight.unwrap() * r.solution_hval.unwrap()
    };
    assert!(value(last) <= value(first));
}

#[test]
fn each_round_is_bounded_by_the_previous_best() {
    let world = three_routes();
    let config = AnytimeConfig {
        weight: 4.0,
        timebound: BUDGET,
        ..AnytimeConfig::default()
    };
    let outcome = weighted(&world, &config);
    let mut best = f64::INFINITY;
    for round in &outcome.rounds {
        assert!(round.bound.f < best || best.is_infinite());
        if let Some(g) = round.solution_gval {
            assert!(g < best);
            best = g;
        }
    }
}

#[test]
fn gbfs_converges_to_optimum_on_maze() {
    let maze = GridWorld::parse(
        "
        S...#....
        .##.#.##.
        .#.....#.
        .#.###.#.
        ...#...#G
        ",
    )
    .unwrap();
    let outcome = anytime_gbfs(
        maze.initial_state(),
        |s: &Cell| maze.is_goal(s),
        |s: &Cell| maze.heuristic(s),
        BUDGET,
    )
    .unwrap();
    let costs = outcome.solution_costs();
    assert!(costs.windows(2).all(|w| w[1] < w[0]), "{costs:?}");
    assert_eq!(outcome.best_gval(), Some(16.0));
    assert!(!outcome.rounds.last().unwrap().found_solution());
}

#[test]
fn gbfs_improves_on_misleading_heuristic() {
    let world = three_routes();
    let outcome = anytime_gbfs(
        world.initial_state(),
        |s: &GraphState| world.is_goal(s),
        |s: &GraphState| world.heuristic(s),
        BUDGET,
    )
    .unwrap();
    assert_eq!(outcome.solution_costs(), vec![12.0, 8.0, 5.0]);
}

#[test]
fn relaxed_restart_keeps_searching_after_failure() {
    let world = three_routes();
    let stop = AnytimeConfig {
        weight: 8.0,
        weight_decay: 0.5,
        timebound: BUDGET,
        ..AnytimeConfig::default()
    };
    let relax = AnytimeConfig {
        restart: RestartPolicy::RelaxWeight,
        ..stop
    };
    let stopped = weighted(&world, &stop);
    let relaxed = weighted(&world, &relax);
    assert!(relaxed.rounds.len() >= stopped.rounds.len());
    assert_eq!(stopped.best_gval(), relaxed.best_gval());
    let weights: Vec<f64> = relaxed.rounds.iter().filter_map(|r| r.weight).collect();
    assert!((weights.last().unwrap() - 1.0).abs() < f64::EPSILON);
}

/// Counts evaluations and reports resets through shared cells.
struct Probe {
    calls: Rc<Counter<u32>>,
    resets: Rc<Counter<u32>>,
}

impl Heuristic<GraphState> for Probe {
    fn estimate(&mut self, _state: &GraphState) -> f64 {
        self.calls.set(self.calls.get() + 1);
        0.0
    }

    fn reset(&mut self) {
        self.resets.set(self.resets.get() + 1);
    }
}

#[test]
fn heuristic_is_installed_once_for_all_rounds() {
    let world = three_routes();
    let calls = Rc::new(Counter::new(0));
    let resets = Rc::new(Counter::new(0));
    let probe = Probe {
        calls: Rc::clone(&calls),
        resets: Rc::clone(&resets),
    };
    let config = AnytimeConfig {
        timebound: BUDGET,
        duplicate_policy: DuplicatePolicy::Full,
        ..AnytimeConfig::default()
    };
    let outcome = anytime_weighted_astar(
        world.initial_state(),
        |s: &GraphState| world.is_goal(s),
        probe,
        &config,
    )
    .unwrap();
    assert!(outcome.rounds.len() >= 2);
    assert_eq!(resets.get(), 1);
    assert!(calls.get() > 0);
}
