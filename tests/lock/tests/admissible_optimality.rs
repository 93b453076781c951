//! Admissible heuristic ⇒ optimal A* solutions.
//!
//! Ground truth comes from a hand-counted maze and from uniform-cost search,
//! which is exact regardless of heuristic.

use std::time::Duration;

use lodestar_harness::contract::SearchWorldV1;
use lodestar_harness::worlds::grid::GridWorld;
use lodestar_harness::worlds::sliding_tile::{Board, SlidingTile, TileHeuristic};
use lodestar_kernel::space::{Max, Memoized};
use lodestar_search::{CostBound, DuplicatePolicy, SearchEngine, Strategy};

const BUDGET: Duration = Duration::from_secs(120);

/// Only route: along the top row, through the gap at (4,2), back up and
/// over to the right column. 16 steps.
const MAZE: &str = "
    S...#....
    .##.#.##.
    .#.....#.
    .#.###.#.
    ...#...#G
";

fn solve<W: SearchWorldV1>(world: &W, strategy: Strategy) -> Option<f64> {
    let mut engine = SearchEngine::new(strategy, DuplicatePolicy::Full);
    engine
        .init_search(
            world.initial_state(),
            |s: &W::State| world.is_goal(s),
            |s: &W::State| world.heuristic(s),
            None,
        )
        .unwrap();
    engine
        .search(BUDGET, CostBound::unbounded())
        .unwrap()
        .goal_gval()
}

#[test]
fn astar_matches_known_maze_optimum() {
    let maze = GridWorld::parse(MAZE).unwrap();
    assert_eq!(solve(&maze, Strategy::AStar), Some(16.0));
    assert_eq!(solve(&maze, Strategy::UniformCost), Some(16.0));
}

#[test]
fn astar_matches_uniform_cost_on_open_grids() {
    for (w, h) in [(1, 1), (2, 7), (10, 10), (25, 4)] {
        let grid = GridWorld::open(w, h).unwrap();
        let exact = solve(&grid, Strategy::UniformCost).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let manhattan = (w + h - 2) as f64;
        assert!((exact - manhattan).abs() < f64::EPSILON);
        assert_eq!(solve(&grid, Strategy::AStar), Some(exact), "{w}x{h}");
    }
}

#[test]
fn both_tile_heuristics_are_optimal() {
    // Eight blank moves away from the goal.
    let board = Board::parse("413/285/760").unwrap();
    let manhattan = SlidingTile::new(board).unwrap();
    let misplaced = manhattan.clone().with_heuristic(TileHeuristic::Misplaced);

    let exact = solve(&manhattan, Strategy::UniformCost).unwrap();
    assert!(exact <= 8.0);
    assert_eq!(solve(&manhattan, Strategy::AStar), Some(exact));
    assert_eq!(solve(&misplaced, Strategy::AStar), Some(exact));
}

#[test]
fn composed_heuristics_stay_admissible() {
    let board = Board::parse("413/285/760").unwrap();
    let world = SlidingTile::new(board).unwrap();
    let exact = solve(&world, Strategy::UniformCost).unwrap();

    let combined = Memoized::new(Max::new(
        |b: &Board| b.manhattan(),
        |b: &Board| b.misplaced(),
    ));
    let mut engine = SearchEngine::new(Strategy::AStar, DuplicatePolicy::Full);
    engine
        .init_search(board, |b: &Board| b.is_solved(), combined, None)
        .unwrap();
    let outcome = engine.search(BUDGET, CostBound::unbounded()).unwrap();
    assert_eq!(outcome.goal_gval(), Some(exact));
}

#[test]
fn weighted_astar_is_bounded_suboptimal() {
    let maze = GridWorld::parse(MAZE).unwrap();
    let weight = 3.0;
    let cost = solve(&maze, Strategy::WeightedAStar { weight }).unwrap();
    assert!(cost >= 16.0);
    assert!(cost <= weight * 16.0);
}
