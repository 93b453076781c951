//! Shared helpers for lodestar benchmark suites.

use std::time::Duration;

use lodestar_harness::contract::SearchWorldV1;
use lodestar_harness::worlds::grid::GridWorld;
use lodestar_harness::worlds::sliding_tile::{Board, SlidingTile, TileHeuristic};
use lodestar_search::{CostBound, DuplicatePolicy, SearchEngine, SearchOutcome, Strategy};

/// Wall-clock budget for benchmarked searches; generous so no regime times out.
pub const BENCH_TIMEBOUND: Duration = Duration::from_secs(60);

/// Maze with a single 16-step route.
pub const MAZE: &str = "
    S...#....
    .##.#.##.
    .#.....#.
    .#.###.#.
    ...#...#G
";

/// Eight-puzzle start positions, shallow to deep.
pub const BOARDS: &[(&str, &str)] = &[
    ("shallow", "413/285/760"),
    ("medium", "813/402/765"),
    ("deep", "867/254/301"),
];

/// Strategies every regime is benchmarked under.
pub const STRATEGIES: &[Strategy] = &[
    Strategy::UniformCost,
    Strategy::BestFirst,
    Strategy::AStar,
    Strategy::WeightedAStar { weight: 2.0 },
];

/// Parse the benchmark maze.
///
/// # Panics
///
/// Panics if the layout is invalid. Benchmark setup failures are fatal.
#[must_use]
pub fn maze() -> GridWorld {
    GridWorld::parse(MAZE).expect("benchmark maze parses")
}

/// Open grid of the given size.
///
/// # Panics
///
/// Panics on a zero dimension.
#[must_use]
pub fn open_grid(size: usize) -> GridWorld {
    GridWorld::open(size, size).expect("benchmark grid builds")
}

/// Sliding-tile world from a board string.
///
/// # Panics
///
/// Panics if the board is malformed or unsolvable.
#[must_use]
pub fn tiles(board: &str, heuristic: TileHeuristic) -> SlidingTile {
    let board = Board::parse(board).expect("benchmark board parses");
    SlidingTile::new(board)
        .expect("benchmark board is solvable")
        .with_heuristic(heuristic)
}

/// Run one engine search over `world`, bypassing report construction.
///
/// # Panics
///
/// Panics if the engine rejects the configuration or a state is malformed.
pub fn solve<W: SearchWorldV1>(world: &W, strategy: Strategy) -> SearchOutcome<W::State> {
    let mut engine = SearchEngine::new(strategy, DuplicatePolicy::Full);
    engine
        .init_search(
            world.initial_state(),
            |s: &W::State| world.is_goal(s),
            |s: &W::State| world.heuristic(s),
            None,
        )
        .expect("benchmark engine initializes");
    engine
        .search(BENCH_TIMEBOUND, CostBound::unbounded())
        .expect("benchmark search succeeds")
}
