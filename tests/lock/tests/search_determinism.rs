//! In-process determinism: repeated runs produce identical goals, stats,
//! traces and report bytes.
//!
//! Every run builds a fresh engine, so each explored table gets its own
//! randomly seeded hasher; identical output shows expansion order never
//! depends on hash iteration order.

use std::time::Duration;

use lodestar_harness::contract::SearchWorldV1;
use lodestar_harness::report_dir::{read_report_dir, write_report_dir};
use lodestar_harness::runner::{run_anytime_gbfs, run_search, RunConfig};
use lodestar_harness::worlds::grid::GridWorld;
use lodestar_harness::worlds::sliding_tile::{Board, SlidingTile};
use lodestar_search::{CostBound, DuplicatePolicy, SearchEngine, SearchPolicyV1, Strategy};

const RUNS: usize = 10;

fn maze() -> GridWorld {
    GridWorld::parse(
        "
        S...#....
        .##.#.##.
        .#.....#.
        .#.###.#.
        ...#...#G
        ",
    )
    .unwrap()
}

fn fingerprint<W: SearchWorldV1>(world: &W, strategy: Strategy) -> (String, String, Vec<String>) {
    let policy = SearchPolicyV1::new(strategy, DuplicatePolicy::Full).with_trace();
    let mut engine = SearchEngine::with_policy(policy).unwrap();
    engine
        .init_search(
            world.initial_state(),
            |s: &W::State| world.is_goal(s),
            |s: &W::State| world.heuristic(s),
            None,
        )
        .unwrap();
    let outcome = engine
        .search(Duration::from_secs(60), CostBound::unbounded())
        .unwrap();
    let path = outcome
        .goal
        .as_ref()
        .map(|g| g.states().into_iter().map(|s| world.state_label(s)).collect())
        .unwrap_or_default();
    (
        outcome.stats.digest().unwrap().to_string(),
        outcome.trace.unwrap().digest().unwrap().to_string(),
        path,
    )
}

#[test]
fn engine_output_is_identical_across_runs() {
    let maze = maze();
    let tiles = SlidingTile::new(Board::parse("413/285/760").unwrap()).unwrap();
    for strategy in [
        Strategy::UniformCost,
        Strategy::BestFirst,
        Strategy::AStar,
        Strategy::WeightedAStar { weight: 2.0 },
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
    ] {
        let first_maze = fingerprint(&maze, strategy);
        let first_tiles = fingerprint(&tiles, strategy);
        for _ in 1..RUNS {
            assert_eq!(fingerprint(&maze, strategy), first_maze, "{}", strategy.name());
            assert_eq!(fingerprint(&tiles, strategy), first_tiles, "{}", strategy.name());
        }
    }
}

#[test]
fn same_engine_repeats_itself() {
    let maze = maze();
    let policy = SearchPolicyV1::new(Strategy::AStar, DuplicatePolicy::Full).with_trace();
    let mut engine = SearchEngine::with_policy(policy).unwrap();
    engine
        .init_search(
            maze.initial_state(),
            |s: &_| maze.is_goal(s),
            |s: &_| maze.heuristic(s),
            None,
        )
        .unwrap();
    let first = engine
        .search(Duration::from_secs(60), CostBound::unbounded())
        .unwrap();
    let second = engine
        .search(Duration::from_secs(60), CostBound::unbounded())
        .unwrap();
    assert_eq!(first.stats.digest().unwrap(), second.stats.digest().unwrap());
    assert_eq!(
        first.trace.unwrap().digest().unwrap(),
        second.trace.unwrap().digest().unwrap()
    );
}

#[test]
fn report_bytes_are_identical_across_runs() {
    let maze = maze();
    let config = RunConfig {
        record_trace: true,
        ..RunConfig::default()
    };
    let first = run_search(&maze, &config).unwrap();
    let first_anytime = run_anytime_gbfs(&maze, None).unwrap();
    for _ in 1..RUNS {
        assert_eq!(run_search(&maze, &config).unwrap().bytes, first.bytes);
        assert_eq!(run_anytime_gbfs(&maze, None).unwrap().bytes, first_anytime.bytes);
    }
}

#[test]
fn stored_report_survives_a_round_trip() {
    let maze = maze();
    let report = run_search(&maze, &RunConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();
    let stored = read_report_dir(dir.path()).unwrap();
    assert_eq!(stored.bytes, report.bytes);
    assert_eq!(stored.digest, report.digest);

    let parsed: serde_json::Value = serde_json::from_slice(&stored.bytes).unwrap();
    assert_eq!(parsed, stored.value);
    assert_eq!(parsed["result"]["solution_cost"], "16");
    assert_eq!(parsed["result"]["path_len"], 17);
}
