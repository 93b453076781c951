//! Lodestar Search: deterministic best-first search with anytime refinement.
//!
//! This crate provides the search layer. It depends only on
//! `lodestar_kernel`; it does NOT depend on `lodestar_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! lodestar_kernel  ←  lodestar_search  ←  lodestar_harness
//! (state contract)    (engine, anytime)     (reference worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchEngine`] -- configure with a strategy, `init_search`, then `search`
//! - [`SearchNode`] -- immutable node with a shared parent chain for path reconstruction
//! - [`CostBound`] -- the `(g, h, f)` pruning threshold
//! - [`SearchStats`] -- per-invocation counters with a reproducibility digest
//! - [`anytime_weighted_astar`] / [`anytime_gbfs`] -- time-boxed restart-and-tighten wrappers

#![forbid(unsafe_code)]

pub mod anytime;
pub mod bound;
pub mod error;
pub mod explored;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod strategy;
pub mod trace;

pub use anytime::{
    anytime_gbfs, anytime_weighted_astar, AnytimeConfig, AnytimeOutcome, AnytimeRound, RestartPolicy,
};
pub use bound::CostBound;
pub use error::{ConfigurationError, SearchError};
pub use node::SearchNode;
pub use policy::{DuplicatePolicy, SearchPolicyV1};
pub use search::{SearchEngine, SearchOutcome};
pub use stats::{SearchStats, Termination};
pub use strategy::{FValueFn, Strategy};
