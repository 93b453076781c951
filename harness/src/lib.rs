//! Lodestar Harness: reference worlds and a reproducible run report.
//!
//! The harness runs a world through the search crate
//! (`init_search` → `search`, or one of the anytime wrappers)
//! and packages the result as a canonical, digested report.
//!
//! The harness does NOT implement search logic. It delegates to
//! `lodestar_search`. Worlds provide domain data only; the runner owns
//! orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod report_dir;
pub mod runner;
pub mod worlds;
