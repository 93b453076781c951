//! Lodestar Kernel: the contracts every search problem is written against.
//!
//! # API Surface
//!
//! - [`space::SearchState`] -- a state that can enumerate its successors
//! - [`space::Heuristic`] -- a state-to-estimate capability with explicit cache state
//! - [`proof::canon::canonical_json_bytes`] and [`proof::hash::canonical_hash`]
//!   -- the one canonicalizer and the one hasher used for reproducibility digests
//!
//! # Module Dependency Direction
//!
//! `space` ← `proof`
//!
//! `space` depends on nothing internal. `proof` only serializes values
//! produced by the layers above.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod space;
