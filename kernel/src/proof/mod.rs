//! Canonical serialization and content hashing for reproducibility digests.

pub mod canon;
pub mod hash;
