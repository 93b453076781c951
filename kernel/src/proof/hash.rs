//! Content hashing with domain separation.
//!
//! Algorithm: SHA-256. Every hash is computed over
//! `domain_prefix || data`, where each prefix is a distinct null-terminated
//! byte string, so equal payloads hashed for different purposes never
//! collide.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains a `:` separator with
/// non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the separator is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Domain prefix for search statistics digests.
pub const DOMAIN_SEARCH_STATS: &[u8] = b"LODESTAR::SEARCH_STATS::V1\0";

/// Domain prefix for expansion trace digests.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"LODESTAR::SEARCH_TRACE::V1\0";

/// Domain prefix for anytime round history digests.
pub const DOMAIN_ANYTIME_ROUNDS: &[u8] = b"LODESTAR::ANYTIME_ROUNDS::V1\0";

/// Domain prefix for harness run reports.
pub const DOMAIN_RUN_REPORT: &[u8] = b"LODESTAR::RUN_REPORT::V1\0";

/// Every domain prefix in use. New domains must be added here.
pub const ALL_DOMAINS: &[&[u8]] = &[
    DOMAIN_SEARCH_STATS,
    DOMAIN_SEARCH_TRACE,
    DOMAIN_ANYTIME_ROUNDS,
    DOMAIN_RUN_REPORT,
];

/// Compute the canonical hash of a byte slice with domain separation.
///
/// Result format: `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let hex_digest = hex::encode(hasher.finalize());
    let colon = "sha256".len();
    ContentHash {
        full: format!("sha256:{hex_digest}"),
        colon,
    }
}
