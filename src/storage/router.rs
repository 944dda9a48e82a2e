//! Key-to-shard routing.
//!
//! A key is routed by hashing its bytes with SHA-1 and reading the last eight
//! bytes of the 20-byte digest as a big-endian `u64`. That integer is reduced
//! modulo the shard count.
//!
//! ```text
//!   "first_name" ──sha1──> [d0 d1 ... d11 | d12 ... d19]
//!                                         └─────┬─────┘
//!                                               ▼
//!                           u64::from_be_bytes % shard_count ──> shard index
//! ```
//!
//! The digest is fully mixed, so any fixed window spreads keys roughly evenly,
//! and a 64-bit window reaches every shard for any practical shard count.
//! Routing must never change for a live store, otherwise existing entries
//! would be looked up in the wrong shard.

use sha1::{Digest, Sha1};

/// Digest bytes read as the routing integer.
const ROUTING_WINDOW: std::ops::Range<usize> = 12..20;

/// Maps keys to shard indices in `[0, shard_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardRouter {
    shard_count: usize,
}

impl ShardRouter {
    /// Creates a router over `shard_count` shards.
    ///
    /// The count must already be validated to be non-zero.
    pub(crate) fn new(shard_count: usize) -> Self {
        debug_assert!(shard_count > 0);
        Self { shard_count }
    }

    /// Number of shards this router distributes over.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    /// Determines which shard a key belongs to.
    #[inline]
    pub fn shard_index(&self, key: &str) -> usize {
        let digest = Sha1::digest(key.as_bytes());
        let mut window = [0u8; 8];
        window.copy_from_slice(&digest[ROUTING_WINDOW]);
        (u64::from_be_bytes(window) % self.shard_count as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_routing_is_deterministic() {
        let router = ShardRouter::new(10);
        for i in 0..100 {
            let key = format!("key:{}", i);
            assert_eq!(router.shard_index(&key), router.shard_index(&key));
        }
    }

    #[test]
    fn test_routing_stays_in_range() {
        for shard_count in [1, 2, 7, 10, 64, 256, 1000, 70_000] {
            let router = ShardRouter::new(shard_count);
            for i in 0..1000 {
                assert!(router.shard_index(&format!("user:{}", i)) < shard_count);
            }
        }
    }

    #[test]
    fn test_single_shard_routes_everything_to_zero() {
        let router = ShardRouter::new(1);
        assert_eq!(router.shard_index(""), 0);
        assert_eq!(router.shard_index("first_name"), 0);
        assert_eq!(router.shard_index("last_name"), 0);
    }

    #[test]
    fn test_routing_matches_digest_window() {
        let router = ShardRouter::new(1000);
        let digest = Sha1::digest(b"first_name");
        let mut expected = 0u64;
        for byte in &digest[12..20] {
            expected = (expected << 8) | u64::from(*byte);
        }
        assert_eq!(router.shard_index("first_name"), (expected % 1000) as usize);
    }

    #[test]
    fn test_routing_reaches_shards_past_256() {
        let router = ShardRouter::new(1000);
        let high = (0..20_000)
            .map(|i| router.shard_index(&format!("key:{}", i)))
            .filter(|&index| index >= 256)
            .count();
        assert!(high > 0);
    }

    #[test]
    fn test_routing_spreads_keys() {
        let router = ShardRouter::new(16);
        let used: HashSet<usize> = (0..1000)
            .map(|i| router.shard_index(&format!("key:{}", i)))
            .collect();
        // 1000 keys over 16 shards should touch every shard
        assert_eq!(used.len(), 16);
    }
}
