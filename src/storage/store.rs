//! Sharded Store
//!
//! This module implements the core of shardkv: a concurrent map whose keyspace
//! is partitioned across a fixed number of shards, each guarded by its own
//! reader/writer lock.
//!
//! ## Design Decisions
//!
//! 1. **Sharded Locks**: Instead of one big lock, each shard has its own `RwLock`.
//! 2. **Fixed Shard Count**: Shards are allocated once; routing never changes.
//! 3. **One Lock At A Time**: No operation holds two shard locks, so no lock order exists.
//! 4. **Scatter-Gather Keys**: Each shard is scanned by its own task into a local
//!    buffer; buffers are concatenated after every task has joined.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ShardedStore                            │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐            │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │ Shard N │            │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ RwLock  │            │
//! │  │ HashMap │ │ HashMap │ │ HashMap │ │ HashMap │            │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! Single-key operations are linearizable per key. Multi-shard operations
//! (`keys`, `clear`, `shard_lengths`) visit shards independently, so writes
//! racing with them may be observed in some shards and not others.

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::storage::router::ShardRouter;
use crate::storage::shard::Shard;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::task::JoinError;
use tracing::{debug, trace, warn};

/// A concurrent in-memory key-value store with per-shard locking.
///
/// Values are opaque: the store never inspects `V`. Wrap the store in an
/// `Arc` to share it across threads or tasks.
///
/// # Example
///
/// ```
/// use shardkv::storage::ShardedStore;
///
/// let store = ShardedStore::new(10).unwrap();
///
/// store.set("first_name", "Augustine");
/// store.set("last_name", "Smith");
///
/// assert_eq!(store.get("first_name"), Some("Augustine"));
/// assert_eq!(store.get("middle_name"), None);
///
/// let mut keys = store.keys();
/// keys.sort();
/// assert_eq!(keys, vec!["first_name", "last_name"]);
/// ```
pub struct ShardedStore<V> {
    /// Fixed-length shard array
    shards: Box<[Shard<V>]>,

    /// Key-to-shard mapping, immutable after construction
    router: ShardRouter,

    /// Statistics: number of keys (approximate under concurrency)
    key_count: AtomicI64,

    /// Statistics: total GET operations
    get_count: AtomicU64,

    /// Statistics: total SET operations
    set_count: AtomicU64,

    /// Statistics: total REMOVE operations
    remove_count: AtomicU64,
}

impl<V> std::fmt::Debug for ShardedStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedStore")
            .field("shards", &self.shards.len())
            .field("key_count", &self.len())
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("set_count", &self.set_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl<V> Default for ShardedStore<V> {
    fn default() -> Self {
        Self::build(ShardRouter::new(crate::config::DEFAULT_SHARDS))
    }
}

impl<V> ShardedStore<V> {
    /// Creates a store with `shard_count` empty shards.
    ///
    /// Fails with [`StoreError::InvalidConfiguration`](crate::StoreError::InvalidConfiguration)
    /// if `shard_count` is zero.
    pub fn new(shard_count: usize) -> StoreResult<Self> {
        Self::with_config(&StoreConfig::new(shard_count))
    }

    /// Creates a store from a configuration.
    pub fn with_config(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self::build(ShardRouter::new(config.shard_count)))
    }

    fn build(router: ShardRouter) -> Self {
        let shards: Vec<Shard<V>> = (0..router.shard_count()).map(|_| Shard::new()).collect();
        debug!(shards = shards.len(), "Sharded store initialized");

        Self {
            shards: shards.into_boxed_slice(),
            router,
            key_count: AtomicI64::new(0),
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            remove_count: AtomicU64::new(0),
        }
    }

    /// Number of shards, fixed at construction.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Determines which shard a key belongs to.
    #[inline]
    pub fn shard_index(&self, key: &str) -> usize {
        self.router.shard_index(key)
    }

    #[inline]
    fn shard(&self, key: &str) -> &Shard<V> {
        &self.shards[self.shard_index(key)]
    }

    /// Gets the value for a key.
    ///
    /// Returns `None` if the key has never been set (or was removed). A present
    /// key always yields `Some`, even if the value itself is "empty".
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        self.shard(key).get(key)
    }

    /// Sets a key-value pair, overwriting any existing value.
    ///
    /// # Returns
    ///
    /// Returns `true` if a new key was created, `false` if an existing key was updated.
    pub fn set(&self, key: impl Into<String>, value: V) -> bool {
        self.set_count.fetch_add(1, Ordering::Relaxed);

        let key = key.into();
        let is_new = self.shard(&key).insert(key, value).is_none();

        if is_new {
            self.key_count.fetch_add(1, Ordering::Relaxed);
        }

        is_new
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.remove_count.fetch_add(1, Ordering::Relaxed);

        let removed = self.shard(key).remove(key);
        if removed.is_some() {
            self.key_count.fetch_sub(1, Ordering::Relaxed);
        }
        removed
    }

    /// Checks if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.shard(key).contains_key(key)
    }

    /// Returns the approximate number of keys in the store.
    ///
    /// This is an approximation because it uses relaxed atomic ordering.
    pub fn len(&self) -> usize {
        self.key_count.load(Ordering::Relaxed).max(0) as usize
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries in each shard, indexed by shard.
    ///
    /// Shards are locked one after another, never together.
    pub fn shard_lengths(&self) -> Vec<usize> {
        self.shards.iter().map(Shard::len).collect()
    }

    /// Clears all data from the store, one shard at a time.
    pub fn clear(&self) {
        let removed: usize = self.shards.iter().map(Shard::clear).sum();
        self.key_count.fetch_sub(removed as i64, Ordering::Relaxed);
        debug!(removed = removed, "Store cleared");
    }

    /// Returns store statistics.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.len() as u64,
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
            remove_ops: self.remove_count.load(Ordering::Relaxed),
        }
    }
}

impl<V: Send + Sync> ShardedStore<V> {
    /// Returns every key in the store, in no particular order.
    ///
    /// One scoped thread per shard copies that shard's keys under its read
    /// lock. The per-shard lists are concatenated once all threads have
    /// finished, so no lock guards the result. Each key lives in exactly one
    /// shard, so the result has no duplicates.
    ///
    /// Shards are read at slightly different instants: concurrent writers may
    /// be visible in some shards and not in others.
    ///
    /// If the OS refuses to start a scan thread, that shard is scanned on the
    /// calling thread instead.
    pub fn keys(&self) -> Vec<String> {
        let per_shard: Vec<Vec<String>> = thread::scope(|scope| {
            let scans: Vec<_> = self
                .shards
                .iter()
                .enumerate()
                .map(|(index, shard)| {
                    thread::Builder::new()
                        .name(format!("shardkv-keys-{}", index))
                        .spawn_scoped(scope, move || shard.keys())
                        .map_err(|e| {
                            warn!(shard = index, error = %e, "Scan thread unavailable, scanning inline");
                            shard
                        })
                })
                .collect();

            scans.into_iter().map(finish_scan).collect()
        });

        let keys = concat(per_shard);
        trace!(shards = self.shards.len(), keys = keys.len(), "Collected keys");
        keys
    }
}

impl<V: Send + Sync + 'static> ShardedStore<V> {
    /// Async variant of [`keys`](Self::keys) for use inside a Tokio runtime.
    ///
    /// Each shard is scanned on the blocking pool so that lock waits never
    /// stall the async workers. Dropping the returned future stops waiting for
    /// outstanding scans; those scans still finish on the blocking pool.
    ///
    /// A panicking scan is re-raised, like in [`keys`](Self::keys). A scan the
    /// runtime cancelled before it ran is redone on the current task, so the
    /// result always covers every shard.
    pub async fn keys_async(self: &Arc<Self>) -> Vec<String> {
        let handles: Vec<_> = (0..self.shards.len())
            .map(|index| {
                let store = Arc::clone(self);
                tokio::task::spawn_blocking(move || store.shards[index].keys())
            })
            .collect();

        let mut per_shard = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            per_shard.push(self.join_scan(index, handle.await));
        }

        let keys = concat(per_shard);
        trace!(shards = self.shards.len(), keys = keys.len(), "Collected keys");
        keys
    }
}

impl<V> ShardedStore<V> {
    fn join_scan(&self, index: usize, result: Result<Vec<String>, JoinError>) -> Vec<String> {
        match result {
            Ok(keys) => keys,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                warn!(shard = index, error = %e, "Shard key scan cancelled, rescanning");
                self.shards[index].keys()
            }
        }
    }
}

/// Joins a scan thread, or scans the shard here if no thread was started.
fn finish_scan<V>(scan: Result<thread::ScopedJoinHandle<'_, Vec<String>>, &Shard<V>>) -> Vec<String> {
    match scan {
        Ok(handle) => match handle.join() {
            Ok(keys) => keys,
            Err(panic) => std::panic::resume_unwind(panic),
        },
        Err(shard) => shard.keys(),
    }
}

fn concat(per_shard: Vec<Vec<String>>) -> Vec<String> {
    let total = per_shard.iter().map(Vec::len).sum();
    let mut keys = Vec::with_capacity(total);
    for shard_keys in per_shard {
        keys.extend(shard_keys);
    }
    keys
}

/// Store statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub keys: u64,
    pub get_ops: u64,
    pub set_ops: u64,
    pub remove_ops: u64,
}
