//! Storage Module
//!
//! This module provides the sharded key-value store at the heart of shardkv.
//!
//! ## Architecture
//!
//! ```text
//!        key ──> ShardRouter (sha1 u64 % N)
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ShardedStore                            │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐            │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │...N     │            │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ shards  │            │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Sharded Storage**: independent shards reduce lock contention
//! - **RwLock**: Multiple concurrent readers, exclusive writers, per shard
//! - **Stable Routing**: a key always lives in the same shard
//! - **Scatter-Gather Scans**: `keys` reads every shard in parallel
//!
//! ## Example
//!
//! ```
//! use shardkv::storage::ShardedStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(ShardedStore::new(16).unwrap());
//!
//! store.set("name", 42u32);
//! assert_eq!(store.get("name"), Some(42));
//! assert_eq!(store.remove("name"), Some(42));
//! assert!(store.is_empty());
//! ```

pub mod router;
pub mod shard;
pub mod store;

// Re-export commonly used types
pub use router::ShardRouter;
pub use shard::Shard;
pub use store::{ShardedStore, StoreStats};
