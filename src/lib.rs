//! # shardkv - A Concurrent Sharded In-Memory Key-Value Store
//!
//! shardkv is an in-memory map built for many threads reading and writing at
//! once. Instead of one global lock it splits the keyspace across a fixed
//! number of shards, each with its own reader/writer lock, so operations on
//! unrelated keys do not serialize.
//!
//! ## Features
//!
//! - **Sharded Locking**: One `RwLock` per shard; shards never contend
//! - **Deterministic Routing**: A 64-bit SHA-1 digest window picks each key's shard
//! - **Generic Values**: The store holds any `V` and never inspects it
//! - **Parallel Key Scans**: `keys` fans out one task per shard and merges after join
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              shardkv                                    │
//! │                                                                         │
//! │   get / set / remove            keys                                    │
//! │         │                        │                                      │
//! │         ▼                        ▼                                      │
//! │  ┌─────────────┐        ┌──────────────────┐                            │
//! │  │ ShardRouter │        │ one task / shard │──> concat after join       │
//! │  └──────┬──────┘        └────────┬─────────┘                            │
//! │         │                        │                                      │
//! │         ▼                        ▼                                      │
//! │  ┌──────────────────────────────────────────────┐                       │
//! │  │              ShardedStore                    │                       │
//! │  │  ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ │                       │
//! │  │  │Shard 0 │ │Shard 1 │ │Shard 2 │ │...N    │ │                       │
//! │  │  │RwLock  │ │RwLock  │ │RwLock  │ │shards  │ │                       │
//! │  │  └────────┘ └────────┘ └────────┘ └────────┘ │                       │
//! │  └──────────────────────────────────────────────┘                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use shardkv::ShardedStore;
//!
//! let store = ShardedStore::new(10).unwrap();
//! store.set("first_name", "Augustine".to_string());
//! store.set("last_name", "Smith".to_string());
//!
//! assert_eq!(store.get("first_name").as_deref(), Some("Augustine"));
//! assert_eq!(store.keys().len(), 2);
//! ```
//!
//! ## Module Overview
//!
//! - [`storage`]: Router, shard, and the sharded store
//! - [`config`]: Shard count configuration and validation
//! - [`error`]: Construction errors
//!
//! ## Design Highlights
//!
//! ### No Cross-Shard Locking
//!
//! No operation ever holds two shard locks at once, so there is no lock
//! ordering to maintain and no way to deadlock between shards.
//!
//! ### Weakly Consistent Scans
//!
//! `keys` reads each shard independently. Without concurrent writers it
//! returns exactly the stored keys; with them, it may reflect some writes and
//! not others.

pub mod config;
pub mod error;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::{StoreConfig, DEFAULT_SHARDS};
pub use error::{StoreError, StoreResult};
pub use storage::{ShardRouter, ShardedStore, StoreStats};

/// Version of shardkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
