//! shardkv - A Concurrent Sharded In-Memory Key-Value Store
//!
//! Demo entry point: stores a couple of names, then hammers the store from
//! many blocking workers and reports what it saw.

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use shardkv::{ShardedStore, StoreConfig};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// shardkv - concurrent sharded in-memory key-value store demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of shards (at least 1). Defaults to SHARDKV_SHARDS or 64.
    #[arg(short, long)]
    shards: Option<usize>,

    /// Number of concurrent writer tasks
    #[arg(short, long, default_value_t = 8)]
    workers: usize,

    /// Keys written by each worker
    #[arg(short, long, default_value_t = 10_000)]
    keys_per_worker: usize,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// The CLI flag wins over the environment.
    fn store_config(&self) -> Result<StoreConfig> {
        let config = match self.shards {
            Some(shards) => StoreConfig::new(shards),
            None => StoreConfig::from_env()?,
        };
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = args.store_config()?;
    let store: Arc<ShardedStore<Bytes>> =
        Arc::new(ShardedStore::with_config(&config).context("failed to build store")?);
    info!(shards = store.shard_count(), version = shardkv::VERSION, "Store ready");

    store.set("first_name", Bytes::from_static(b"Augustine"));
    store.set("last_name", Bytes::from_static(b"Smith"));
    match store.get("first_name") {
        Some(value) => info!(value = %String::from_utf8_lossy(&value), "first_name"),
        None => warn!("first_name missing"),
    }
    info!(keys = ?store.keys(), "Initial keys");

    fill(Arc::clone(&store), args.workers, args.keys_per_worker).await?;

    let started = Instant::now();
    let keys = store.keys_async().await;
    info!(
        keys = keys.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "Scanned all shards"
    );

    let lengths = store.shard_lengths();
    info!(
        min = lengths.iter().min().copied().unwrap_or(0),
        max = lengths.iter().max().copied().unwrap_or(0),
        "Shard distribution"
    );
    info!(stats = ?store.stats(), "Done");

    Ok(())
}

/// Runs `workers` blocking writers, each setting `per_worker` distinct keys.
async fn fill(store: Arc<ShardedStore<Bytes>>, workers: usize, per_worker: usize) -> Result<()> {
    let started = Instant::now();

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let store = Arc::clone(&store);
            tokio::task::spawn_blocking(move || {
                for i in 0..per_worker {
                    let key = format!("worker:{}:key:{}", worker, i);
                    store.set(key, Bytes::from(i.to_string()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.context("writer task failed")?;
    }

    info!(
        workers = workers,
        keys = store.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Concurrent fill complete"
    );
    Ok(())
}
