//! Store configuration.
//!
//! The only tunable is the shard count. It is fixed for the lifetime of a
//! store: changing it would reroute existing keys to different shards and make
//! them unreachable.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Default number of shards.
/// 64 keeps contention low for typical thread counts without wasting memory.
pub const DEFAULT_SHARDS: usize = 64;

/// Environment variable consulted by [`StoreConfig::from_env`].
pub const SHARDS_ENV: &str = "SHARDKV_SHARDS";

/// Configuration for a [`ShardedStore`](crate::storage::ShardedStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of independently locked shards (at least 1)
    pub shard_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARDS,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with the given shard count.
    pub fn new(shard_count: usize) -> Self {
        Self { shard_count }
    }

    /// Checks that the shard count is routable.
    pub fn validate(&self) -> StoreResult<()> {
        if self.shard_count == 0 {
            return Err(StoreError::invalid("shard count must be at least 1"));
        }
        Ok(())
    }

    /// Builds a configuration from `SHARDKV_SHARDS`, falling back to defaults
    /// when the variable is unset.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_env_value(std::env::var(SHARDS_ENV).ok().as_deref())
    }

    fn from_env_value(raw: Option<&str>) -> StoreResult<Self> {
        let config = match raw {
            None => Self::default(),
            Some(s) => {
                let shard_count = s.trim().parse::<usize>().map_err(|_| {
                    StoreError::invalid(format!("{}={:?} is not a valid shard count", SHARDS_ENV, s))
                })?;
                Self::new(shard_count)
            }
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = StoreConfig::default();
        assert_eq!(config.shard_count, DEFAULT_SHARDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        assert!(StoreConfig::new(1).validate().is_ok());
        assert!(StoreConfig::new(257).validate().is_ok());
        assert!(StoreConfig::new(10_000).validate().is_ok());
        assert!(matches!(
            StoreConfig::new(0).validate(),
            Err(StoreError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_env_value() {
        assert_eq!(StoreConfig::from_env_value(None), Ok(StoreConfig::default()));
        assert_eq!(StoreConfig::from_env_value(Some(" 10 ")), Ok(StoreConfig::new(10)));
        assert!(StoreConfig::from_env_value(Some("ten")).is_err());
        assert!(StoreConfig::from_env_value(Some("-3")).is_err());
        assert!(StoreConfig::from_env_value(Some("0")).is_err());
    }

    #[test]
    fn test_deserialize_missing_fields_uses_default() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());

        let config: StoreConfig = serde_json::from_str(r#"{"shard_count": 8}"#).unwrap();
        assert_eq!(config.shard_count, 8);
    }
}
