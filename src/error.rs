//! Error types for shardkv.
//!
//! The store has exactly one failure mode: being asked to build itself with a
//! shard count it cannot route to. Every runtime operation is infallible once
//! a store exists, and a missing key is reported as `None`, not as an error.

use thiserror::Error;

/// Errors that can occur while configuring or constructing a store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested configuration cannot produce a usable store.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl StoreError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StoreError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Result type for store construction.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::invalid("shard count must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: shard count must be at least 1"
        );
    }
}
