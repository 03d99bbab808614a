//! Cache construction settings

use std::str::FromStr;

use crate::error::Result;
use crate::strategy::Strategy;

/// Settings fixed for the lifetime of a cache
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Eviction ordering
    pub strategy: Strategy,
    /// Number of entries to reserve room for up front
    pub initial_capacity: usize,
}

impl CacheConfig {
    /// Create a config for `strategy` with no preallocation
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            initial_capacity: 0,
        }
    }

    /// Create a config from a strategy name such as `"lru"` or `"lrf"`
    pub fn from_strategy_name(name: &str) -> Result<Self> {
        Ok(Self::new(Strategy::from_str(name)?))
    }

    /// Set the eviction ordering
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reserve room for `capacity` entries
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

impl From<Strategy> for CacheConfig {
    fn from(strategy: Strategy) -> Self {
        Self::new(strategy)
    }
}
