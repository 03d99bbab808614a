//! Eviction ordering strategies

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Ordering applied to cached entries, fixed when the cache is built
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Least-Recently-Used: every hit refreshes the timestamp and moves
    /// the entry to the tail
    #[default]
    Lru,
    /// Least-Recently-Fetched: only a getter call sets the timestamp;
    /// hits leave the order alone
    Lrf,
}

impl Strategy {
    /// Whether a hit refreshes the entry's timestamp and position
    pub fn touches_on_hit(self) -> bool {
        matches!(self, Strategy::Lru)
    }

    /// Label used for the timestamp when rendering entries
    pub fn timestamp_label(self) -> &'static str {
        match self {
            Strategy::Lru => "lastUsed",
            Strategy::Lrf => "fetched",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Lru => write!(f, "LRU"),
            Strategy::Lrf => write!(f, "LRF"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(Strategy::Lru),
            "lrf" => Ok(Strategy::Lrf),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("lru".parse::<Strategy>(), Ok(Strategy::Lru));
        assert_eq!(" LRF ".parse::<Strategy>(), Ok(Strategy::Lrf));
        assert_eq!(
            "mru".parse::<Strategy>(),
            Err(Error::UnknownStrategy("mru".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for strategy in [Strategy::Lru, Strategy::Lrf] {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Strategy::Lru.timestamp_label(), "lastUsed");
        assert_eq!(Strategy::Lrf.timestamp_label(), "fetched");
        assert!(Strategy::Lru.touches_on_hit());
        assert!(!Strategy::Lrf.touches_on_hit());
    }
}
