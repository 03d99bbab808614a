//! Cached entry

use crate::clock::Timestamp;

/// A single memoized result held by the cache
///
/// `timestamp` is the last-used time under [`Strategy::Lru`] and the
/// last-fetched time under [`Strategy::Lrf`].
///
/// [`Strategy::Lru`]: crate::Strategy::Lru
/// [`Strategy::Lrf`]: crate::Strategy::Lrf
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) timestamp: Timestamp,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V, timestamp: Timestamp) -> Self {
        Self {
            key,
            value,
            timestamp,
        }
    }

    /// Key the value was fetched for
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Value returned by the getter
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Ordering timestamp of this entry
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}
