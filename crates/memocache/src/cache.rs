//! Memoizing cache around a single-argument getter
//!
//! Entries live in an [`OrderList`] arena sorted by timestamp, head first;
//! an ahash map from key to arena slot gives O(1) lookup. Both structures
//! are updated together by every public operation.
//!
//! The cache never deduplicates fetches. It takes `&mut self` on lookup,
//! so callers sharing one instance behind a lock will each run the getter
//! for a key they all missed; the last insertion wins.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock, Timestamp};
use crate::config::CacheConfig;
use crate::entry::Entry;
use crate::iter::{Entries, Iter, Keys, Values};
use crate::order::OrderList;
use crate::stats::CacheStats;
use crate::strategy::Strategy;

type Getter<K, V, E> = Box<dyn FnMut(&K) -> Result<V, E>>;

/// Memoizing cache with LRU or LRF eviction order
///
/// `E` is the getter's error type; it is returned from [`Cache::get`]
/// untouched. Caches built with [`Cache::from_fn`] use [`Infallible`].
pub struct Cache<K, V, E = Infallible> {
    /// Key -> slot in `order`
    index: HashMap<K, usize, RandomState>,

    /// Owns the entries, next eviction candidate at the head
    order: OrderList<K, V>,

    getter: Getter<K, V, E>,
    clock: Box<dyn Clock>,
    strategy: Strategy,
    stats: CacheStats,
}

impl<K, V, E> Cache<K, V, E>
where
    K: Hash + Eq + Clone,
{
    /// Create a cache around `getter` using the system clock
    pub fn new<G>(getter: G, strategy: Strategy) -> Self
    where
        G: FnMut(&K) -> Result<V, E> + 'static,
    {
        Self::with_config(getter, CacheConfig::new(strategy))
    }

    /// Create a cache from a [`CacheConfig`] using the system clock
    pub fn with_config<G>(getter: G, config: CacheConfig) -> Self
    where
        G: FnMut(&K) -> Result<V, E> + 'static,
    {
        Self::with_clock(getter, config, SystemClock)
    }

    /// Create a cache that reads timestamps from `clock`
    ///
    /// # Arguments
    /// * `getter` - Computes the value for a missing or stale key
    /// * `config` - Strategy and preallocation
    /// * `clock` - Must never go backwards
    pub fn with_clock<G, C>(getter: G, config: CacheConfig, clock: C) -> Self
    where
        G: FnMut(&K) -> Result<V, E> + 'static,
        C: Clock + 'static,
    {
        let capacity = config.initial_capacity;
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            order: OrderList::with_capacity(capacity),
            getter: Box::new(getter),
            clock: Box::new(clock),
            strategy: config.strategy,
            stats: CacheStats::new(),
        }
    }

    /// Look up `key`, calling the getter on a miss
    ///
    /// # Returns
    /// * `Result<&V, E>` - Cached or freshly fetched value, or the getter's error
    pub fn get(&mut self, key: K) -> Result<&V, E> {
        self.lookup(key, None)
    }

    /// Look up `key`, treating an entry with `timestamp < oldest` as a miss
    ///
    /// A stale entry is replaced only once the getter succeeds. If the
    /// getter fails the stale entry stays where it was.
    pub fn get_fresh(&mut self, key: K, oldest: Timestamp) -> Result<&V, E> {
        self.lookup(key, Some(oldest))
    }

    fn lookup(&mut self, key: K, oldest: Option<Timestamp>) -> Result<&V, E> {
        let slot = self.index.get(&key).copied();

        if let Some(idx) = slot {
            let stale = oldest.is_some_and(|cutoff| self.order[idx].timestamp < cutoff);
            if !stale {
                self.stats.record_hit();
                if self.strategy.touches_on_hit() {
                    self.order[idx].timestamp = self.clock.now();
                    self.order.move_to_back(idx);
                }
                trace!("{} cache hit (slot {})", self.strategy, idx);
                return Ok(&self.order[idx].value);
            }
        }

        self.stats.record_miss();
        if slot.is_some() {
            self.stats.record_refresh();
            debug!("{} cache refreshing stale entry", self.strategy);
        }

        let value = match (self.getter)(&key) {
            Ok(value) => value,
            Err(err) => {
                self.stats.record_fetch_error();
                debug!("{} cache getter failed, cache left unchanged", self.strategy);
                return Err(err);
            }
        };

        if let Some(stale_idx) = slot {
            self.order.remove(stale_idx);
        }

        let entry = Entry::new(key.clone(), value, self.clock.now());
        let idx = self.order.push_back(entry);
        self.index.insert(key, idx);
        debug!(
            "{} cache fetched entry (slot {}, {} entries)",
            self.strategy,
            idx,
            self.order.len()
        );

        Ok(&self.order[idx].value)
    }

    /// Evict from the head until at most `max_items` entries remain
    ///
    /// # Returns
    /// * `usize` - Number of entries removed
    pub fn clean(&mut self, max_items: usize) -> usize {
        let mut removed = 0;
        while self.order.len() > max_items {
            if !self.evict_head() {
                break;
            }
            removed += 1;
        }
        self.finish_clean(removed)
    }

    /// Evict from the head while the head's timestamp is before `oldest`
    ///
    /// # Returns
    /// * `usize` - Number of entries removed
    pub fn clean_before(&mut self, oldest: Timestamp) -> usize {
        let mut removed = 0;
        while let Some(head) = self.order.head() {
            if self.order[head].timestamp >= oldest {
                break;
            }
            if !self.evict_head() {
                break;
            }
            removed += 1;
        }
        self.finish_clean(removed)
    }

    fn evict_head(&mut self) -> bool {
        match self.order.pop_front() {
            Some(entry) => {
                self.index.remove(&entry.key);
                true
            }
            None => false,
        }
    }

    fn finish_clean(&self, removed: usize) -> usize {
        if removed > 0 {
            self.stats.record_evictions(removed as u64);
            debug!(
                "{} cache cleaned {} entries, {} left",
                self.strategy,
                removed,
                self.order.len()
            );
        }
        removed
    }

    /// Remove `key` from any position; no-op if absent
    ///
    /// # Returns
    /// * `Option<V>` - The removed value
    pub fn invalidate<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        let entry = self.order.remove(idx)?;
        self.stats.record_invalidation();
        Some(entry.into_value())
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        debug!("{} cache cleared", self.strategy);
    }

    /// Whether `key` is cached; a following [`Cache::get`] would be a hit
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Cached value for `key` without calling the getter or touching the order
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.order.get(idx).map(Entry::value)
    }

    /// Ordering timestamp of `key`
    pub fn timestamp<Q>(&self, key: &Q) -> Option<Timestamp>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.order.get(idx).map(Entry::timestamp)
    }
}

impl<K, V> Cache<K, V, Infallible>
where
    K: Hash + Eq + Clone,
{
    /// Create a cache around a getter that cannot fail
    pub fn from_fn<F>(mut getter: F, strategy: Strategy) -> Self
    where
        F: FnMut(&K) -> V + 'static,
    {
        Self::new(move |key: &K| Ok(getter(key)), strategy)
    }

    /// [`Cache::get`] for an infallible getter
    pub fn value(&mut self, key: K) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl<K, V, E> Cache<K, V, E> {
    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Ordering chosen at construction
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero all statistics counters
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Next eviction candidate
    pub fn oldest(&self) -> Option<&Entry<K, V>> {
        self.order.get(self.order.head()?)
    }

    /// Iterate `(key, value)` pairs in eviction-priority order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.order)
    }

    /// Iterate keys in eviction-priority order
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(&self.order)
    }

    /// Iterate values in eviction-priority order
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(&self.order)
    }

    /// Iterate full entries, timestamps included, in eviction-priority order
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries::new(&self.order)
    }
}

impl<'a, K, V, E> IntoIterator for &'a Cache<K, V, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, E> fmt::Display for Cache<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} cache with {} entries", self.strategy, self.len())?;
        let now = self.clock.now();
        let label = self.strategy.timestamp_label();
        for entry in self.entries() {
            writeln!(
                f,
                "  {:?} => {:?} ({} {:?} ago)",
                entry.key,
                entry.value,
                label,
                now.saturating_duration_since(entry.timestamp)
            )?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, E> fmt::Debug for Cache<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("strategy", &self.strategy)
            .field("entries", &DebugEntries(self))
            .finish_non_exhaustive()
    }
}

struct DebugEntries<'a, K, V, E>(&'a Cache<K, V, E>);

impl<K: fmt::Debug, V: fmt::Debug, E> fmt::Debug for DebugEntries<'_, K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}
