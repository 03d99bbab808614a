//! # memocache
//!
//! Memoizing cache wrapping a single-argument getter.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to arena slot (O(1) lookup)
//! - **Order list**: Doubly-linked list over a slot arena, sorted by
//!   timestamp with the next eviction candidate at the head (O(1) append,
//!   unlink and head eviction)
//! - **Strategy**: LRU refreshes an entry on every hit, LRF only when the
//!   getter runs
//!
//! Eviction only happens when the caller asks for it through
//! [`Cache::clean`], [`Cache::clean_before`], [`Cache::invalidate`] or
//! [`Cache::clear`]. A cache is single-threaded.
//!
//! ```
//! use memocache::{Cache, Strategy};
//!
//! let mut cache = Cache::from_fn(|name: &String| format!("hello {}", name), Strategy::Lru);
//! assert_eq!(cache.value("peter".to_string()), "hello peter");
//! assert_eq!(cache.value("bob".to_string()), "hello bob");
//! assert_eq!(cache.value("peter".to_string()), "hello peter");
//!
//! let order: Vec<_> = cache.values().cloned().collect();
//! assert_eq!(order, vec!["hello bob", "hello peter"]);
//! ```

#![warn(missing_docs)]

mod cache;
mod clock;
mod config;
mod entry;
mod error;
mod iter;
mod order;
mod stats;
mod strategy;

pub use cache::Cache;
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::CacheConfig;
pub use entry::Entry;
pub use error::{Error, Result};
pub use iter::{Entries, Iter, Keys, Values};
pub use stats::CacheStats;
pub use strategy::Strategy;
