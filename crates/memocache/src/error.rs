//! Error types for memocache
//!
//! Getter failures never pass through this type; `Cache::get` hands them
//! back to the caller exactly as the getter returned them.

use std::fmt;

/// Result type alias for memocache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the cache itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Strategy name is neither `lru` nor `lrf`
    UnknownStrategy(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownStrategy(name) => {
                write!(f, "Unknown cache strategy: {:?} (expected lru or lrf)", name)
            }
        }
    }
}

impl std::error::Error for Error {}
