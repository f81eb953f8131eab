//! # Embedded Document Store
//!
//! In-memory document collections with a lazy, chainable query handle.
//!
//! A [`Collection`] holds JSON documents behind a lock; [`DocumentQuery`]
//! accumulates constraints (filters, sort, pagination, projection) without
//! touching the collection, and is executed exactly once by the caller.

pub mod collection;
pub mod query;

use thiserror::Error;

pub use collection::Collection;
pub use query::{Condition, DocumentQuery, Projection, SortKey};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Documents must be JSON objects
    #[error("document must be a JSON object")]
    InvalidDocument,

    /// Search pattern failed to compile
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A reader or writer panicked while holding the collection lock
    #[error("store lock poisoned")]
    LockPoisoned,
}
