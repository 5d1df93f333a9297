//! # Tanya Store
//!
//! Data model and store collaborators for the tanya chat engine.
//!
//! The engine never talks to a database directly; it goes through the two
//! traits defined here. [`IntentStore`] hands out the FAQ intent table, and
//! [`CatalogStore`] answers the three catalog questions the matchers ask:
//! the distinct subject set, the full book list, and the available books for
//! a subject keyword.
//!
//! Two backends are provided:
//!
//! - [`MemoryIntentStore`] / [`MemoryCatalog`]: thread-safe in-memory stores
//!   used by tests, demos, and database-less deployments.
//! - `PostgresIntentStore` / `PostgresCatalog` (behind the
//!   `backend-postgres` feature): the production backend, reading the
//!   `intents` and `books` tables.
//!
//! Every store call returns `Result<_, StoreError>`. Callers treat any error
//! uniformly as "no data" — a failed fetch degrades one matcher for one
//! query, it never aborts the request.

mod backend;
mod model;

pub use backend::{MemoryCatalog, MemoryIntentStore};
#[cfg(feature = "backend-postgres")]
pub use backend::{PostgresCatalog, PostgresConfig, PostgresIntentStore};
pub use model::{Availability, Book, BookRef, Intent, IntentSet};

use thiserror::Error;

/// Errors produced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A query against the store failed.
    #[error("store query failed: {0}")]
    Query(String),
    /// A stored record did not have the expected shape.
    #[error("malformed record {tag:?}: {reason}")]
    MalformedRecord { tag: String, reason: String },
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StoreError::Unavailable(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        StoreError::Query(msg.into())
    }
}

/// Source of the intent table.
///
/// Loaded once at engine construction and again on explicit reload. A failing
/// load at construction time degrades to an empty intent set; the engine must
/// keep answering catalog questions regardless.
pub trait IntentStore: Send + Sync {
    fn load_intents(&self) -> Result<IntentSet, StoreError>;
}

/// Read-only view of the book catalog.
///
/// Every method is invoked fresh on each query so matchers always see current
/// inventory; no caching happens at this layer.
pub trait CatalogStore: Send + Sync {
    /// Distinct, lower-cased, non-empty subject values across all books.
    fn distinct_subjects(&self) -> Result<Vec<String>, StoreError>;

    /// Every book in the catalog.
    fn all_books(&self) -> Result<Vec<Book>, StoreError>;

    /// Available books whose subject contains `keyword` (case-insensitive).
    fn available_by_subject(&self, keyword: &str) -> Result<Vec<BookRef>, StoreError>;
}
