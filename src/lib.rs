//! Umbrella crate for the tanya library chat engine.
//!
//! This crate stitches the text primitives, the store collaborators, and the
//! matching engine together so callers get the whole answering pipeline from
//! a single dependency:
//!
//! - [`similarity`] / [`normalize`] — the 0–100 edit-distance score and the
//!   query normalizer (`tanya_text`).
//! - [`IntentStore`] / [`CatalogStore`] and their backends — the FAQ table
//!   and the book catalog (`tanya_store`).
//! - [`ChatEngine`] — per-source matching plus arbitration (`tanya_match`).
//!
//! ## Example Usage
//!
//! ```
//! use tanya::{engine_from_seed, Responder, SeedData};
//!
//! let seed: SeedData = serde_json::from_str(
//!     r#"{
//!         "intents": [{
//!             "tag": "greeting",
//!             "patterns": ["halo", "hai"],
//!             "responses": ["Selamat datang!"]
//!         }],
//!         "books": [{
//!             "title": "Pemrograman Python Dasar",
//!             "subject": "teknologi",
//!             "availability": "tersedia",
//!             "location": "A1"
//!         }]
//!     }"#,
//! )
//! .unwrap();
//!
//! let engine = engine_from_seed(seed);
//! let reply = engine.respond("halo");
//! assert_eq!(reply.response, "Selamat datang!");
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use tanya_match::{
    set_engine_metrics, ChatEngine, EngineMetrics, MatchConfig, MatchError, Reply, ReplyOutcome,
    Responder, Source, SourceMatch, EMPTY_MESSAGE_PROMPT, UNMATCHED_REPLY,
};
pub use tanya_store::{
    Availability, Book, BookRef, CatalogStore, Intent, IntentSet, IntentStore, MemoryCatalog,
    MemoryIntentStore, StoreError,
};
#[cfg(feature = "backend-postgres")]
pub use tanya_store::{PostgresCatalog, PostgresConfig, PostgresIntentStore};
pub use tanya_text::{edit_distance, normalize, similarity};

/// Intents and books for a database-less deployment, usually read from a
/// JSON seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl SeedData {
    /// Read seed data from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Errors reading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("seed payload does not parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Build a [`ChatEngine`] with default thresholds over in-memory stores
/// holding the seed data.
pub fn engine_from_seed(seed: SeedData) -> ChatEngine {
    ChatEngine::new(
        Arc::new(MemoryIntentStore::new(IntentSet::new(seed.intents))),
        Arc::new(MemoryCatalog::new(seed.books)),
    )
}
