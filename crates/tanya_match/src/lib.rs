//! # Tanya Match (`tanya_match`)
//!
//! ## Purpose
//!
//! `tanya_match` sits on top of the text primitives (`tanya_text`) and the
//! store collaborators (`tanya_store`). It turns a free-text library query
//! into a single reply by scoring the query against three sources — FAQ
//! intent patterns, book subjects, and book titles — and arbitrating between
//! them with per-source thresholds.
//!
//! In a typical deployment you will:
//! - Use `tanya_store` to reach the intent table and the book catalog.
//! - Build one [`ChatEngine`] at startup and call [`ChatEngine::respond`]
//!   per incoming query; call [`ChatEngine::reload`] when the FAQ data
//!   changes.
//!
//! ## Core Types
//!
//! - [`Source`]: which corpus produced a candidate answer:
//!   - `Intent` — canned FAQ replies keyed by example phrases.
//!   - `Subject` — available-book listings per catalog subject.
//!   - `Title` — availability and shelf for one specific book.
//! - [`MatchConfig`]: threshold knobs (per-source thresholds, the fallback
//!   floor, and the substring-fallback confidence).
//! - [`SourceMatch`]: per-source outcome (optional response, 0–100 score,
//!   provenance label).
//! - [`Reply`]: the arbitrated answer handed to the caller.
//! - [`ChatEngine`]: production implementation of the [`Responder`] trait
//!   that wires the stores and the matchers together.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use tanya_match::{ChatEngine, Responder};
//! use tanya_store::{Intent, IntentSet, MemoryCatalog, MemoryIntentStore};
//!
//! let intents = IntentSet::new(vec![Intent {
//!     tag: "greeting".into(),
//!     patterns: vec!["halo".into(), "hai".into()],
//!     responses: vec!["Selamat datang!".into()],
//! }]);
//! let engine = ChatEngine::new(
//!     Arc::new(MemoryIntentStore::new(intents)),
//!     Arc::new(MemoryCatalog::empty()),
//! );
//!
//! let reply = engine.respond("halo");
//! assert_eq!(reply.response, "Selamat datang!");
//! assert!(reply.score >= 60.0);
//! ```
//!
//! ## Observability
//!
//! Install an [`EngineMetrics`] implementation via [`set_engine_metrics`] to
//! record the outcome branch, score, and latency of every reply. This is
//! typically done once during service startup.

pub mod engine;
pub mod metrics;
pub mod types;

pub use engine::{ChatEngine, Responder, EMPTY_MESSAGE_PROMPT, UNMATCHED_REPLY};
pub use metrics::{set_engine_metrics, EngineMetrics};
pub use types::{MatchConfig, MatchError, Reply, ReplyOutcome, Source, SourceMatch};
