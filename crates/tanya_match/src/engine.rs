use std::sync::{Arc, RwLock};
use std::time::Instant;

use tracing::{debug, info, warn};

use tanya_store::{CatalogStore, IntentSet, IntentStore, StoreError};
use tanya_text::{normalize, similarity};

use crate::metrics::metrics_recorder;
use crate::types::{MatchConfig, MatchError, Reply, ReplyOutcome, Source, SourceMatch};


/// Served when no source produces a usable answer.
pub const UNMATCHED_REPLY: &str =
    "Maaf, saya tidak mengerti maksud Anda, silakan pergi ke staf untuk pertanyaan lebih lanjut.";

/// Prompt the HTTP layer serves for an empty or whitespace-only message.
pub const EMPTY_MESSAGE_PROMPT: &str = "Mohon masukkan pesan Anda.";

/// Trait for an answering engine.
pub trait Responder: Send + Sync {
    /// Answer a single free-text query. Must not panic for any input,
    /// including the empty string.
    fn respond(&self, raw_query: &str) -> Reply;
}

/// Production answering engine.
///
/// Holds the store collaborators, the threshold configuration, and the
/// current intent snapshot. The snapshot is an `Arc<IntentSet>` behind a
/// `RwLock`: readers clone the `Arc` and never observe a partially-updated
/// table; [`ChatEngine::reload`] builds a fresh set and swaps it wholesale.
pub struct ChatEngine {
    intent_store: Arc<dyn IntentStore>,
    catalog: Arc<dyn CatalogStore>,
    config: MatchConfig,
    intents: RwLock<Arc<IntentSet>>,
}

impl ChatEngine {
    /// Construct an engine with default thresholds.
    ///
    /// The intent table is loaded eagerly. A failing intent store degrades
    /// to an empty table — the engine still answers catalog questions.
    pub fn new(intent_store: Arc<dyn IntentStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self::build(intent_store, catalog, MatchConfig::default())
    }

    /// Construct an engine with explicit thresholds.
    pub fn with_config(
        intent_store: Arc<dyn IntentStore>,
        catalog: Arc<dyn CatalogStore>,
        config: MatchConfig,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self::build(intent_store, catalog, config))
    }

    fn build(
        intent_store: Arc<dyn IntentStore>,
        catalog: Arc<dyn CatalogStore>,
        config: MatchConfig,
    ) -> Self {
        let initial = match intent_store.load_intents() {
            Ok(set) => set,
            Err(err) => {
                warn!(%err, "intent load failed, starting with an empty table");
                IntentSet::default()
            }
        };
        Self {
            intent_store,
            catalog,
            config,
            intents: RwLock::new(Arc::new(initial)),
        }
    }

    /// Re-invoke the intent store and atomically swap the snapshot.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// surfaced to the (administrative) caller. Returns the number of
    /// intents in the new table.
    pub fn reload(&self) -> Result<usize, StoreError> {
        let fresh = self.intent_store.load_intents()?;
        let count = fresh.len();
        let mut guard = self
            .intents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(fresh);
        info!(intents = count, "intent table reloaded");
        Ok(count)
    }

    /// Current intent snapshot.
    pub fn intent_snapshot(&self) -> Arc<IntentSet> {
        self.intents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Score `normalized_query` against every intent pattern.
    ///
    /// Patterns are normalized before comparison. The best triple is tracked
    /// under strict `>`, so the first-encountered pattern wins ties. Each
    /// time a new overall best is recorded, one response is drawn uniformly
    /// at random from that intent's response set — the draw that stands is
    /// whichever accompanied the final best. No threshold is applied here;
    /// thresholding happens in arbitration.
    pub fn match_intent(&self, normalized_query: &str) -> SourceMatch {
        let snapshot = self.intent_snapshot();
        let mut rng = fastrand::Rng::new();
        let mut best = SourceMatch::no_match();

        for intent in &snapshot.intents {
            if intent.responses.is_empty() {
                continue;
            }
            for pattern in &intent.patterns {
                let score = similarity(normalized_query, &normalize(pattern));
                if score > best.score {
                    let pick = rng.usize(..intent.responses.len());
                    best = SourceMatch {
                        response: Some(intent.responses[pick].clone()),
                        score,
                        provenance: pattern.clone(),
                    };
                }
            }
        }
        best
    }

    /// Match the query against the distinct subject set and list available
    /// books for the winning keyword.
    ///
    /// The query is lower-cased but not otherwise normalized. Below the
    /// subject threshold a substring fallback runs: the first keyword that
    /// is a literal substring of the query (or vice versa) is adopted at the
    /// fixed substring confidence. A matched keyword with zero available
    /// books is still a match — the reply says none are currently available.
    pub fn match_subject(&self, raw_query: &str) -> SourceMatch {
        let query = raw_query.to_lowercase();
        let keywords = match self.catalog.distinct_subjects() {
            Ok(keywords) => keywords,
            Err(err) => {
                warn!(%err, "subject fetch failed, degrading to no match");
                return SourceMatch::no_match();
            }
        };
        if keywords.is_empty() {
            return SourceMatch::no_match();
        }

        let mut matched: Option<&str> = None;
        let mut best = 0.0f32;
        for keyword in &keywords {
            let score = similarity(&query, keyword);
            if score > best {
                best = score;
                matched = Some(keyword);
            }
        }

        if (matched.is_none() || best < self.config.subject_threshold) && !query.is_empty() {
            for keyword in &keywords {
                if query.contains(keyword.as_str()) || keyword.contains(&query) {
                    matched = Some(keyword);
                    best = self.config.substring_confidence;
                    break;
                }
            }
        }

        let Some(keyword) = matched else {
            return SourceMatch::no_match();
        };
        if best < self.config.subject_threshold {
            return SourceMatch::no_match();
        }

        let rows = match self.catalog.available_by_subject(keyword) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(%err, keyword, "availability fetch failed, degrading to no match");
                return SourceMatch::no_match();
            }
        };

        let response = if rows.is_empty() {
            format!("Maaf, belum ada buku {keyword} yang tersedia saat ini.")
        } else {
            let shelf = &rows[0].location;
            let listing = rows
                .iter()
                .enumerate()
                .map(|(i, row)| format!("{}. {}", i + 1, row.title))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "Ada {} buku tentang {} di rak {}:\n{}",
                rows.len(),
                keyword,
                shelf,
                listing
            )
        };

        SourceMatch {
            response: Some(response),
            score: best,
            provenance: format!("subject:{keyword}"),
        }
    }

    /// Match the query against every book title and report availability and
    /// shelf for the best one.
    ///
    /// Only scores at or above the title threshold are considered; the
    /// running best is updated under strict `>`, so the first-encountered
    /// book wins ties.
    pub fn match_title(&self, raw_query: &str) -> SourceMatch {
        let query = raw_query.to_lowercase();
        let books = match self.catalog.all_books() {
            Ok(books) => books,
            Err(err) => {
                warn!(%err, "book fetch failed, degrading to no match");
                return SourceMatch::no_match();
            }
        };

        let mut matched = None;
        let mut best = 0.0f32;
        for book in &books {
            let score = similarity(&query, &book.title.to_lowercase());
            if score > best && score >= self.config.title_threshold {
                best = score;
                matched = Some(book);
            }
        }

        let Some(book) = matched else {
            return SourceMatch::no_match();
        };
        SourceMatch {
            response: Some(format!(
                "Buku \"{}\" saat ini {} (rak {})",
                book.title,
                book.availability.label(),
                book.location
            )),
            score: best,
            provenance: book.title.clone(),
        }
    }

    /// Arbitrate between the three sources for one query.
    fn find_best_match(&self, raw_query: &str) -> (Reply, ReplyOutcome) {
        let normalized = normalize(raw_query);

        let ranked = [
            (Source::Intent, self.match_intent(&normalized)),
            (Source::Subject, self.match_subject(raw_query)),
            (Source::Title, self.match_title(raw_query)),
        ];
        debug!(
            intent = ranked[0].1.score,
            subject = ranked[1].1.score,
            title = ranked[2].1.score,
            "source scores"
        );

        // Primary: sources that cleared their own threshold. Strict `>`
        // keeps the earlier (higher-priority) source on ties.
        let mut winner: Option<(Source, &SourceMatch)> = None;
        for (source, candidate) in &ranked {
            if candidate.response.is_some()
                && candidate.score >= self.config.threshold_for(*source)
                && winner.is_none_or(|(_, w)| candidate.score > w.score)
            {
                winner = Some((*source, candidate));
            }
        }
        if let Some((source, candidate)) = winner {
            return (Self::reply_from(candidate), ReplyOutcome::Threshold(source));
        }

        // Fallback: best positive-score source at or above the floor.
        let mut fallback: Option<(Source, &SourceMatch)> = None;
        for (source, candidate) in &ranked {
            if candidate.response.is_some()
                && candidate.score > 0.0
                && candidate.score >= self.config.fallback_floor
                && fallback.is_none_or(|(_, w)| candidate.score > w.score)
            {
                fallback = Some((*source, candidate));
            }
        }
        if let Some((source, candidate)) = fallback {
            return (Self::reply_from(candidate), ReplyOutcome::Fallback(source));
        }

        (
            Reply {
                response: UNMATCHED_REPLY.to_string(),
                score: 0.0,
                provenance: String::new(),
            },
            ReplyOutcome::Unmatched,
        )
    }

    fn reply_from(candidate: &SourceMatch) -> Reply {
        Reply {
            response: candidate.response.clone().unwrap_or_default(),
            score: candidate.score,
            provenance: candidate.provenance.clone(),
        }
    }
}

impl Responder for ChatEngine {
    fn respond(&self, raw_query: &str) -> Reply {
        let start = Instant::now();
        let (reply, outcome) = self.find_best_match(raw_query);
        let latency = start.elapsed();

        if let Some(recorder) = metrics_recorder() {
            recorder.record_reply(&outcome, reply.score, latency);
        }
        debug!(
            provenance = %reply.provenance,
            score = reply.score,
            user = %raw_query,
            "reply selected"
        );
        reply
    }
}
