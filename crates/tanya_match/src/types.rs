use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which corpus produced a candidate answer.
///
/// Declaration order is arbitration priority: when two sources tie on score,
/// the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Canned FAQ replies keyed by example phrases.
    Intent,
    /// Available-book listings per catalog subject.
    Subject,
    /// Availability and shelf for one specific book title.
    Title,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Intent => "intent",
            Source::Subject => "subject",
            Source::Title => "title",
        }
    }
}

/// Threshold configuration for matching and arbitration.
///
/// Scores are on the 0–100 similarity scale. `MatchConfig` is cheap to clone
/// and serde-friendly so it can live in a config file or be embedded in
/// higher-level configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Minimum intent-pattern score for the FAQ source to win outright.
    #[serde(default = "MatchConfig::default_intent_threshold")]
    pub intent_threshold: f32,
    /// Minimum subject-keyword score for the subject source to match.
    #[serde(default = "MatchConfig::default_subject_threshold")]
    pub subject_threshold: f32,
    /// Minimum title score for the title source to match.
    #[serde(default = "MatchConfig::default_title_threshold")]
    pub title_threshold: f32,
    /// Lower bound used only when no source clears its primary threshold;
    /// keeps near-zero-confidence matches from being served.
    #[serde(default = "MatchConfig::default_fallback_floor")]
    pub fallback_floor: f32,
    /// Fixed confidence assigned when a subject keyword matches by literal
    /// substring instead of by metric score.
    #[serde(default = "MatchConfig::default_substring_confidence")]
    pub substring_confidence: f32,
}

impl MatchConfig {
    pub(crate) fn default_intent_threshold() -> f32 {
        60.0
    }

    pub(crate) fn default_subject_threshold() -> f32 {
        70.0
    }

    pub(crate) fn default_title_threshold() -> f32 {
        75.0
    }

    pub(crate) fn default_fallback_floor() -> f32 {
        40.0
    }

    pub(crate) fn default_substring_confidence() -> f32 {
        80.0
    }

    /// Primary threshold for a source.
    pub fn threshold_for(&self, source: Source) -> f32 {
        match source {
            Source::Intent => self.intent_threshold,
            Source::Subject => self.subject_threshold,
            Source::Title => self.title_threshold,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        let scales = [
            ("intent_threshold", self.intent_threshold),
            ("subject_threshold", self.subject_threshold),
            ("title_threshold", self.title_threshold),
            ("fallback_floor", self.fallback_floor),
            ("substring_confidence", self.substring_confidence),
        ];
        for (name, value) in scales {
            if !(0.0..=100.0).contains(&value) {
                return Err(MatchError::InvalidConfig(format!(
                    "{name} must be between 0.0 and 100.0"
                )));
            }
        }
        if self.substring_confidence < self.subject_threshold {
            return Err(MatchError::InvalidConfig(
                "substring_confidence must not be below subject_threshold".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            intent_threshold: Self::default_intent_threshold(),
            subject_threshold: Self::default_subject_threshold(),
            title_threshold: Self::default_title_threshold(),
            fallback_floor: Self::default_fallback_floor(),
            substring_confidence: Self::default_substring_confidence(),
        }
    }
}

/// Outcome of one source's matching procedure.
///
/// The intent matcher applies no threshold, so it may carry a response at any
/// positive score. The subject and title matchers threshold internally and
/// return [`SourceMatch::no_match`] below theirs.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMatch {
    pub response: Option<String>,
    pub score: f32,
    /// Label identifying the winning pattern, subject keyword, or title.
    pub provenance: String,
}

impl SourceMatch {
    pub fn no_match() -> Self {
        Self {
            response: None,
            score: 0.0,
            provenance: String::new(),
        }
    }
}

/// The arbitrated answer handed to the caller.
///
/// Invariant: `score == 0.0` exactly when `provenance` is empty (the
/// unmatched branch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub response: String,
    pub score: f32,
    pub provenance: String,
}

/// Which terminal branch of the arbitration produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// A source cleared its own threshold.
    Threshold(Source),
    /// No source cleared its threshold; the best positive-score source above
    /// the fallback floor was served instead.
    Fallback(Source),
    /// Nothing usable; the fixed don't-understand reply was served.
    Unmatched,
}

impl ReplyOutcome {
    pub fn source(&self) -> Option<Source> {
        match self {
            ReplyOutcome::Threshold(source) | ReplyOutcome::Fallback(source) => Some(*source),
            ReplyOutcome::Unmatched => None,
        }
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid threshold configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}
