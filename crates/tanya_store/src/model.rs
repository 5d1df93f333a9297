use serde::{Deserialize, Serialize};

/// Whether a book is on the shelf or out with a borrower.
///
/// The wire and database representation keeps the original system's
/// vocabulary (`tersedia` / `dipinjam`); [`Availability::label`] is the
/// user-facing phrasing used in rendered replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "tersedia")]
    Available,
    #[serde(rename = "dipinjam")]
    Borrowed,
}

impl Availability {
    /// Parse a raw database value. Anything that is not exactly `tersedia`
    /// counts as borrowed, matching how the original data is read.
    pub fn from_db(raw: &str) -> Self {
        if raw == "tersedia" {
            Availability::Available
        } else {
            Availability::Borrowed
        }
    }

    /// User-facing status label.
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "tersedia",
            Availability::Borrowed => "sedang dipinjam",
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    /// Subject shelf the book is filed under. May be absent for uncatalogued
    /// donations; such books never participate in subject matching.
    #[serde(default)]
    pub subject: Option<String>,
    pub availability: Availability,
    /// Shelf label, e.g. `A1`.
    pub location: String,
}

/// Title + shelf projection returned by the subject availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRef {
    pub title: String,
    pub location: String,
}

/// A tagged group of equivalent example phrases mapped to a set of
/// acceptable reply texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub tag: String,
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
}

/// The loaded intent table. Treated as an immutable snapshot: a reload
/// produces a fresh `IntentSet` and swaps it wholesale, it never mutates one
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSet {
    pub intents: Vec<Intent>,
}

impl IntentSet {
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
