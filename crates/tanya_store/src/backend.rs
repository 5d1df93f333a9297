use std::sync::RwLock;

use crate::model::{Book, BookRef, IntentSet};
use crate::{CatalogStore, IntentStore, StoreError};

#[cfg(feature = "backend-postgres")]
pub use self::pg::{PostgresCatalog, PostgresConfig, PostgresIntentStore};

/// In-memory intent store.
///
/// Holds a fixed intent table; `load_intents` hands out a clone of it. Used
/// by tests, demos, and seed-file deployments.
pub struct MemoryIntentStore {
    intents: IntentSet,
}

impl MemoryIntentStore {
    pub fn new(intents: IntentSet) -> Self {
        Self { intents }
    }

    pub fn empty() -> Self {
        Self {
            intents: IntentSet::default(),
        }
    }
}

impl IntentStore for MemoryIntentStore {
    fn load_intents(&self) -> Result<IntentSet, StoreError> {
        Ok(self.intents.clone())
    }
}

/// In-memory book catalog.
///
/// The book list sits behind a `RwLock` so tests can update inventory
/// between queries, mirroring the live-catalog semantics of the real
/// backend: every store call sees current state.
pub struct MemoryCatalog {
    books: RwLock<Vec<Book>>,
}

impl MemoryCatalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Replace the whole inventory.
    pub fn set_books(&self, books: Vec<Book>) {
        let mut guard = self
            .books
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = books;
    }
}

impl CatalogStore for MemoryCatalog {
    fn distinct_subjects(&self) -> Result<Vec<String>, StoreError> {
        let guard = self
            .books
            .read()
            .map_err(|_| StoreError::unavailable("poisoned catalog lock"))?;
        let mut subjects: Vec<String> = Vec::new();
        for book in guard.iter() {
            if let Some(subject) = &book.subject {
                let lowered = subject.to_lowercase();
                if !lowered.is_empty() && !subjects.contains(&lowered) {
                    subjects.push(lowered);
                }
            }
        }
        Ok(subjects)
    }

    fn all_books(&self) -> Result<Vec<Book>, StoreError> {
        let guard = self
            .books
            .read()
            .map_err(|_| StoreError::unavailable("poisoned catalog lock"))?;
        Ok(guard.clone())
    }

    fn available_by_subject(&self, keyword: &str) -> Result<Vec<BookRef>, StoreError> {
        let needle = keyword.to_lowercase();
        let guard = self
            .books
            .read()
            .map_err(|_| StoreError::unavailable("poisoned catalog lock"))?;
        let refs = guard
            .iter()
            .filter(|book| book.availability == crate::Availability::Available)
            .filter(|book| {
                book.subject
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
            .map(|book| BookRef {
                title: book.title.clone(),
                location: book.location.clone(),
            })
            .collect();
        Ok(refs)
    }
}

#[cfg(feature = "backend-postgres")]
mod pg {
    use std::time::Duration;

    use postgres::NoTls;
    use tracing::warn;

    use crate::model::{Availability, Book, BookRef, Intent, IntentSet};
    use crate::{CatalogStore, IntentStore, StoreError};

    /// Connection settings for the Postgres backend.
    ///
    /// Each store call opens a fresh, bounded-timeout connection so matchers
    /// always read current inventory and a wedged database can only stall a
    /// single query.
    #[derive(Debug, Clone)]
    pub struct PostgresConfig {
        pub host: String,
        pub port: u16,
        pub user: String,
        pub password: String,
        pub dbname: String,
        pub connect_timeout: Duration,
    }

    impl Default for PostgresConfig {
        fn default() -> Self {
            Self {
                host: "localhost".into(),
                port: 5432,
                user: "postgres".into(),
                password: String::new(),
                dbname: "tanya".into(),
                connect_timeout: Duration::from_secs(60),
            }
        }
    }

    impl PostgresConfig {
        fn connect(&self) -> Result<postgres::Client, StoreError> {
            postgres::Config::new()
                .host(&self.host)
                .port(self.port)
                .user(&self.user)
                .password(&self.password)
                .dbname(&self.dbname)
                .connect_timeout(self.connect_timeout)
                .connect(NoTls)
                .map_err(|e| StoreError::unavailable(e.to_string()))
        }
    }

    /// Intent table reader backed by the `intents` table.
    ///
    /// `patterns` and `responses` are stored as JSON array text. A row whose
    /// payload does not parse is skipped with a warning; one bad record must
    /// not take the whole FAQ offline.
    pub struct PostgresIntentStore {
        config: PostgresConfig,
    }

    impl PostgresIntentStore {
        pub fn new(config: PostgresConfig) -> Self {
            Self { config }
        }
    }

    /// Parse one `intents` row into an [`Intent`].
    pub(crate) fn parse_intent_row(
        tag: &str,
        patterns_json: &str,
        responses_json: &str,
    ) -> Result<Intent, StoreError> {
        let patterns: Vec<String> =
            serde_json::from_str(patterns_json).map_err(|e| StoreError::MalformedRecord {
                tag: tag.to_string(),
                reason: format!("patterns: {e}"),
            })?;
        let responses: Vec<String> =
            serde_json::from_str(responses_json).map_err(|e| StoreError::MalformedRecord {
                tag: tag.to_string(),
                reason: format!("responses: {e}"),
            })?;
        Ok(Intent {
            tag: tag.to_string(),
            patterns,
            responses,
        })
    }

    impl IntentStore for PostgresIntentStore {
        fn load_intents(&self) -> Result<IntentSet, StoreError> {
            let mut client = self.config.connect()?;
            let rows = client
                .query("SELECT tag, patterns, responses FROM intents", &[])
                .map_err(|e| StoreError::query(e.to_string()))?;

            let mut intents = Vec::with_capacity(rows.len());
            for row in rows {
                let tag: String = row.get(0);
                let patterns_json: String = row.get(1);
                let responses_json: String = row.get(2);
                match parse_intent_row(&tag, &patterns_json, &responses_json) {
                    Ok(intent) => intents.push(intent),
                    Err(err) => warn!(%err, "skipping malformed intent record"),
                }
            }
            Ok(IntentSet::new(intents))
        }
    }

    /// Book catalog backed by the `books` table.
    pub struct PostgresCatalog {
        config: PostgresConfig,
    }

    impl PostgresCatalog {
        pub fn new(config: PostgresConfig) -> Self {
            Self { config }
        }
    }

    impl CatalogStore for PostgresCatalog {
        fn distinct_subjects(&self) -> Result<Vec<String>, StoreError> {
            let mut client = self.config.connect()?;
            let rows = client
                .query("SELECT DISTINCT subject FROM books", &[])
                .map_err(|e| StoreError::query(e.to_string()))?;
            let mut subjects = Vec::with_capacity(rows.len());
            for row in rows {
                let subject: Option<String> = row.get(0);
                if let Some(subject) = subject {
                    let lowered = subject.to_lowercase();
                    if !lowered.is_empty() && !subjects.contains(&lowered) {
                        subjects.push(lowered);
                    }
                }
            }
            Ok(subjects)
        }

        fn all_books(&self) -> Result<Vec<Book>, StoreError> {
            let mut client = self.config.connect()?;
            let rows = client
                .query("SELECT title, subject, availability, location FROM books", &[])
                .map_err(|e| StoreError::query(e.to_string()))?;
            let books = rows
                .iter()
                .map(|row| {
                    let availability: String = row.get(2);
                    Book {
                        title: row.get(0),
                        subject: row.get(1),
                        availability: Availability::from_db(&availability),
                        location: row.get(3),
                    }
                })
                .collect();
            Ok(books)
        }

        fn available_by_subject(&self, keyword: &str) -> Result<Vec<BookRef>, StoreError> {
            let mut client = self.config.connect()?;
            let pattern = format!("%{}%", keyword.to_lowercase());
            let rows = client
                .query(
                    "SELECT title, location FROM books \
                     WHERE lower(subject) LIKE $1 AND availability = 'tersedia'",
                    &[&pattern],
                )
                .map_err(|e| StoreError::query(e.to_string()))?;
            let refs = rows
                .iter()
                .map(|row| BookRef {
                    title: row.get(0),
                    location: row.get(1),
                })
                .collect();
            Ok(refs)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, Intent};

    fn sample_books() -> Vec<Book> {
        vec![
            Book {
                title: "Pemrograman Python Dasar".into(),
                subject: Some("Teknologi".into()),
                availability: Availability::Available,
                location: "A1".into(),
            },
            Book {
                title: "Psikologi Umum".into(),
                subject: Some("psikologi".into()),
                availability: Availability::Available,
                location: "B2".into(),
            },
            Book {
                title: "Psikologi Perkembangan".into(),
                subject: Some("Psikologi".into()),
                availability: Availability::Borrowed,
                location: "B2".into(),
            },
            Book {
                title: "Donasi Tanpa Label".into(),
                subject: None,
                availability: Availability::Available,
                location: "Z9".into(),
            },
        ]
    }

    #[test]
    fn distinct_subjects_are_lowercased_and_deduped() {
        let catalog = MemoryCatalog::new(sample_books());
        let subjects = catalog.distinct_subjects().unwrap();
        assert_eq!(subjects, vec!["teknologi".to_string(), "psikologi".to_string()]);
    }

    #[test]
    fn empty_and_missing_subjects_are_dropped() {
        let mut books = sample_books();
        books.push(Book {
            title: "Subjek Kosong".into(),
            subject: Some("".into()),
            availability: Availability::Available,
            location: "Z1".into(),
        });
        let catalog = MemoryCatalog::new(books);
        let subjects = catalog.distinct_subjects().unwrap();
        assert!(!subjects.contains(&String::new()));
        assert_eq!(subjects.len(), 2);
    }

    #[test]
    fn available_by_subject_filters_availability_and_substring() {
        let catalog = MemoryCatalog::new(sample_books());
        let refs = catalog.available_by_subject("psikologi").unwrap();
        // The borrowed volume must not appear.
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].title, "Psikologi Umum");
        assert_eq!(refs[0].location, "B2");
    }

    #[test]
    fn available_by_subject_matches_case_insensitively() {
        let catalog = MemoryCatalog::new(sample_books());
        let refs = catalog.available_by_subject("TEKNOLOGI").unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].title, "Pemrograman Python Dasar");
    }

    #[test]
    fn set_books_replaces_inventory() {
        let catalog = MemoryCatalog::empty();
        assert!(catalog.all_books().unwrap().is_empty());
        catalog.set_books(sample_books());
        assert_eq!(catalog.all_books().unwrap().len(), 4);
    }

    #[test]
    fn memory_intent_store_round_trips() {
        let set = IntentSet::new(vec![Intent {
            tag: "greeting".into(),
            patterns: vec!["halo".into()],
            responses: vec!["Selamat datang!".into()],
        }]);
        let store = MemoryIntentStore::new(set.clone());
        assert_eq!(store.load_intents().unwrap(), set);
    }
}
