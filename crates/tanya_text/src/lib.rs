//! # Tanya Text Primitives
//!
//! This crate provides the two string primitives everything else in the
//! engine is built on: a normalized edit-distance similarity score and a
//! query normalizer.
//!
//! ## Core Responsibilities
//!
//! - **Similarity**: [`similarity`] computes a 0–100 closeness score between
//!   two strings from their Levenshtein distance. 100 means identical, 0
//!   means nothing in common at the character level.
//! - **Normalization**: [`normalize`] lowercases a query, strips everything
//!   that is neither a word character nor whitespace, and trims the edges, so
//!   `"Halo, Bot!"` and `"halo bot"` compare equal.
//!
//! The metric itself is case- and whitespace-sensitive by construction;
//! callers decide how much normalization to apply before scoring. The intent
//! matcher normalizes fully, while subject and title matching only lowercase.
//!
//! ## Example Usage
//!
//! ```
//! use tanya_text::{normalize, similarity};
//!
//! assert_eq!(normalize("Hello, World!"), "hello world");
//! assert_eq!(similarity("psikologi", "psikologi"), 100.0);
//! assert!(similarity("psikolog", "psikologi") > 85.0);
//! ```

/// Levenshtein distance between two strings, counted in chars.
///
/// Unit cost for insertion, deletion, and substitution. Uses two rolling rows
/// instead of the full matrix, keeping memory at O(min(|a|, |b|)).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    // Keep the row allocated over the shorter string.
    if len_b > len_a {
        return edit_distance(b, a);
    }
    if len_b == 0 {
        return len_a;
    }

    let mut prev_row: Vec<usize> = (0..=len_b).collect();
    let mut curr_row = vec![0usize; len_b + 1];

    for (i, ca) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len_b]
}

/// Normalized similarity in `[0.0, 100.0]`.
///
/// `100 * (max_len - distance) / max_len`, where `max_len` is the longer
/// string's char count. Two empty strings are a perfect, trivial match.
/// The result is floored at zero; the distance can never exceed `max_len`,
/// so the floor is never hit on real inputs.
pub fn similarity(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100.0;
    }
    if a == b {
        return 100.0;
    }
    let distance = edit_distance(a, b);
    (((max_len - distance) as f32 / max_len as f32) * 100.0).max(0.0)
}

/// Lowercase `text`, strip every char that is neither a word character
/// (alphanumeric or `_`) nor whitespace, and trim the edges.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || ch.is_whitespace())
        .collect();
    kept.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(similarity("halo", "halo"), 100.0);
        assert_eq!(similarity("pemrograman python dasar", "pemrograman python dasar"), 100.0);
    }

    #[test]
    fn both_empty_is_trivial_match() {
        assert_eq!(similarity("", ""), 100.0);
    }

    #[test]
    fn empty_against_non_empty_scores_zero() {
        assert_eq!(similarity("halo", ""), 0.0);
        assert_eq!(similarity("", "halo"), 0.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [
            ("psikolog", "psikologi"),
            ("buku", "duku"),
            ("jam buka", "jam tutup"),
            ("", "abc"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a), "pair ({a:?}, {b:?})");
        }
    }

    #[test]
    fn similarity_stays_in_range() {
        let samples = ["", "a", "halo", "perpustakaan", "日本語テキスト", "x _ y"];
        for a in samples {
            for b in samples {
                let s = similarity(a, b);
                assert!((0.0..=100.0).contains(&s), "similarity({a:?}, {b:?}) = {s}");
            }
        }
    }

    #[test]
    fn one_edit_over_nine_chars() {
        // "psikolog" -> "psikologi" is a single insertion over length 9.
        let s = similarity("psikolog", "psikologi");
        assert!((s - 100.0 * 8.0 / 9.0).abs() < 1e-4, "got {s}");
        assert!(s >= 70.0);
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        // Multi-byte chars must count as single edits.
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(edit_distance("日本", "日米"), 1);
    }

    #[test]
    fn normalize_strips_punctuation_and_lowercases() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("  Jam buka perpustakaan?  "), "jam buka perpustakaan");
        assert_eq!(normalize("buku_baru: ada?"), "buku_baru ada");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = ["Hello, World!", "  Halo!!!  ", "sudah bersih", "", "¿Qué tal?"];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn normalize_keeps_unicode_letters_and_digits() {
        assert_eq!(normalize("Café №5!"), "café 5");
        assert_eq!(normalize("rak A1"), "rak a1");
    }
}
