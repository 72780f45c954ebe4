//! Word tokenizing and occurrence counting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::normalize::normalize;

/// Letters removed from words before any diacritic-insensitive comparison.
/// Only the uppercase set is listed, lowercase variants are derived.
pub const DIACRITIC_CHARS: &str = "ĄĆĘŁŃÓŚŹŻ";

/// Tokens this short or shorter are noise (articles, interjections).
pub const MIN_DISCARDED_WORD_LEN: usize = 2;

/// Removes every character of [`DIACRITIC_CHARS`], in both cases, from `word`.
///
/// The characters are dropped, not transliterated: `"testą"` becomes `"test"`.
pub fn trim_specials(word: &str) -> String {
    word.chars()
        .filter(|c| !is_diacritic(*c))
        .collect()
}

fn is_diacritic(c: char) -> bool {
    DIACRITIC_CHARS
        .chars()
        .any(|d| d == c || d.to_lowercase().any(|lower| lower == c))
}

/// Mapping from a normalized word to the number of times it occurs.
///
/// Keys are lower-cased and longer than [`MIN_DISCARDED_WORD_LEN`] characters
/// when built through [`count_words`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordOccurrences(BTreeMap<String, u32>);

impl WordOccurrences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `word`, zero when absent.
    pub fn get(&self, word: &str) -> u32 {
        self.0.get(word).copied().unwrap_or(0)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.get(word) > 0
    }

    pub fn increment(&mut self, word: impl Into<String>) {
        *self.0.entry(word.into()).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Adds every count of `other` into `self`. Keys only present in one of
    /// the two maps keep their count.
    pub fn append(&mut self, other: &WordOccurrences) -> &mut Self {
        for (word, count) in other.iter() {
            *self.0.entry(word.to_string()).or_insert(0) += count;
        }
        self
    }

    /// Copy of this map with [`trim_specials`] applied to every key.
    /// Keys colliding after trimming are summed.
    pub fn trim_specials(&self) -> WordOccurrences {
        let mut trimmed = WordOccurrences::new();
        for (word, count) in self.iter() {
            *trimmed.0.entry(trim_specials(word)).or_insert(0) += count;
        }
        trimmed
    }

    /// The `n` most frequent words, ties broken alphabetically.
    pub fn most_frequent(&self, n: usize) -> Vec<(&str, u32)> {
        let mut words: Vec<(&str, u32)> = self.iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(n);
        words
    }
}

impl FromIterator<(String, u32)> for WordOccurrences {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        WordOccurrences(iter.into_iter().collect())
    }
}

/// Normalizes `lyrics` and counts its words.
///
/// Tokens are split on whitespace, tokens of [`MIN_DISCARDED_WORD_LEN`]
/// characters or fewer are dropped and the rest is lower-cased.
pub fn count_words(lyrics: &str) -> WordOccurrences {
    let mut occurrences = WordOccurrences::new();

    for token in normalize(lyrics).split_whitespace() {
        if token.chars().count() <= MIN_DISCARDED_WORD_LEN {
            continue;
        }
        occurrences.increment(token.to_lowercase());
    }

    occurrences
}
