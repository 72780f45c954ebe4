//! Keyword matching against word occurrences.
//!
//! Keywords are compared diacritic-insensitively: both the keyword and the
//! keys of the occurrence map go through [`trim_specials`] before lookup.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::words::{trim_specials, WordOccurrences};

#[derive(Debug, Error)]
pub enum KeywordsError {
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Keywords payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Cannot read keywords file {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A set of keywords (banned or searched words), each expanded into the
/// variants it may match.
#[derive(Clone, Debug, Default)]
pub struct KeywordSet {
    keywords: Vec<String>,
    variants: Vec<String>,
}

impl KeywordSet {
    /// Builds a set from raw words. Whitespace inside a word is removed and
    /// words left empty are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = KeywordSet::default();
        for word in words {
            let word: String = word
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if word.is_empty() || set.keywords.contains(&word) {
                continue;
            }
            for variant in expand_variants(&word) {
                if !set.variants.contains(&variant) {
                    set.variants.push(variant);
                }
            }
            set.keywords.push(word);
        }
        set
    }

    /// Decodes a base64 encoded, comma separated list of words.
    pub fn from_base64_csv(encoded: &str) -> Result<Self, KeywordsError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        let decoded = String::from_utf8(bytes)?;
        Ok(Self::new(decoded.split(',')))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }
}

/// Original word, its diacritic-stripped form, and both in lower and upper case.
fn expand_variants(word: &str) -> Vec<String> {
    let trimmed = trim_specials(word);
    let mut variants = Vec::with_capacity(6);
    for candidate in [
        word.to_string(),
        trimmed.clone(),
        word.to_lowercase(),
        trimmed.to_lowercase(),
        word.to_uppercase(),
        trimmed.to_uppercase(),
    ] {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

impl WordOccurrences {
    /// True when at least one keyword variant occurs in these lyrics.
    ///
    /// Matching happens on a trimmed copy, `self` keeps its keys.
    pub fn contains_any(&self, keywords: &KeywordSet) -> bool {
        if keywords.is_empty() {
            return false;
        }
        let trimmed = self.trim_specials();
        keywords
            .variants()
            .iter()
            .any(|variant| trimmed.get(&trim_specials(variant)) > 0)
    }
}

/// Splits `--keyword` style arguments, each of which may hold a comma
/// separated list.
pub fn split_keyword_args<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split(','))
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads keywords from a text file. Words are separated by spaces, commas
/// or line breaks and are lower-cased.
pub fn load_keywords_file(path: &Path) -> Result<Vec<String>, KeywordsError> {
    let content = std::fs::read_to_string(path).map_err(|source| KeywordsError::File {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect())
}
