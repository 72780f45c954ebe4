//! Lyrics text processing: markup extraction, normalization, word counting
//! and keyword matching.

pub mod extractor;
pub mod keywords;
pub mod normalize;
pub mod words;

pub use extractor::{extract_lyrics, ExtractError};
pub use keywords::{load_keywords_file, split_keyword_args, KeywordSet, KeywordsError};
pub use normalize::normalize;
pub use words::{count_words, trim_specials, WordOccurrences};
