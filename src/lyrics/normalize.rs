//! Lyrics text normalization.
//!
//! Turns the raw text pulled out of a lyrics page into plain words separated
//! by whitespace, ready to be tokenized.

use lazy_static::lazy_static;
use regex::Regex;

/// Punctuation marks dropped from the lyrics before tokenizing.
pub const MARK_CHARS: [char; 4] = [',', '.', '!', '?'];

lazy_static! {
    // Section labels ("[Chorus]") and ad-lib asides ("(yeah)"), non-greedy.
    static ref ANNOTATIONS: Regex = Regex::new(r"\[(.*?)\]|\((.*?)\)").unwrap();

    // Any run of horizontal whitespace, including non-breaking spaces.
    static ref HORIZONTAL_SPACES: Regex = Regex::new(r"[^\S\n]+").unwrap();
}

/// Normalizes raw lyrics text.
///
/// Steps, in order:
/// 1. bracketed annotations, both `[...]` and `(...)`, are removed
/// 2. the marks in [`MARK_CHARS`] are stripped
/// 3. runs of horizontal whitespace collapse into a single space
/// 4. a space is inserted before every uppercase letter glued to the
///    previous character, so `"testTest"` becomes `"test Test"`
pub fn normalize(raw: &str) -> String {
    let without_annotations = ANNOTATIONS.replace_all(raw, "");
    let without_marks: String = without_annotations
        .chars()
        .filter(|c| !MARK_CHARS.contains(c))
        .collect();
    let spaced = HORIZONTAL_SPACES.replace_all(&without_marks, " ");

    split_glued_words(spaced.trim())
}

/// The lyrics site sometimes renders two lines without any separator
/// between them, leaving words like "yeahThe" behind.
fn split_glued_words(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + text.len() / 8);
    let mut previous: Option<char> = None;

    for c in text.chars() {
        if c.is_uppercase() && previous.is_some_and(|p| !p.is_whitespace()) {
            output.push(' ');
        }
        output.push(c);
        previous = Some(c);
    }

    output
}
