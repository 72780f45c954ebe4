//! Extraction of the lyrics text out of a lyrics page.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

/// Elements removed before looking for lyrics, their text would leak into
/// the lyrics otherwise.
pub const BLOCKED_SELECTORS: [&str; 2] = ["script", "#onetrust-consent-sdk"];

/// Candidate lyrics containers, in priority order. The site serves several
/// layouts at the same time (A/B tests).
pub const LYRICS_SELECTORS: [&str; 3] = [
    "#lyrics-root-pin-spacer",
    ".lyrics",
    "div[data-lyrics-container='true']",
];

lazy_static! {
    static ref BLOCKED: Vec<Selector> = BLOCKED_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect();
    static ref CANDIDATES: Vec<Selector> = LYRICS_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("empty lyrics")]
    EmptyLyrics,
}

/// Returns the plain lyrics text of a lyrics page.
///
/// The first selector of [`LYRICS_SELECTORS`] yielding non-empty text wins;
/// when several elements match it, their texts are joined by line breaks.
pub fn extract_lyrics(html: &str) -> Result<String, ExtractError> {
    let mut document = Html::parse_document(html);
    remove_blocked(&mut document);

    // `Html::select` also walks detached nodes, only the live tree counts.
    let root = document.root_element();
    for selector in CANDIDATES.iter() {
        let text = root
            .select(selector)
            .map(element_text)
            .collect::<Vec<_>>()
            .join("\n");
        let text = text.trim();
        if !text.is_empty() {
            return Ok(text.to_string());
        }
    }

    Err(ExtractError::EmptyLyrics)
}

fn remove_blocked(document: &mut Html) {
    let ids: Vec<_> = BLOCKED
        .iter()
        .flat_map(|selector| document.select(selector).map(|element| element.id()))
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Text content of an element, `<br>` rendered as a line break.
fn element_text(element: ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}
