//! Free-text filtering by title or author.

use crate::model::book::Book;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns books whose title or author contains `search_text`.
///
/// All whitespace is stripped from `search_text` first. When nothing is left
/// the input is returned borrowed and unchanged. Matching is a Unicode-aware,
/// case-insensitive substring test; there is no tokenization.
pub fn filter_books<'a>(books: &'a [Book], search_text: &str) -> Cow<'a, [Book]> {
    let needle = normalize_search_text(search_text);
    if needle.is_empty() {
        return Cow::Borrowed(books);
    }

    Cow::Owned(
        books
            .iter()
            .filter(|book| matches_needle(book, &needle))
            .cloned()
            .collect(),
    )
}

/// Lowercases `search_text` and removes every whitespace character.
pub fn normalize_search_text(search_text: &str) -> String {
    WHITESPACE_RE.replace_all(search_text, "").to_lowercase()
}

fn matches_needle(book: &Book, needle: &str) -> bool {
    book.title.to_lowercase().contains(needle) || book.author.to_lowercase().contains(needle)
}
