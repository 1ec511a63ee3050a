//! Field-based ordering of collection snapshots.

use crate::model::book::Book;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Sortable book fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Author,
    NumberOfPages,
    Rating,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::NumberOfPages => "number_of_pages",
            Self::Rating => "rating",
        }
    }

    /// Three-way ascending comparison: lexicographic for text, numeric otherwise.
    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Title => a.title.cmp(&b.title),
            Self::Author => a.author.cmp(&b.author),
            Self::NumberOfPages => a.number_of_pages.cmp(&b.number_of_pages),
            Self::Rating => a.rating.cmp(&b.rating),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortField(pub String);

impl Display for UnknownSortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown sort field `{}`; expected title|author|number_of_pages|rating",
            self.0
        )
    }
}

impl Error for UnknownSortField {}

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "number_of_pages" => Ok(Self::NumberOfPages),
            "rating" => Ok(Self::Rating),
            _ => Err(UnknownSortField(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(format!("unknown sort direction `{other}`; expected asc|desc")),
        }
    }
}

/// Sorts by a field given by name (case-insensitive).
///
/// - Empty input yields an owned empty list.
/// - An unrecognized field name yields the input borrowed and unchanged.
/// - Otherwise a stable sort: ties keep their input order in both directions.
pub fn sort_books<'a>(books: &'a [Book], field: &str, direction: SortDirection) -> Cow<'a, [Book]> {
    if books.is_empty() {
        return Cow::Owned(Vec::new());
    }

    match field.parse::<SortField>() {
        Ok(field) => Cow::Owned(sort_by_field(books, field, direction)),
        Err(_) => Cow::Borrowed(books),
    }
}

/// Returns a sorted copy of `books`.
pub fn sort_by_field(books: &[Book], field: SortField, direction: SortDirection) -> Vec<Book> {
    let mut sorted = books.to_vec();
    sorted.sort_by(|a, b| direction.apply(field.compare(a, b)));
    sorted
}
