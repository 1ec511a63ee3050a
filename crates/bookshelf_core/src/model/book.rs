//! Book record, reading status and write-side request types.
//!
//! # Responsibility
//! - Define the canonical `Book` record and its wire field names.
//! - Provide `NewBook` (create input) and `BookPatch` (explicit field update).
//!
//! # Invariants
//! - `id` and `date_added` are assigned once at creation.
//! - `date_read` and `read_count` are carried but never set by core operations.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Image shown for books created without a cover URL.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://developers.elementor.com/docs/assets/img/elementor-placeholder-image.png";

/// Stable identifier of a book within the collection.
pub type BookId = Uuid;

/// Reading progress of a book.
///
/// Serialized as `to_read|reading|read`; decoding goes through `FromStr`, so
/// stored values such as `"Reading"` or `"to read"` are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    /// On the wish list.
    ToRead,
    /// Currently being read.
    Reading,
    /// Finished.
    Read,
}

impl ReadingStatus {
    /// Returns the stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToRead => "to_read",
            Self::Reading => "reading",
            Self::Read => "read",
        }
    }

    /// Returns the human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ToRead => "To Read",
            Self::Reading => "Reading",
            Self::Read => "Read",
        }
    }
}

impl Display for ReadingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = BookValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "to_read" | "to read" => Ok(Self::ToRead),
            "reading" => Ok(Self::Reading),
            "read" => Ok(Self::Read),
            other => Err(BookValidationError::UnknownStatus(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ReadingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Validation failures for book input and persisted collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    MissingTitle,
    MissingAuthor,
    /// `number_of_pages` is zero.
    MissingPages,
    UnknownStatus(String),
    NilId,
    /// The same id appears more than once in a collection.
    DuplicateId(BookId),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "title is required"),
            Self::MissingAuthor => write!(f, "author is required"),
            Self::MissingPages => write!(f, "number_of_pages must be a positive number"),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown reading status `{value}`; expected to_read|reading|read"
            ),
            Self::NilId => write!(f, "book id must not be nil"),
            Self::DuplicateId(id) => write!(f, "duplicate book id: {id}"),
        }
    }
}

impl Error for BookValidationError {}

/// Canonical persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub status: ReadingStatus,
    /// Serialized as `imageUrl` to stay compatible with stored collections.
    #[serde(
        rename = "imageUrl",
        default = "default_image_url",
        deserialize_with = "image_url_or_placeholder"
    )]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review: String,
    pub number_of_pages: u32,
    pub date_added: DateTime<Utc>,
    /// `None` until the first update.
    #[serde(default)]
    pub date_updated: Option<DateTime<Utc>>,
    /// Reserved; no operation sets it yet.
    #[serde(default)]
    pub date_read: Option<DateTime<Utc>>,
    /// Reserved; no operation increments it yet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_count: u32,
}

fn default_image_url() -> String {
    PLACEHOLDER_IMAGE_URL.to_string()
}

/// Stored collections may carry `null` where a value has a default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn image_url_or_placeholder<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(default_image_url))
}

impl Book {
    /// Builds a fresh record from a create request.
    ///
    /// # Invariants
    /// - Generates a new v4 id and stamps `date_added` with the current time.
    /// - Uses `placeholder_image_url` when the request carries no image URL.
    /// - `rating`, `review` and `read_count` start zeroed; optional dates start as `None`.
    ///
    /// # Errors
    /// - Returns the first failing field check of [`NewBook::validate`].
    pub fn from_request(
        request: NewBook,
        placeholder_image_url: &str,
    ) -> Result<Self, BookValidationError> {
        request.validate()?;

        let image_url = request
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| placeholder_image_url.to_string());

        Ok(Self {
            id: Uuid::new_v4(),
            title: request.title,
            author: request.author,
            status: request.status,
            image_url,
            rating: 0,
            review: String::new(),
            number_of_pages: request.number_of_pages,
            date_added: Utc::now(),
            date_updated: None,
            date_read: None,
            read_count: 0,
        })
    }

    /// Checks required fields of an existing record.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.id.is_nil() {
            return Err(BookValidationError::NilId);
        }
        validate_required(&self.title, &self.author, self.number_of_pages)
    }

    /// Applies every field set on `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(review) = &patch.review {
            self.review = review.clone();
        }
        if let Some(number_of_pages) = patch.number_of_pages {
            self.number_of_pages = number_of_pages;
        }
    }
}

/// Input for creating a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub status: ReadingStatus,
    /// Empty or absent values fall back to the placeholder image.
    pub image_url: Option<String>,
    pub number_of_pages: u32,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        status: ReadingStatus,
        number_of_pages: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            status,
            image_url: None,
            number_of_pages,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Rejects blank title/author and a zero page count.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_required(&self.title, &self.author, self.number_of_pages)
    }
}

/// Explicit field-by-field update. Unset fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub status: Option<ReadingStatus>,
    pub image_url: Option<String>,
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub number_of_pages: Option<u32>,
}

impl BookPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn status(mut self, status: ReadingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }

    pub fn number_of_pages(mut self, number_of_pages: u32) -> Self {
        self.number_of_pages = Some(number_of_pages);
        self
    }

    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn validate_required(
    title: &str,
    author: &str,
    number_of_pages: u32,
) -> Result<(), BookValidationError> {
    if title.trim().is_empty() {
        return Err(BookValidationError::MissingTitle);
    }
    if author.trim().is_empty() {
        return Err(BookValidationError::MissingAuthor);
    }
    if number_of_pages == 0 {
        return Err(BookValidationError::MissingPages);
    }
    Ok(())
}
