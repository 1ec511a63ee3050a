//! Collection store: CRUD over the persisted book collection.
//!
//! # Responsibility
//! - Load, mutate and persist the whole collection through a `StoragePort`.
//! - Convert every outcome into an `Envelope` with a user-displayable message.
//!
//! # Invariants
//! - Input validation runs before anything is written; for update/patch an
//!   unknown id is reported before validation.
//! - Only create/update/patch/delete/save write; reads never write.
//! - A failed operation leaves the persisted collection unchanged.
//! - Not-found is reported as a failure envelope, never escalated.

use crate::config::CoreConfig;
use crate::model::book::{Book, BookId, BookPatch, BookValidationError, NewBook};
use crate::service::envelope::Envelope;
use crate::storage::codec::{decode_books, decode_books_value, encode_books, CodecError};
use crate::storage::{StorageError, StoragePort};
use chrono::Utc;
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreOp {
    Create,
    FetchAll,
    FetchOne,
    Update,
    Delete,
    Save,
}

impl StoreOp {
    fn event(self) -> &'static str {
        match self {
            Self::Create => "book_create",
            Self::FetchAll => "book_fetch_all",
            Self::FetchOne => "book_fetch_one",
            Self::Update => "book_update",
            Self::Delete => "book_delete",
            Self::Save => "book_save",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Successfully created book",
            Self::FetchAll => "Successfully fetched books",
            Self::FetchOne => "Successfully fetched book",
            Self::Update => "Successfully updated book",
            Self::Delete => "Successfully deleted book",
            Self::Save => "Books saved successfully.",
        }
    }

    fn failure_message(self, err: &StoreError) -> String {
        match (self, err) {
            (Self::Create, StoreError::Validation(err)) => {
                format!("Please pass the required values: {err}")
            }
            (_, StoreError::Validation(err)) => format!("Invalid book data: {err}"),
            (_, StoreError::InvalidInput(message)) => format!("Invalid input: {message}."),
            (Self::FetchOne, StoreError::NotFound(_)) => "Sorry, couldn't find book".to_string(),
            (Self::Update, StoreError::NotFound(_)) => "Unable to find book".to_string(),
            (Self::Delete, _) => "Sorry, unable to delete book".to_string(),
            (Self::Create, _) => "Sorry, unable to create book".to_string(),
            (Self::FetchAll | Self::FetchOne, _) => "Failed to fetch books".to_string(),
            (Self::Update, _) => "Sorry, unable to update book".to_string(),
            (Self::Save, _) => "Failed to save books to storage.".to_string(),
        }
    }
}

#[derive(Debug)]
enum StoreError {
    Validation(BookValidationError),
    /// Caller passed something that is not a collection of books.
    InvalidInput(String),
    NotFound(BookId),
    Storage(StorageError),
    Codec(CodecError),
}

impl StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage_failed",
            Self::Codec(_) => "codec_failed",
        }
    }

    fn is_persistence(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Codec(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::InvalidInput(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<BookValidationError> for StoreError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

type StoreResult<T> = Result<T, StoreError>;

/// Book collection store over an injected storage port.
pub struct BookStore<S: StoragePort> {
    storage: S,
    storage_key: String,
    placeholder_image_url: String,
}

impl<S: StoragePort> BookStore<S> {
    /// Creates a store using the default storage key and placeholder image.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, &CoreConfig::default())
    }

    pub fn with_config(storage: S, config: &CoreConfig) -> Self {
        Self {
            storage,
            storage_key: config.storage_key.clone(),
            placeholder_image_url: config.placeholder_image_url.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Creates a book and appends it to the collection.
    ///
    /// # Contract
    /// - Invalid input fails before storage is read or written.
    /// - Assigns id, default image, zeroed rating/review/read_count, `date_added = now`.
    /// - A storage failure means the book is not created.
    pub fn create(&self, request: NewBook) -> Envelope<Book> {
        let started_at = Instant::now();
        finish(StoreOp::Create, started_at, self.try_create(request))
    }

    /// Returns the whole collection; an empty store yields an empty list.
    pub fn fetch_all(&self) -> Envelope<Vec<Book>> {
        let started_at = Instant::now();
        finish(StoreOp::FetchAll, started_at, self.load())
    }

    /// Returns the book with `id`, or a not-found failure.
    pub fn fetch_one(&self, id: BookId) -> Envelope<Book> {
        let started_at = Instant::now();
        let result = self.load().and_then(|books| {
            books
                .into_iter()
                .find(|book| book.id == id)
                .ok_or(StoreError::NotFound(id))
        });
        finish(StoreOp::FetchOne, started_at, result)
    }

    /// Replaces the stored book that has `record.id` with `record`.
    ///
    /// # Contract
    /// - Full replacement: the caller carries forward unchanged fields.
    /// - Stored `date_added` is kept and `date_updated` is stamped with now.
    /// - Unknown id fails without writing, and takes precedence over
    ///   validation failures of the supplied record.
    pub fn update(&self, record: &Book) -> Envelope<Book> {
        let started_at = Instant::now();
        let result = self
            .load()
            .and_then(|books| self.replace_in(books, record.clone()));
        finish(StoreOp::Update, started_at, result)
    }

    /// Applies the fields set on `patch` to the stored book, then updates it.
    pub fn patch(&self, id: BookId, patch: &BookPatch) -> Envelope<Book> {
        let started_at = Instant::now();
        let result = self.load().and_then(|books| {
            let mut record = books
                .iter()
                .find(|book| book.id == id)
                .cloned()
                .ok_or(StoreError::NotFound(id))?;
            record.apply(patch);
            self.replace_in(books, record)
        });
        finish(StoreOp::Update, started_at, result)
    }

    /// Removes the book with `id`.
    ///
    /// Success is decided by comparing collection length before and after
    /// removal; when nothing matched, storage is left untouched.
    pub fn delete(&self, id: BookId) -> Envelope<()> {
        let started_at = Instant::now();
        let result = self.load().and_then(|mut books| {
            let before = books.len();
            books.retain(|book| book.id != id);
            if books.len() == before {
                return Err(StoreError::NotFound(id));
            }
            self.persist(&books)
        });
        finish(StoreOp::Delete, started_at, result)
    }

    /// Overwrites the persisted collection with `books`.
    ///
    /// Every record must be valid and ids must be unique.
    pub fn save(&self, books: &[Book]) -> Envelope<()> {
        let started_at = Instant::now();
        let result = validate_collection(books).and_then(|()| self.persist(books));
        finish(StoreOp::Save, started_at, result)
    }

    /// Saves a collection given as JSON text.
    ///
    /// Anything other than a JSON array of book records is rejected as
    /// invalid input before storage is touched.
    pub fn save_json(&self, text: &str) -> Envelope<()> {
        let started_at = Instant::now();
        let result = parse_collection(text).and_then(|books| {
            validate_collection(&books)?;
            self.persist(&books)
        });
        finish(StoreOp::Save, started_at, result)
    }

    fn try_create(&self, request: NewBook) -> StoreResult<Book> {
        let book = Book::from_request(request, &self.placeholder_image_url)?;
        let mut books = self.load()?;
        books.push(book.clone());
        self.persist(&books)?;
        Ok(book)
    }

    fn replace_in(&self, mut books: Vec<Book>, mut record: Book) -> StoreResult<Book> {
        let index = books
            .iter()
            .position(|book| book.id == record.id)
            .ok_or(StoreError::NotFound(record.id))?;
        record.validate()?;

        record.date_added = books[index].date_added;
        record.date_updated = Some(Utc::now());
        books[index] = record.clone();
        self.persist(&books)?;
        Ok(record)
    }

    fn load(&self) -> StoreResult<Vec<Book>> {
        match self.storage.get(&self.storage_key)? {
            Some(text) => Ok(decode_books(&text)?),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, books: &[Book]) -> StoreResult<()> {
        let text = encode_books(books)?;
        self.storage.set(&self.storage_key, &text)?;
        Ok(())
    }
}

fn parse_collection(text: &str) -> StoreResult<Vec<Book>> {
    let value = serde_json::from_str(text)
        .map_err(|err| StoreError::InvalidInput(format!("malformed json ({err})")))?;
    decode_books_value(value).map_err(|err| {
        let message = match err {
            CodecError::NotAnArray => "expected an array of books".to_string(),
            CodecError::Json(err) => format!("invalid book record ({err})"),
        };
        StoreError::InvalidInput(message)
    })
}

fn validate_collection(books: &[Book]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(books.len());
    for book in books {
        book.validate()?;
        if !seen.insert(book.id) {
            return Err(BookValidationError::DuplicateId(book.id).into());
        }
    }
    Ok(())
}

fn finish<T: Summary>(op: StoreOp, started_at: Instant, result: StoreResult<T>) -> Envelope<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(data) => {
            info!(
                "event={} module=store status=ok duration_ms={duration_ms} {}",
                op.event(),
                data.summary()
            );
            Envelope::success(data, op.success_message())
        }
        Err(err) => {
            if err.is_persistence() {
                error!(
                    "event={} module=store status=error duration_ms={duration_ms} error_code={} error={err}",
                    op.event(),
                    err.code()
                );
            } else {
                warn!(
                    "event={} module=store status=rejected duration_ms={duration_ms} error_code={} error={err}",
                    op.event(),
                    err.code()
                );
            }
            Envelope::failure(op.failure_message(&err))
        }
    }
}

/// Metadata-only description of an operation result for log lines.
trait Summary {
    fn summary(&self) -> String;
}

impl Summary for Book {
    fn summary(&self) -> String {
        format!("book_id={}", self.id)
    }
}

impl Summary for Vec<Book> {
    fn summary(&self) -> String {
        format!("count={}", self.len())
    }
}

impl Summary for () {
    fn summary(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreError, StoreOp};
    use crate::model::book::BookValidationError;
    use crate::storage::StorageError;
    use uuid::Uuid;

    #[test]
    fn not_found_messages_depend_on_operation() {
        let err = StoreError::NotFound(Uuid::new_v4());
        assert_eq!(
            StoreOp::FetchOne.failure_message(&err),
            "Sorry, couldn't find book"
        );
        assert_eq!(StoreOp::Update.failure_message(&err), "Unable to find book");
        assert_eq!(
            StoreOp::Delete.failure_message(&err),
            "Sorry, unable to delete book"
        );
    }

    #[test]
    fn create_validation_message_names_the_field() {
        let err = StoreError::Validation(BookValidationError::MissingTitle);
        assert_eq!(
            StoreOp::Create.failure_message(&err),
            "Please pass the required values: title is required"
        );
    }

    #[test]
    fn storage_failures_are_persistence_errors() {
        let err = StoreError::Storage(StorageError::Backend("disk full".to_string()));
        assert!(err.is_persistence());
        assert_eq!(err.code(), "storage_failed");
        assert_eq!(
            StoreOp::Save.failure_message(&err),
            "Failed to save books to storage."
        );
    }
}
