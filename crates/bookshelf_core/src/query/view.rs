//! List-view state combining a snapshot with search and sort settings.

use crate::model::book::Book;
use crate::query::filter::filter_books;
use crate::query::sort::{sort_by_field, SortDirection, SortField};
use crate::service::book_store::BookStore;
use crate::storage::StoragePort;
use log::warn;

/// Snapshot plus the user's current search text and sort settings.
///
/// Defaults to sorting by title, ascending.
#[derive(Debug, Clone)]
pub struct BookListView {
    books: Vec<Book>,
    search_text: String,
    sort_field: SortField,
    sort_direction: SortDirection,
}

impl Default for BookListView {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            search_text: String::new(),
            sort_field: SortField::Title,
            sort_direction: SortDirection::Ascending,
        }
    }
}

impl BookListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads the snapshot from `store`.
    ///
    /// Returns `false` and keeps the previous snapshot when the fetch fails.
    pub fn refresh<S: StoragePort>(&mut self, store: &BookStore<S>) -> bool {
        match store.fetch_all().into_result() {
            Ok(books) => {
                self.books = books;
                true
            }
            Err(message) => {
                warn!("event=list_refresh module=query status=error message={message:?}");
                false
            }
        }
    }

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        self.search_text = search_text.into();
    }

    /// Selects the sort field by name. Unknown names are ignored and return `false`.
    pub fn set_sort_field(&mut self, field: &str) -> bool {
        match field.parse() {
            Ok(field) => {
                self.sort_field = field;
                true
            }
            Err(_) => false,
        }
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.toggled();
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Full snapshot, in stored order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Books to display: the snapshot filtered by search text, then sorted.
    pub fn visible(&self) -> Vec<Book> {
        let filtered = filter_books(&self.books, &self.search_text);
        sort_by_field(&filtered, self.sort_field, self.sort_direction)
    }
}
