use bookshelf_core::{
    filter_books, sort_books, sort_by_field, Book, BookListView, BookStore, MemoryStorage,
    NewBook, ReadingStatus, SortDirection, SortField, StoragePort, PLACEHOLDER_IMAGE_URL,
};
use std::borrow::Cow;

fn book(title: &str, author: &str, pages: u32, rating: u8) -> Book {
    let mut book = Book::from_request(
        NewBook::new(title, author, ReadingStatus::ToRead, pages),
        PLACEHOLDER_IMAGE_URL,
    )
    .unwrap();
    book.rating = rating;
    book
}

fn shelf() -> Vec<Book> {
    vec![
        book("Dune", "Frank Herbert", 412, 5),
        book("The Hobbit", "J. R. R. Tolkien", 310, 4),
        book("1984", "George Orwell", 328, 4),
    ]
}

fn titles(books: &[Book]) -> Vec<&str> {
    books.iter().map(|book| book.title.as_str()).collect()
}

#[test]
fn blank_search_returns_input_unchanged() {
    let books = shelf();

    for search in ["", "   ", "\t\n"] {
        let result = filter_books(&books, search);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(result.as_ptr(), books.as_ptr()));
        assert_eq!(result.as_ref(), books.as_slice());
    }
}

#[test]
fn search_matches_title_case_insensitively() {
    let books = vec![book("Dune", "Frank Herbert", 412, 0), book("1984", "George Orwell", 328, 0)];

    let result = filter_books(&books, "dun");
    assert_eq!(result.as_ref(), &books[..1]);
}

#[test]
fn search_matches_author() {
    let books = shelf();
    let result = filter_books(&books, "TOLKIEN");
    assert_eq!(titles(&result), vec!["The Hobbit"]);
}

#[test]
fn search_strips_whitespace_inside_the_text() {
    let books = shelf();
    let result = filter_books(&books, " du ne ");
    assert_eq!(titles(&result), vec!["Dune"]);
}

#[test]
fn search_lowercases_unicode() {
    let books = vec![book("Éloge de l'ombre", "Junichirō Tanizaki", 120, 0)];
    let result = filter_books(&books, "ÉLOGE");
    assert_eq!(result.len(), 1);
}

#[test]
fn search_without_matches_returns_empty() {
    let books = shelf();
    assert!(filter_books(&books, "asimov").is_empty());
}

#[test]
fn sort_by_title_ascending_and_descending() {
    let books = shelf();

    let ascending = sort_books(&books, "title", SortDirection::Ascending);
    assert_eq!(titles(&ascending), vec!["1984", "Dune", "The Hobbit"]);

    let descending = sort_books(&books, "title", SortDirection::Descending);
    assert_eq!(titles(&descending), vec!["The Hobbit", "Dune", "1984"]);

    assert_eq!(titles(&books), vec!["Dune", "The Hobbit", "1984"]);
}

#[test]
fn sort_field_name_is_case_insensitive() {
    let books = shelf();
    let sorted = sort_books(&books, "AUTHOR", SortDirection::Ascending);
    assert_eq!(titles(&sorted), vec!["Dune", "1984", "The Hobbit"]);
}

#[test]
fn sort_by_pages_is_numeric() {
    let books = vec![
        book("Long", "A", 1000, 0),
        book("Short", "B", 99, 0),
        book("Medium", "C", 250, 0),
    ];

    let sorted = sort_books(&books, "number_of_pages", SortDirection::Ascending);
    assert_eq!(titles(&sorted), vec!["Short", "Medium", "Long"]);
}

#[test]
fn unknown_sort_field_returns_input_unchanged() {
    let books = shelf();
    let result = sort_books(&books, "unknownField", SortDirection::Ascending);

    assert!(matches!(result, Cow::Borrowed(_)));
    assert!(std::ptr::eq(result.as_ptr(), books.as_ptr()));
}

#[test]
fn sorting_empty_input_returns_empty() {
    let result = sort_books(&[], "title", SortDirection::Descending);
    assert!(result.is_empty());
}

#[test]
fn rating_ties_keep_input_order_in_both_directions() {
    let books = vec![
        book("A", "x", 100, 3),
        book("B", "x", 100, 5),
        book("C", "x", 100, 3),
        book("D", "x", 100, 3),
    ];

    let ascending = sort_by_field(&books, SortField::Rating, SortDirection::Ascending);
    assert_eq!(titles(&ascending), vec!["A", "C", "D", "B"]);

    let descending = sort_by_field(&books, SortField::Rating, SortDirection::Descending);
    assert_eq!(titles(&descending), vec!["B", "A", "C", "D"]);
}

#[test]
fn list_view_filters_then_sorts_refreshed_snapshot() {
    let store = BookStore::new(MemoryStorage::new());
    assert!(store.save(&shelf()).is_success());

    let mut view = BookListView::new();
    assert_eq!(view.sort_field(), SortField::Title);
    assert_eq!(view.sort_direction(), SortDirection::Ascending);
    assert!(view.refresh(&store));
    assert_eq!(titles(&view.visible()), vec!["1984", "Dune", "The Hobbit"]);

    view.set_search_text("o");
    view.toggle_sort_direction();
    assert_eq!(titles(&view.visible()), vec!["The Hobbit", "1984"]);

    assert!(view.set_sort_field("Rating"));
    assert!(!view.set_sort_field("colour"));
    assert_eq!(view.sort_field(), SortField::Rating);
    view.set_search_text("");
    assert_eq!(titles(&view.visible()), vec!["Dune", "The Hobbit", "1984"]);
    assert_eq!(view.books().len(), 3);
}

#[test]
fn list_view_keeps_snapshot_when_refresh_fails() {
    let store = BookStore::new(MemoryStorage::new());
    store.save(&shelf());

    let mut view = BookListView::new();
    assert!(view.refresh(&store));

    store.storage().set(store.storage_key(), "{broken").unwrap();
    assert!(!view.refresh(&store));
    assert_eq!(view.books().len(), 3);
}
