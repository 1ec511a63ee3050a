//! Book domain model.
//!
//! # Responsibility
//! - Define the single persisted entity (`Book`) and its request/patch shapes.
//! - Own field-level validation shared by create, update and bulk save.
//!
//! # Invariants
//! - Every book is identified by a stable, non-nil `BookId`.
//! - `title`, `author` and `number_of_pages` are always present on a valid book.

pub mod book;
