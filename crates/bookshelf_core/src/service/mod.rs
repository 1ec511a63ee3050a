//! Store-level use-case services.
//!
//! # Responsibility
//! - Expose collection CRUD to callers through a uniform result envelope.
//! - Keep callers decoupled from the storage backend and its encoding.

pub mod book_store;
pub mod envelope;
