//! In-memory query engine over collection snapshots.
//!
//! # Responsibility
//! - Narrow a snapshot by free-text search.
//! - Order a snapshot by a named field and direction.
//! - Hold list-view state (search text, sort settings) between refreshes.
//!
//! # Invariants
//! - Filtering and sorting never touch storage.
//! - Identity cases (blank search, unknown sort field) borrow the input as-is.

pub mod filter;
pub mod sort;
pub mod view;
