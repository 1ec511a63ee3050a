//! JSON codec for the persisted collection.
//!
//! The collection is stored as one JSON array of book objects.

use crate::model::book::Book;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CodecError {
    /// Input parsed, but is not a JSON array.
    NotAnArray,
    Json(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnArray => write!(f, "expected an array of books"),
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotAnArray => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

pub fn encode_books(books: &[Book]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(books)?)
}

pub fn decode_books(text: &str) -> Result<Vec<Book>, CodecError> {
    decode_books_value(serde_json::from_str(text)?)
}

/// Decodes an already-parsed value, rejecting anything but an array.
pub fn decode_books_value(value: Value) -> Result<Vec<Book>, CodecError> {
    if !value.is_array() {
        return Err(CodecError::NotAnArray);
    }
    Ok(serde_json::from_value(value)?)
}
