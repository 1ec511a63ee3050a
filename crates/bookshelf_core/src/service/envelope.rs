//! Uniform result envelope returned by every store operation.
//!
//! # Invariants
//! - A success always carries data; a failure never does.
//! - Both variants carry a user-displayable message.
//! - Serialized form is `{ "data": ..., "success": bool, "message": "..." }`,
//!   with `data: null` on failure.

use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    Success { data: T, message: String },
    Failure { message: String },
}

impl<T> Envelope<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message } => message,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Converts into a `Result`, keeping the failure message as the error.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { message } => Err(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Self::Success { data, message } => Envelope::Success {
                data: f(data),
                message,
            },
            Self::Failure { message } => Envelope::Failure { message },
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 3)?;
        state.serialize_field("data", &self.data())?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}
