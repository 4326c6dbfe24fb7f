//! Result type for lookups that degrade instead of failing.

use crate::error::ClientError;

/// Outcome of a tolerant call: a value, nothing stored, or no usable answer.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The service answered with a value
    Found(T),
    /// The service answered that there is nothing stored
    Empty,
    /// The service could not be reached or gave an unusable answer
    Unavailable(ClientError),
}

impl<T> Lookup<T> {
    /// Collapse to the value, treating empty and unavailable alike.
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Lookup::Unavailable(err) => Some(err),
            _ => None,
        }
    }
}
