//! Error types for the course schedule subsystem.

use std::fmt;

use thiserror::Error;

/// Which part of the stored course data failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPart {
    /// The outer collection
    Collection,
    /// The record at the given index within the collection
    Record(usize),
}

impl fmt::Display for MalformedPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedPart::Collection => write!(f, "course collection"),
            MalformedPart::Record(index) => write!(f, "course record #{index}"),
        }
    }
}

/// Errors that can occur while projecting today's courses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// Stored data could not be parsed. No partial result is produced.
    #[error("Malformed {part}: {message}")]
    Malformed { part: MalformedPart, message: String },
}

impl ProjectionError {
    pub(crate) fn collection(message: impl Into<String>) -> Self {
        ProjectionError::Malformed {
            part: MalformedPart::Collection,
            message: message.into(),
        }
    }

    pub(crate) fn record(index: usize, message: impl Into<String>) -> Self {
        ProjectionError::Malformed {
            part: MalformedPart::Record(index),
            message: message.into(),
        }
    }

    /// Returns the part of the data that failed to parse.
    pub fn part(&self) -> MalformedPart {
        match self {
            ProjectionError::Malformed { part, .. } => *part,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeekdayError {
    #[error("Weekday code {code} is out of range (expected 1-7)")]
    OutOfRange { code: u8 },
}
