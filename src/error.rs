//! The error type shared by every fallible operation of this crate

use chrono::NaiveDate;

use crate::completion::CompletionId;
use crate::task::TaskId;

/// An error returned by sessions and task stores.
///
/// Callers usually only care about the family a variant belongs to, which the
/// [`is_validation`](Error::is_validation), [`is_not_found`](Error::is_not_found)
/// and [`is_persistence`](Error::is_persistence) predicates expose.
/// Validation errors are raised before any store call happens; persistence
/// errors mean the store call failed and the in-memory state was left as it was.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task name was empty, or contained only whitespace
    #[error("a task needs a name with at least one visible character")]
    EmptyName,

    /// A task was saved with no recurrence day at all
    #[error("a task needs at least one weekday to repeat on")]
    EmptyRecurrence,

    /// A weekday name did not match any of the seven canonical names
    #[error("unknown weekday name {0:?} (expected \"Sunday\" through \"Saturday\")")]
    UnknownWeekday(String),

    /// A toggle targeted a day the session never loaded completions for
    #[error("{date} is outside the loaded day window ({first} to {last})")]
    OutsideWindow {
        date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },

    /// A completion can only be recorded in real time, on the current day
    #[error("completions are recorded for the current day ({today}), cannot mark {date}")]
    NotToday { date: NaiveDate, today: NaiveDate },

    /// A backend base URL could not be parsed
    #[error("cannot use {url:?} as a backend base URL: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// An operation referenced a task this source does not know
    #[error("no task with id {0}")]
    TaskNotFound(TaskId),

    /// An operation referenced a completion this source does not know
    #[error("no completion with id {0}")]
    CompletionNotFound(CompletionId),

    /// The underlying store failed. Nothing was changed in memory
    #[error("unable to {operation} {entity}: {source}")]
    Persistence {
        operation: &'static str,
        entity: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Wrap a store failure, keeping track of what was attempted and on what
    pub fn persistence<T, E>(operation: &'static str, entity: T, source: E) -> Self
    where
        T: ToString,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Persistence {
            operation,
            entity: entity.to_string(),
            source: source.into(),
        }
    }

    /// Whether this error was caused by a malformed request.
    /// These are detected before anything is persisted
    pub fn is_validation(&self) -> bool {
        match self {
            Error::EmptyName
            | Error::EmptyRecurrence
            | Error::UnknownWeekday(_)
            | Error::OutsideWindow { .. }
            | Error::NotToday { .. }
            | Error::InvalidBaseUrl { .. } => true,
            _ => false,
        }
    }

    /// Whether this error was caused by referencing an entity that does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::TaskNotFound(_) | Error::CompletionNotFound(_) => true,
            _ => false,
        }
    }

    /// Whether this error was forwarded from the underlying store
    pub fn is_persistence(&self) -> bool {
        match self {
            Error::Persistence { .. } => true,
            _ => false,
        }
    }
}
