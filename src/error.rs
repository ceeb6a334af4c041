//! Error taxonomy for the movie query layer.
//!
//! Validation happens at the boundary before any SQL is issued; storage and
//! decoding failures are wrapped by the service into a [`FetchError`] that names
//! the operation and keeps the original cause reachable through `source()`.

use std::fmt;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Caller-supplied input failed a syntactic check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid movie ID")]
    InvalidMovieId(String),

    #[error("Invalid year")]
    InvalidYear(String),

    #[error("Invalid sort parameter")]
    InvalidSort(String),

    #[error("Invalid genre")]
    InvalidGenre,
}

/// The storage capability failed to execute a statement.
///
/// The display text is deliberately generic; driver detail stays in the source chain.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("database query failed")]
    Execute(#[source] BoxError),
}

impl QueryError {
    pub fn execute(err: impl Into<BoxError>) -> Self {
        Self::Execute(err.into())
    }
}

impl From<sqlx::Error> for QueryError {
    fn from(err: sqlx::Error) -> Self {
        Self::execute(err)
    }
}

/// A stored row could not be turned into a movie record.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Stored JSON text is malformed. This is a data-integrity defect and is never defaulted.
    #[error("column {field} holds malformed JSON")]
    Json {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("column {column} is not {expected}")]
    UnexpectedType {
        column: &'static str,
        expected: &'static str,
    },
}

/// Service operations, used to name failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListAll,
    GetById,
    ListByYear,
    ListByGenre,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListAll => "Failed to fetch movies",
            Operation::GetById => "Failed to fetch movie by ID",
            Operation::ListByYear => "Failed to fetch movies by year",
            Operation::ListByGenre => "Failed to fetch movies by genre",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListAll => "list_all",
            Operation::GetById => "get_by_id",
            Operation::ListByYear => "list_by_year",
            Operation::ListByGenre => "list_by_genre",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum FetchCause {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Service-level failure naming the operation that failed.
#[derive(Error, Debug)]
#[error("{}", .operation.failure_message())]
pub struct FetchError {
    pub operation: Operation,
    #[source]
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(operation: Operation, cause: impl Into<FetchCause>) -> Self {
        Self {
            operation,
            cause: cause.into(),
        }
    }

    pub fn is_transform(&self) -> bool {
        matches!(self.cause, FetchCause::Transform(_))
    }
}
