//! Error taxonomy shared by the benefits, report and cleanup pipeline.
//!
//! Every core operation returns [`Result<T>`]. The variants map one-to-one onto
//! the classes of failure a caller can act on:
//!
//! - **Validation**: a date bound or a required field could not be understood
//! - **Precondition**: the caller skipped a required step (cleanup without backup)
//! - **NotFound**: a referenced record does not exist
//! - **Serialization**: a collection could not be rendered for export
//! - **Storage**: the underlying database read or write failed
//!
//! Aggregations never produce an error for empty input; an empty window is a
//! valid zero result.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Unparseable or missing input.
    #[error("{0}")]
    Validation(String),

    /// The operation was refused because a caller-side step is missing.
    #[error("{0}")]
    Precondition(String),

    #[error("{0}")]
    NotFound(String),

    /// A collection could not be rendered to the exchange format.
    #[error("CSV generation failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of one collection inside a multi-collection delete.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionOutcome {
    pub collection: &'static str,
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(rusqlite::Error),

    /// A uniqueness or other constraint rejected the write.
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("storage worker failed: {0}")]
    Worker(String),

    #[error("stored value could not be decoded: {0}")]
    Decode(String),

    /// Some deletes of a cleanup went through and others did not. Nothing is
    /// rolled back.
    #[error("cleanup partially applied; completed: [{}]; failed: [{}]", join_outcomes(.completed), join_outcomes(.failed))]
    PartialCleanup {
        completed: Vec<CollectionOutcome>,
        failed: Vec<CollectionOutcome>,
    },
}

fn join_outcomes(outcomes: &[CollectionOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| format!("{} ({})", o.collection, o.detail))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StorageError::Constraint(e.to_string()),
            _ => StorageError::Sqlite(e),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Storage(e.into())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Storage(StorageError::Worker(e.to_string()))
    }
}

impl Error {
    /// True for failures caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Precondition(_) | Error::Storage(StorageError::Constraint(_))
        )
    }
}
