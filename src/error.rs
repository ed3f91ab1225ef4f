//! Error Types
//!
//! A single error enum shared by the storage, ingestion, spelling and search
//! subsystems. Each variant maps to one failure domain so the request
//! boundary can decide what surfaces to the client and what degrades silently.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The ranked index or the ingestion queue could not be reached, or the
    /// round-trip exceeded its timeout.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The backend search collaborator failed. This is the only error that is
    /// allowed to fail a search request.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Reserved for callers that want to reject input. Nothing in the core
    /// raises it: all query strings are accepted permissively.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A dictionary resource could not be read at startup.
    #[error("dictionary error: {0}")]
    Dictionary(String),

    /// An index snapshot could not be written or restored.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

pub type QueryResult<T> = Result<T, QueryError>;

impl From<tokio::time::error::Elapsed> for QueryError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        QueryError::StorageUnavailable("store round-trip timed out".to_string())
    }
}
