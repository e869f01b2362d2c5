//! Error types for Slipway

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SlipwayError
pub type Result<T> = std::result::Result<T, SlipwayError>;

/// Main error type for Slipway operations
#[derive(Debug, Error)]
pub enum SlipwayError {
    /// Git log reading errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Reference resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Errors from reading the raw commit log.
///
/// These are fatal to a changelog run: a failed log read aborts the whole
/// operation with no partial parsing and no retry.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// The since-ref (sha or tag) does not resolve to a commit
    #[error("Unknown revision or tag: {0}")]
    UnknownRef(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Errors from an unusable repository descriptor.
///
/// Resolution fails fast on these; references are never left half resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Required identity field is empty or missing
    #[error("Repository descriptor is missing required field: {0}")]
    MissingField(&'static str),

    /// Manifest repository field could not be parsed
    #[error("Cannot determine owner/repository from '{0}'")]
    UnparseableRepository(String),
}

impl SlipwayError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
