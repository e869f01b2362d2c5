//! Raw log record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw entry from the commit log, oldest-first in a run.
///
/// This is the unparsed view: the full message text is carried verbatim and
/// decomposed later by the changelog parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Full commit sha (40 hex characters)
    pub sha: String,
    /// All parent shas in order; empty for a root commit, two or more for
    /// a merge commit
    pub parent_shas: Vec<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub date: DateTime<Utc>,
    /// Full commit message, header and body included
    pub message: String,
}

impl RawRecord {
    /// Create a new record
    pub fn new(
        sha: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            sha: sha.into(),
            parent_shas: Vec::new(),
            author: author.into(),
            author_email: author_email.into(),
            date,
            message: message.into(),
        }
    }

    /// Set the parent shas
    pub fn with_parents(mut self, parent_shas: Vec<String>) -> Self {
        self.parent_shas = parent_shas;
        self
    }

    /// First parent sha, if any
    pub fn first_parent(&self) -> Option<&str> {
        self.parent_shas.first().map(String::as_str)
    }
}
