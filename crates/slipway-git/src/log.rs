//! Raw commit log reading

use std::path::Path;

use chrono::{TimeZone, Utc};
use git2::Sort;
use tracing::{debug, instrument};

use slipway_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::RawRecord;

impl GitRepo {
    /// Read the raw commit log, oldest first.
    ///
    /// When `since` is given (a sha or tag name), commits reachable from it
    /// are excluded. A repository with no commits yet yields an empty list,
    /// not an error. An unresolvable `since` is fatal.
    #[instrument(skip(self))]
    pub fn read_log(&self, since: Option<&str>) -> Result<Vec<RawRecord>> {
        let Some(head) = self.head_commit()? else {
            return Ok(Vec::new());
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(head.id())?;

        if let Some(since) = since {
            let commit = self
                .repo
                .revparse_single(since)
                .and_then(|obj| obj.peel_to_commit())
                .map_err(|_| GitError::UnknownRef(since.to_string()))?;
            revwalk.hide(commit.id())?;
        }

        let mut records = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            records.push(record_from_commit(&commit));
        }

        debug!(record_count = records.len(), "read commit log");
        Ok(records)
    }
}

/// Read the raw commit log of the repository at `path`, oldest first
pub fn read_log(path: &Path, since: Option<&str>) -> Result<Vec<RawRecord>> {
    GitRepo::open(path)?.read_log(since)
}

/// Convert a git2 Commit to a RawRecord
fn record_from_commit(commit: &git2::Commit<'_>) -> RawRecord {
    let author = commit.author();

    let date = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    RawRecord::new(
        commit.id().to_string(),
        commit.message().unwrap_or(""),
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        date,
    )
    .with_parents(commit.parent_ids().map(|id| id.to_string()).collect())
}
