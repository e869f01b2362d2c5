//! Repository identity used for reference resolution
//!
//! Resolution needs to know which repository the changelog is being built
//! for so that references into the same repository collapse to short form.
//! The descriptor is passed explicitly; nothing reads ambient state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ResolveError;

/// Hostname of the default hosting provider.
pub const DEFAULT_HOST: &str = "github.com";

/// Identity of the repository a changelog run is resolving against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Owner (user or organization) of the current repository
    pub owner: String,
    /// Name of the current repository
    pub repository: String,
    /// Hosting provider hostname; `None` means the default provider
    #[serde(default)]
    pub host: Option<String>,
    /// Ticket-system hosts mapped to issue-URL templates.
    ///
    /// The template may contain `{ticket}`, replaced with the full ticket
    /// key (e.g. `REPO-2001`).
    #[serde(default)]
    pub ticket_systems: HashMap<String, String>,
}

impl RepositoryDescriptor {
    /// Create a descriptor for `owner/repository` on the default provider
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            host: None,
            ticket_systems: HashMap::new(),
        }
    }

    /// Set a non-default hosting provider (e.g. an enterprise instance)
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Register a ticket-system host with its issue-URL template
    pub fn with_ticket_system(
        mut self,
        host: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.ticket_systems.insert(host.into(), template.into());
        self
    }

    /// Hostname of the current repository's provider
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Check that the identity fields required for resolution are present
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.owner.is_empty() {
            return Err(ResolveError::MissingField("owner"));
        }
        if self.repository.is_empty() {
            return Err(ResolveError::MissingField("repository"));
        }
        Ok(())
    }

    /// Build a descriptor from a manifest `repository` field.
    ///
    /// Accepts `owner/repo` shorthand, `https://host/owner/repo(.git)` URLs
    /// and `git@host:owner/repo.git` SSH forms.
    pub fn from_manifest_field(field: &str) -> Result<Self, ResolveError> {
        let unparseable = || ResolveError::UnparseableRepository(field.to_string());

        if let Some(rest) = field.strip_prefix("git@") {
            let (host, path) = rest.split_once(':').ok_or_else(unparseable)?;
            let (owner, repo) = split_owner_repo(path).ok_or_else(unparseable)?;
            let descriptor = Self::new(owner, repo);
            return Ok(if host == DEFAULT_HOST {
                descriptor
            } else {
                descriptor.with_host(host)
            });
        }

        if field.contains("://") {
            let url = Url::parse(field).map_err(|_| unparseable())?;
            let host = url.host_str().ok_or_else(unparseable)?.to_string();
            let (owner, repo) =
                split_owner_repo(url.path().trim_start_matches('/')).ok_or_else(unparseable)?;
            let descriptor = Self::new(owner, repo);
            return Ok(if host == DEFAULT_HOST {
                descriptor
            } else {
                descriptor.with_host(host)
            });
        }

        let (owner, repo) = split_owner_repo(field).ok_or_else(unparseable)?;
        Ok(Self::new(owner, repo))
    }
}

/// Split an `owner/repo` path, stripping a trailing `.git`
fn split_owner_repo(path: &str) -> Option<(&str, &str)> {
    let path = path.trim_end_matches('/');
    let (owner, repo) = path.split_once('/')?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}
