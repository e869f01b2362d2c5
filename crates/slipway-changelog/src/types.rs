//! Parsed commit types

use serde::{Deserialize, Serialize};

/// A parsed view of one raw log record.
///
/// Every raw record produces exactly one `Commit`, malformed headers
/// included: a header that does not follow the conventional grammar keeps
/// `commit_type = None` with the whole first line preserved in `header`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit sha
    pub sha: String,
    /// First parent sha; `None` for the repository's first commit
    pub parent_sha: Option<String>,
    /// Conventional commit type (feat, fix, pr, ...); `None` when the
    /// header does not match the grammar
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Scope from the header, if present
    pub scope: Option<String>,
    /// Subject text after type/scope, or the whole header when untyped
    pub subject: String,
    /// Raw first line of the message, always populated
    pub header: String,
    /// Body paragraphs, note blocks excluded
    pub body: Vec<String>,
    /// Titled note blocks (e.g. breaking-change announcements)
    pub notes: Vec<Note>,
    /// Issue/PR references in document order
    pub references: Vec<Reference>,
}

/// A titled callout block in a commit message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Title in caps, e.g. "BREAKING CHANGE"
    pub title: String,
    /// Remaining block text, paragraph breaks preserved
    pub text: String,
}

/// A parsed mention of an issue, pull request, or ticket.
///
/// Extraction fills the identity fields from the matched text alone;
/// `href` stays `None` and `prefix` holds the shorthand marker until the
/// resolver rewrites both against a repository descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Verbatim matched text
    pub raw: String,
    /// Owner, `None` for same-repository shorthand
    pub owner: Option<String>,
    /// Repository name, `None` for same-repository shorthand
    pub repository: Option<String>,
    /// Issue or ticket number
    pub issue: String,
    /// Shorthand marker as found; overwritten with the display prefix by
    /// the resolver. Ticket references carry their key prefix (`REPO-`)
    /// from extraction on.
    pub prefix: String,
    /// Action verb preceding the reference ("Closes", "Merges", ...)
    pub action: Option<String>,
    /// Hostname for references off the default provider
    pub host: Option<String>,
    /// Absolute URL, filled by the resolver
    pub href: Option<String>,
}

impl Reference {
    /// Create a same-repository shorthand reference
    pub fn shorthand(issue: impl Into<String>) -> Self {
        let issue = issue.into();
        Self {
            raw: format!("#{issue}"),
            owner: None,
            repository: None,
            issue,
            prefix: "#".to_string(),
            action: None,
            host: None,
            href: None,
        }
    }

    /// Set the action verb
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Whether this reference points into the same repository (no owner,
    /// repository, or host of its own)
    pub fn is_shorthand(&self) -> bool {
        self.owner.is_none() && self.repository.is_none() && self.host.is_none()
    }
}
