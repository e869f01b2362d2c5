//! Reference resolution
//!
//! Rewrites extracted references into canonical hrefs and display prefixes
//! given the identity of the current repository. Kept separate from
//! extraction so the same parsed commits can be re-resolved against a
//! different repository descriptor without re-parsing commit text.

use tracing::instrument;

use crate::types::{Commit, Reference};
use slipway_core::{RepositoryDescriptor, ResolveError, DEFAULT_HOST};

/// Resolve every reference of every commit against the descriptor.
///
/// Fails fast when the descriptor is missing identity fields; no commit is
/// left partially resolved. Consumes the commits and returns new values.
#[instrument(skip(commits, descriptor), fields(commit_count = commits.len()))]
pub fn resolve_references(
    commits: Vec<Commit>,
    descriptor: &RepositoryDescriptor,
) -> Result<Vec<Commit>, ResolveError> {
    descriptor.validate()?;

    Ok(commits
        .into_iter()
        .map(|mut commit| {
            commit.references = commit
                .references
                .into_iter()
                .map(|reference| resolve_reference(reference, descriptor))
                .collect();
            commit
        })
        .collect())
}

fn resolve_reference(mut reference: Reference, descriptor: &RepositoryDescriptor) -> Reference {
    // Ticket references carry their key prefix (e.g. "REPO-") from extraction
    if reference.host.is_some() && reference.prefix.ends_with('-') {
        return resolve_ticket(reference, descriptor);
    }

    let same_repo = reference.is_shorthand()
        || (reference.owner.as_deref() == Some(descriptor.owner.as_str())
            && reference.repository.as_deref() == Some(descriptor.repository.as_str())
            && reference.host.as_deref().unwrap_or(DEFAULT_HOST) == descriptor.host());

    if same_repo {
        reference.prefix = "#".to_string();
        reference.href = Some(format!(
            "https://{}/{}/{}/issues/{}",
            descriptor.host(),
            descriptor.owner,
            descriptor.repository,
            reference.issue
        ));
        return reference;
    }

    let owner = reference.owner.clone().unwrap_or_default();
    let repository = reference.repository.clone().unwrap_or_default();

    match reference.host.as_deref() {
        None => {
            reference.prefix = format!("{owner}/{repository}#");
            reference.href = Some(format!(
                "https://{DEFAULT_HOST}/{owner}/{repository}/issues/{}",
                reference.issue
            ));
        }
        Some(host) => {
            reference.prefix = format!("{host}/{owner}/{repository}#");
            reference.href = Some(format!(
                "https://{host}/{owner}/{repository}/issues/{}",
                reference.issue
            ));
        }
    }

    reference
}

/// Resolve against a ticket system. A mapped host builds the href from the
/// configured template; an unmapped host keeps the raw browse URL.
fn resolve_ticket(mut reference: Reference, descriptor: &RepositoryDescriptor) -> Reference {
    let ticket = format!("{}{}", reference.prefix, reference.issue);

    reference.href = Some(
        reference
            .host
            .as_deref()
            .and_then(|host| descriptor.ticket_systems.get(host))
            .map_or_else(
                || reference.raw.clone(),
                |template| template.replace("{ticket}", &ticket),
            ),
    );

    reference
}
