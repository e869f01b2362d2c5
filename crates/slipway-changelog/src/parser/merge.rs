//! Merge commit detection
//!
//! A commit with two or more parents and a synthetic merge subject is a
//! pull-request merge: its type becomes `pr` and it carries a "Merges"
//! reference to the PR number from the subject line.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Commit, Reference};
use slipway_git::RawRecord;

/// Regex for the synthetic merge subject line
static MERGE_SUBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Merge pull request #(?P<issue>\d+) from \S+").expect("Invalid regex")
});

/// Classify merge commits, overriding the header grammar's result.
pub(crate) fn detect_merge(record: &RawRecord, commit: &mut Commit) {
    if record.parent_shas.len() < 2 {
        return;
    }
    let Some(caps) = MERGE_SUBJECT_REGEX.captures(&commit.header) else {
        return;
    };
    let Some(issue) = caps.name("issue").map(|m| m.as_str().to_string()) else {
        return;
    };

    commit.commit_type = Some("pr".to_string());

    // The extractor has usually already seen `#N` in the header; promote
    // that reference instead of inserting a duplicate.
    if let Some(existing) = commit
        .references
        .iter_mut()
        .find(|r| r.is_shorthand() && r.issue == issue)
    {
        existing.action = Some("Merges".to_string());
    } else {
        commit
            .references
            .insert(0, Reference::shorthand(issue).with_action("Merges"));
    }
}
