//! Commit message parsing
//!
//! Decomposes one raw log record into a typed [`Commit`]: header
//! classification, body paragraphs, note blocks, references, and merge
//! detection. Parsing never fails; a header that does not follow the
//! conventional grammar produces an untyped commit instead of an error,
//! because historical commit messages are often non-conforming and must
//! still appear in the changelog.

mod merge;
mod notes;
mod references;

pub use references::extract_references;

use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;

use crate::types::Commit;
use slipway_git::RawRecord;

/// Regex for the conventional `type(scope): subject` header grammar
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[A-Za-z]+)(?:\((?P<scope>[^)]+)\))?: (?P<subject>.+)$")
        .expect("Invalid regex")
});

/// Parse an ordered sequence of raw records into commits.
///
/// Output length equals input length and order is preserved: commit *i*
/// derives from record *i*.
#[instrument(skip(records), fields(record_count = records.len()))]
pub fn parse_commits(records: &[RawRecord]) -> Vec<Commit> {
    records.iter().map(parse_commit).collect()
}

/// Parse a single raw record
pub fn parse_commit(record: &RawRecord) -> Commit {
    let mut lines = record.message.lines();
    let header = lines.next().unwrap_or("").to_string();

    let (commit_type, scope, subject) = match HEADER_REGEX.captures(&header) {
        Some(caps) => (
            caps.name("type").map(|m| m.as_str().to_string()),
            caps.name("scope").map(|m| m.as_str().to_string()),
            caps.name("subject")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        ),
        None => (None, None, header.trim().to_string()),
    };

    let paragraphs = split_paragraphs(lines);
    let (body, extracted_notes) = notes::extract_notes(paragraphs);
    let extracted_references = references::extract_references(&record.message);

    let mut commit = Commit {
        sha: record.sha.clone(),
        parent_sha: record.first_parent().map(str::to_string),
        commit_type,
        scope,
        subject,
        header,
        body,
        notes: extracted_notes,
        references: extracted_references,
    };

    merge::detect_merge(record, &mut commit);

    commit
}

/// Split message lines into paragraphs on blank-line boundaries.
///
/// Blank lines at the start or end do not produce paragraphs.
fn split_paragraphs<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}
