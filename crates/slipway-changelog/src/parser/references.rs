//! Reference extraction
//!
//! Recognizes issue/PR/ticket mentions in four textual dialects. Matchers
//! run in descending specificity so a shorthand never claims a substring of
//! a fuller form; a span claimed by one matcher is skipped by later ones.
//! Extraction is pure text matching and knows nothing about the current
//! repository; text that fits no dialect is ignored, never an error.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::types::Reference;
use slipway_core::DEFAULT_HOST;

/// Optional action verb immediately preceding a reference
const ACTION: &str =
    r"(?:(?P<action>(?i:clos(?:es?|ed)|fix(?:es|ed)?|resolv(?:es?|ed)|merges?))\s+)?";

/// Ticket-system browse URL, e.g. `https://jira.example.com/browse/REPO-2001`
static TICKET_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{ACTION}(?P<raw>https?://(?P<host>[^/\s]+)/browse/(?P<key>[A-Z][A-Z0-9]*)-(?P<issue>\d+))"
    ))
    .expect("Invalid regex")
});

/// Source-forge issue or PR URL, e.g. `https://github.com/open/source/issues/13`
static FORGE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{ACTION}(?P<raw>https?://(?P<host>[^/\s]+)/(?P<owner>[\w.-]+)/(?P<repo>[\w.-]+)/(?:issues|pull)/(?P<issue>\d+))"
    ))
    .expect("Invalid regex")
});

/// Cross-repository shorthand, e.g. `riley/thing#13`
static CROSS_REPO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{ACTION}\b(?P<raw>(?P<owner>[\w.-]+)/(?P<repo>[\w.-]+)#(?P<issue>\d+))"
    ))
    .expect("Invalid regex")
});

/// Same-repository shorthand, e.g. `#42`
static SHORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{ACTION}(?P<raw>#(?P<issue>\d+))")).expect("Invalid regex"));

/// Any URL-looking token, recognized or not
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid regex"));

/// One dialect: a tagged pattern plus a constructor for its matches
struct Matcher {
    pattern: &'static LazyLock<Regex>,
    build: fn(&Captures<'_>) -> Reference,
}

/// Dialects in descending match specificity
static MATCHERS: [Matcher; 4] = [
    Matcher {
        pattern: &TICKET_URL_REGEX,
        build: build_ticket,
    },
    Matcher {
        pattern: &FORGE_URL_REGEX,
        build: build_forge_url,
    },
    Matcher {
        pattern: &CROSS_REPO_REGEX,
        build: build_cross_repo,
    },
    Matcher {
        pattern: &SHORT_REGEX,
        build: build_shorthand,
    },
];

/// Extract all references from free text, in document order.
pub fn extract_references(text: &str) -> Vec<Reference> {
    let masked = mask_unrecognized_urls(&mask_code(text));

    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut found: Vec<(usize, Reference)> = Vec::new();

    for matcher in &MATCHERS {
        for caps in matcher.pattern.captures_iter(&masked) {
            let Some(span) = caps.name("raw") else { continue };
            if claimed
                .iter()
                .any(|&(start, end)| span.start() < end && start < span.end())
            {
                continue;
            }
            claimed.push((span.start(), span.end()));
            found.push((span.start(), (matcher.build)(&caps)));
        }
    }

    found.sort_by_key(|&(start, _)| start);
    found.into_iter().map(|(_, reference)| reference).collect()
}

fn capture(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name).map_or_else(String::new, |m| m.as_str().to_string())
}

fn optional(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

fn build_ticket(caps: &Captures<'_>) -> Reference {
    Reference {
        raw: capture(caps, "raw"),
        owner: None,
        repository: None,
        issue: capture(caps, "issue"),
        prefix: format!("{}-", capture(caps, "key")),
        action: optional(caps, "action"),
        host: optional(caps, "host"),
        href: None,
    }
}

fn build_forge_url(caps: &Captures<'_>) -> Reference {
    Reference {
        raw: capture(caps, "raw"),
        owner: optional(caps, "owner"),
        repository: optional(caps, "repo"),
        issue: capture(caps, "issue"),
        prefix: "#".to_string(),
        action: optional(caps, "action"),
        host: optional(caps, "host").filter(|h| h != DEFAULT_HOST),
        href: None,
    }
}

fn build_cross_repo(caps: &Captures<'_>) -> Reference {
    Reference {
        raw: capture(caps, "raw"),
        owner: optional(caps, "owner"),
        repository: optional(caps, "repo"),
        issue: capture(caps, "issue"),
        prefix: "#".to_string(),
        action: optional(caps, "action"),
        host: None,
        href: None,
    }
}

fn build_shorthand(caps: &Captures<'_>) -> Reference {
    let mut reference = Reference::shorthand(capture(caps, "issue"));
    reference.action = optional(caps, "action");
    reference
}

/// Blank out URL tokens that fit none of the URL dialects, so the
/// shorthand matchers cannot fire on a path segment or fragment like
/// `https://example.com/page#42`.
fn mask_unrecognized_urls(text: &str) -> String {
    let spans: Vec<(usize, usize)> = URL_REGEX
        .find_iter(text)
        .filter(|m| !TICKET_URL_REGEX.is_match(m.as_str()) && !FORGE_URL_REGEX.is_match(m.as_str()))
        .map(|m| (m.start(), m.end()))
        .collect();

    if spans.is_empty() {
        return text.to_string();
    }

    let mut masked = String::with_capacity(text.len());
    for (index, ch) in text.char_indices() {
        if spans.iter().any(|&(start, end)| index >= start && index < end) {
            push_blank(ch, &mut masked);
        } else {
            masked.push(ch);
        }
    }
    masked
}

/// Blank out fenced code blocks and inline code spans.
///
/// Replaced characters become spaces of the same byte width so match
/// offsets, and therefore document order, stay aligned with the input.
fn mask_code(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut in_fence = false;

    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            mask_line(line, &mut masked);
        } else if in_fence {
            mask_line(line, &mut masked);
        } else {
            mask_inline_spans(line, &mut masked);
        }
    }

    masked
}

fn mask_line(line: &str, out: &mut String) {
    for ch in line.chars() {
        if ch == '\n' {
            out.push('\n');
        } else {
            push_blank(ch, out);
        }
    }
}

fn mask_inline_spans(line: &str, out: &mut String) {
    let mut in_span = false;
    for ch in line.chars() {
        if ch == '`' {
            in_span = !in_span;
            out.push(' ');
        } else if in_span && ch != '\n' {
            push_blank(ch, out);
        } else {
            out.push(ch);
        }
    }
}

fn push_blank(ch: char, out: &mut String) {
    for _ in 0..ch.len_utf8() {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand() {
        let refs = extract_references("Stuff\n\nSee #42 for details");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "#42");
        assert_eq!(refs[0].issue, "42");
        assert_eq!(refs[0].prefix, "#");
        assert!(refs[0].owner.is_none());
        assert!(refs[0].repository.is_none());
        assert!(refs[0].action.is_none());
    }

    #[test]
    fn test_cross_repo_shorthand() {
        let refs = extract_references("Related to riley/thing#13");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "riley/thing#13");
        assert_eq!(refs[0].owner.as_deref(), Some("riley"));
        assert_eq!(refs[0].repository.as_deref(), Some("thing"));
        assert_eq!(refs[0].issue, "13");
        assert_eq!(refs[0].prefix, "#");
    }

    #[test]
    fn test_full_default_provider_url() {
        let refs = extract_references("See https://github.com/open/source/issues/13");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "https://github.com/open/source/issues/13");
        assert_eq!(refs[0].owner.as_deref(), Some("open"));
        assert_eq!(refs[0].repository.as_deref(), Some("source"));
        assert_eq!(refs[0].issue, "13");
        assert!(refs[0].host.is_none());
    }

    #[test]
    fn test_enterprise_url_keeps_host() {
        let refs = extract_references("https://github.example.com/some/thing/issues/72");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].host.as_deref(), Some("github.example.com"));
        assert_eq!(refs[0].owner.as_deref(), Some("some"));
        assert_eq!(refs[0].repository.as_deref(), Some("thing"));
        assert_eq!(refs[0].issue, "72");
    }

    #[test]
    fn test_pull_url() {
        let refs = extract_references("https://github.com/open/source/pull/7");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].issue, "7");
    }

    #[test]
    fn test_ticket_url() {
        let refs = extract_references("Jira https://jira.atlassian.com/browse/REPO-2001");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "https://jira.atlassian.com/browse/REPO-2001");
        assert_eq!(refs[0].issue, "2001");
        assert_eq!(refs[0].prefix, "REPO-");
        assert_eq!(refs[0].host.as_deref(), Some("jira.atlassian.com"));
        assert!(refs[0].owner.is_none());
    }

    #[test]
    fn test_action_verb_is_captured() {
        let refs = extract_references("Closes #42");
        assert_eq!(refs[0].action.as_deref(), Some("Closes"));
        assert_eq!(refs[0].raw, "#42");

        let refs = extract_references("fixed riley/thing#13");
        assert_eq!(refs[0].action.as_deref(), Some("fixed"));
    }

    #[test]
    fn test_unrecognized_verb_leaves_action_empty() {
        let refs = extract_references("Regarding #42");
        assert_eq!(refs.len(), 1);
        assert!(refs[0].action.is_none());
    }

    #[test]
    fn test_shorthand_does_not_rematch_cross_repo() {
        let refs = extract_references("riley/thing#13 and #9");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].raw, "riley/thing#13");
        assert_eq!(refs[1].raw, "#9");
    }

    #[test]
    fn test_document_order() {
        let refs = extract_references(
            "#1 then https://github.com/a/b/issues/2 then x/y#3",
        );
        let raws: Vec<&str> = refs.iter().map(|r| r.raw.as_str()).collect();
        assert_eq!(
            raws,
            vec!["#1", "https://github.com/a/b/issues/2", "x/y#3"]
        );
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let refs = extract_references("#5 mentioned twice: #5");
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_code_blocks_are_skipped() {
        let refs = extract_references("Real #1\n\n```\nfake #2\n```\n\nand `#3` inline");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].issue, "1");
    }

    #[test]
    fn test_plain_text_is_ignored() {
        assert!(extract_references("nothing to see here, just a / and a # sign").is_empty());
        assert!(extract_references("https://example.com/not/an/issue/link/really").is_empty());
    }

    #[test]
    fn test_unrecognized_url_path_is_not_a_cross_repo_ref() {
        assert!(extract_references("https://example.com/foo/bar#12").is_empty());
    }

    #[test]
    fn test_unrecognized_url_fragment_is_not_a_shorthand() {
        assert!(extract_references("See https://example.com/page#42 for docs").is_empty());
    }

    #[test]
    fn test_references_next_to_unrecognized_urls_still_match() {
        let refs = extract_references("Docs at https://example.com/page#1, closes #42");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "#42");
        assert_eq!(refs[0].action.as_deref(), Some("closes"));
    }
}
