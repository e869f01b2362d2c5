//! Note block extraction
//!
//! A paragraph whose first line opens with an ALL-CAPS title (e.g.
//! `BREAKING CHANGE: ...`) starts a note; following paragraphs belong to
//! that note until another title or the end of the body.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Note;

/// Regex for a note title on the first line of a paragraph
static NOTE_TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>[A-Z][A-Z0-9-]+(?: [A-Z][A-Z0-9-]+)*)(?P<sep>:[ \t]*| )(?P<rest>.*)$")
        .expect("Invalid regex")
});

/// Split paragraphs into plain body and note blocks.
///
/// Note paragraphs (title and continuations) are consumed out of the body;
/// paragraph breaks inside a note are preserved as blank lines.
pub(crate) fn extract_notes(paragraphs: Vec<String>) -> (Vec<String>, Vec<Note>) {
    let mut body = Vec::new();
    let mut notes: Vec<Note> = Vec::new();
    let mut in_note = false;

    for paragraph in paragraphs {
        if let Some((title, text)) = match_note_title(&paragraph) {
            notes.push(Note { title, text });
            in_note = true;
        } else if in_note {
            if let Some(note) = notes.last_mut() {
                if !note.text.is_empty() {
                    note.text.push_str("\n\n");
                }
                note.text.push_str(&paragraph);
            }
        } else {
            body.push(paragraph);
        }
    }

    (body, notes)
}

/// Match a note title against the paragraph's first line.
///
/// A single-word title needs a colon separator; bare-space separation is
/// honored only for multi-word titles so that a paragraph starting with an
/// acronym does not become a note.
fn match_note_title(paragraph: &str) -> Option<(String, String)> {
    let (first_line, rest_lines) = match paragraph.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (paragraph, None),
    };

    let caps = NOTE_TITLE_REGEX.captures(first_line)?;
    let title = caps.name("title")?.as_str().to_string();
    let sep = caps.name("sep")?.as_str();
    if !sep.contains(':') && !title.contains(' ') {
        return None;
    }

    let mut text = caps.name("rest")?.as_str().to_string();
    if let Some(rest_lines) = rest_lines {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(rest_lines);
    }

    Some((title, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_breaking_change_note_spans_paragraphs() {
        let (body, notes) = extract_notes(paragraphs(&[
            "Some body text.",
            "BREAKING CHANGE: Users expecting only one file might run into problems",
            "It should be as easy as migrating the `1` to a `2`.",
        ]));

        assert_eq!(body, vec!["Some body text.".to_string()]);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "BREAKING CHANGE");
        assert_eq!(
            notes[0].text,
            "Users expecting only one file might run into problems\n\n\
             It should be as easy as migrating the `1` to a `2`."
        );
    }

    #[test]
    fn test_multiple_notes_in_document_order() {
        let (body, notes) = extract_notes(paragraphs(&[
            "BREAKING CHANGE: first",
            "DEPRECATED: second",
        ]));

        assert!(body.is_empty());
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "BREAKING CHANGE");
        assert_eq!(notes[0].text, "first");
        assert_eq!(notes[1].title, "DEPRECATED");
        assert_eq!(notes[1].text, "second");
    }

    #[test]
    fn test_multiline_title_paragraph() {
        let (_, notes) = extract_notes(paragraphs(&[
            "BREAKING CHANGE: first line\nsecond line",
        ]));
        assert_eq!(notes[0].text, "first line\nsecond line");
    }

    #[test]
    fn test_plain_paragraphs_stay_body() {
        let (body, notes) = extract_notes(paragraphs(&["just text", "more text"]));
        assert_eq!(body.len(), 2);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_single_caps_word_without_colon_is_not_a_note() {
        let (body, notes) = extract_notes(paragraphs(&["API changes are described below"]));
        assert_eq!(body.len(), 1);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_lowercase_title_is_not_a_note() {
        let (body, notes) = extract_notes(paragraphs(&["breaking change: nope"]));
        assert_eq!(body.len(), 1);
        assert!(notes.is_empty());
    }
}
