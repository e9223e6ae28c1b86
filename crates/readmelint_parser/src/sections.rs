//! Section segmentation: splitting the document body on heading lines.

use std::collections::BTreeMap;

use crate::cursor::LineCursor;
use crate::model::{EXPECTED_SECTIONS, ParsedReadme};

/// True for a line that starts a new top-level section: `==` in either
/// position, or exactly `##`. A `###` line is nested content, not a section
/// boundary.
pub(crate) fn is_section_heading(trimmed: &str) -> bool {
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'=' && bytes[1] == b'=' {
        return true;
    }
    bytes.len() >= 3 && bytes[0] == b'#' && bytes[1] == b'#' && bytes[2] != b'#'
}

/// True for any Markdown heading line (`==` or `##` prefix). The short
/// description stops at every heading, nested ones included.
pub(crate) fn is_markdown_heading(trimmed: &str) -> bool {
    let bytes = trimmed.as_bytes();
    bytes.len() >= 2
        && ((bytes[0] == b'=' && bytes[1] == b'=') || (bytes[0] == b'#' && bytes[1] == b'#'))
}

/// Walks the remaining lines and assigns each block to a canonical section
/// key.
///
/// Every canonical key is pre-seeded empty so presence checks downstream are
/// well-defined; empty sections are filtered by the caller. An unrecognized
/// header keeps its title as an inline `<h3>` and lands in `other_notes`.
pub(crate) fn segment(cursor: &mut LineCursor<'_>) -> BTreeMap<String, String> {
    let mut sections: BTreeMap<String, String> = EXPECTED_SECTIONS
        .iter()
        .map(|key| (key.to_string(), String::new()))
        .collect();

    let mut current = String::new();
    let mut section_name = String::new();

    while let Some(line) = cursor.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            current.push('\n');
            continue;
        }

        if is_section_heading(trimmed) {
            if !section_name.is_empty() {
                sections
                    .entry(section_name.clone())
                    .or_default()
                    .push_str(current.trim());
            }

            current.clear();
            let title = line
                .trim_matches(|c| matches!(c, '#' | '=' | ' ' | '\t'))
                .to_string();
            let mut name = ParsedReadme::resolve_alias(&title.to_lowercase().replace(' ', "_"))
                .to_string();

            if !EXPECTED_SECTIONS.contains(&name.as_str()) {
                // Unknown section: keep the author's title visible in the
                // body and collect it under other_notes.
                current.push_str(&format!("<h3>{title}</h3>"));
                name = "other_notes".to_string();
            }
            section_name = name;
            continue;
        }

        current.push_str(line);
        current.push('\n');
    }

    if !section_name.is_empty() {
        sections
            .entry(section_name)
            .or_default()
            .push_str(current.trim());
    }

    sections
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn segment_from(raw: &str) -> BTreeMap<String, String> {
        let lines: Vec<String> = raw.lines().map(str::to_string).collect();
        let mut cursor = LineCursor::new(&lines);
        segment(&mut cursor)
    }

    #[rstest]
    #[case("== Description ==", true)]
    #[case("==Description==", true)]
    #[case("## Description", true)]
    #[case("##Description", true)]
    #[case("### Nested", false)]
    #[case("##", false)]
    #[case("# Title", false)]
    #[case("= Title =", false)]
    #[case("plain text", false)]
    fn section_heading_detection(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_section_heading(line), expected);
    }

    #[test]
    fn nested_heading_stops_short_description_but_not_sections() {
        assert!(is_markdown_heading("### Nested"));
        assert!(!is_section_heading("### Nested"));
    }

    #[test]
    fn splits_on_both_heading_styles() {
        let sections = segment_from("== Description ==\nBody one.\n## Changelog\n* 1.0\n");
        assert_eq!(sections["description"], "Body one.");
        assert_eq!(sections["changelog"], "* 1.0");
    }

    #[test]
    fn aliases_map_to_canonical_keys() {
        let sections = segment_from("== Frequently Asked Questions ==\nQ stuff\n");
        assert_eq!(sections["faq"], "Q stuff");
    }

    #[test]
    fn unknown_section_lands_in_other_notes_with_title() {
        let sections = segment_from("== Road Map ==\nSoon.\n");
        assert_eq!(sections["other_notes"], "<h3>Road Map</h3>Soon.");
    }

    #[test]
    fn blank_lines_are_preserved_inside_bodies() {
        let sections = segment_from("== Description ==\npara one\n\npara two\n");
        assert_eq!(sections["description"], "para one\n\npara two");
    }

    #[test]
    fn nested_headings_stay_in_the_body() {
        let sections = segment_from("== Description ==\n### Sub\ndetail\n");
        assert_eq!(sections["description"], "### Sub\ndetail");
    }

    #[test]
    fn all_expected_keys_are_preseeded() {
        let sections = segment_from("");
        for key in EXPECTED_SECTIONS {
            assert_eq!(sections[*key], "");
        }
    }

    #[test]
    fn repeated_sections_concatenate() {
        let sections = segment_from("== Description ==\nfirst\n== Description ==\nsecond\n");
        assert_eq!(sections["description"], "firstsecond");
    }
}
