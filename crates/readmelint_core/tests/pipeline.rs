//! End-to-end tests for the parse -> render -> validate pipeline.

use pretty_assertions::assert_eq;

use readmelint_core::{ParsedReadme, ReadmeMarkdown, ReadmeParser, Validator};

fn parse(content: &str) -> ParsedReadme {
    let renderer = ReadmeMarkdown::new();
    ReadmeParser::new(&renderer).parse(content)
}

#[test]
fn minimal_readme_parses_and_renders() {
    let readme =
        parse("=== My Plugin ===\nTags: foo, bar, wordpress\n\nShort desc.\n\n== Description ==\nHello.");

    assert_eq!(readme.name, "My Plugin");
    assert_eq!(readme.tags, vec!["foo", "bar"]);
    assert!(readme.sections["description"].contains("Hello."));
    assert_eq!(readme.short_description, "Short desc.");
}

#[test]
fn parse_never_panics_on_hostile_input() {
    let inputs: Vec<String> = vec![
        String::new(),
        "\u{FEFF}".to_string(),
        "=== ===\n== ==\n= =\n".to_string(),
        ":::::\n:::::\n".to_string(),
        "== FAQ ==\n**\n**\n**".to_string(),
        "`".repeat(100),
        "=".repeat(1000),
        "a\n".repeat(500),
        "\0\0\0".to_string(),
    ];

    for input in inputs {
        let _ = parse(&input);
    }
}

#[test]
fn legacy_backtick_code_keeps_literal_characters() {
    let readme = parse(
        "=== P ===\n\nS.\n\n== Description ==\nUse this:\n\n`add_action( 'init' );`\n",
    );
    let description = &readme.sections["description"];
    assert!(description.contains("<pre><code>"), "{description}");
    assert!(description.contains("add_action( 'init' );"), "{description}");
}

#[test]
fn faq_bold_entries_become_a_definition_list() {
    let readme = parse("=== P ===\n\nS.\n\n== Frequently Asked Questions ==\n**Q1**\nA1\n\n**Q2**\nA2\n");

    let questions: Vec<&str> = readme.faq.iter().map(|(q, _)| q.as_str()).collect();
    assert_eq!(questions, vec!["Q1", "Q2"]);

    let body = &readme.sections["faq"];
    assert!(body.contains("<dl>"), "{body}");
    assert!(body.contains("<dt id='q1'><h3>Q1</h3></dt>"), "{body}");
    assert!(body.contains("<dd><p>A2</p></dd>"), "{body}");
}

#[test]
fn upgrade_notice_is_extracted_and_rendered() {
    let readme = parse(
        "=== P ===\n\nS.\n\n== Upgrade Notice ==\n= 2.0 =\nBig rewrite, back up first.\n= 1.5 =\nBug fixes.\n",
    );

    assert!(!readme.sections.contains_key("upgrade_notice"));
    assert_eq!(readme.upgrade_notice.len(), 2);
    assert_eq!(readme.upgrade_notice[0].0, "2.0");
    assert!(readme.upgrade_notice[0].1.contains("Big rewrite"));
    assert_eq!(readme.upgrade_notice[1].0, "1.5");
}

#[test]
fn screenshots_map_is_one_based_and_sequential() {
    let readme = parse(
        "=== P ===\n\nS.\n\n== Screenshots ==\n1. Admin view\n2. Settings page\n3. Widget\n",
    );

    assert!(!readme.sections.contains_key("screenshots"));
    assert_eq!(
        readme.screenshots,
        vec![
            (1, "Admin view".to_string()),
            (2, "Settings page".to_string()),
            (3, "Widget".to_string())
        ]
    );
}

#[test]
fn other_notes_never_survives_as_a_section() {
    let readme = parse(
        "=== P ===\n\nS.\n\n== Description ==\nMain.\n\n== Credits ==\nThanks all.\n\n== Road Map ==\nSoon.\n",
    );

    assert!(!readme.sections.contains_key("other_notes"));
    let description = &readme.sections["description"];
    assert!(description.contains("<h3>Credits</h3>"), "{description}");
    assert!(description.contains("<h3>Road Map</h3>"), "{description}");
    assert!(description.contains("Thanks all."), "{description}");
}

#[test]
fn equals_subheadings_render_as_h4() {
    let readme = parse("=== P ===\n\nS.\n\n== Changelog ==\n= 1.0 =\n* First release\n");
    let changelog = &readme.sections["changelog"];
    assert!(changelog.contains("<h4>1.0</h4>"), "{changelog}");
    assert!(changelog.contains("<li>First release</li>"), "{changelog}");
}

#[test]
fn short_description_truncation_law() {
    // 150 chars or fewer: stored unmodified.
    let short = parse("=== P ===\n\nBrief enough.\n");
    assert_eq!(short.short_description, "Brief enough.");
    assert!(short.short_description_length <= 150);

    // Over the limit: decoded length of the stored value stays within
    // limit + ellipsis marker.
    let long = parse(&format!("=== P ===\n\n{}\n", "longwords ".repeat(30)));
    assert!(long.short_description_length > 150);
    let decoded = html_escape::decode_html_entities(&long.short_description);
    assert!(decoded.chars().count() <= 150 + " \u{2026}".chars().count());
}

#[test]
fn markdown_in_short_description_is_stripped() {
    // The blank line ends the header scan; without it, the URL's colon
    // makes the description line read as an unrecognized header.
    let readme = parse(
        "=== P ===\nContributors: alice\n\nA **bold** short [description](https://example.com).\n",
    );
    assert_eq!(readme.short_description, "A bold short description.");
}

#[test]
fn valid_readme_produces_no_errors() {
    let result = Validator::new().validate_content(
        "=== P ===\nContributors: alice\nStable tag: trunk\nTested up to: 5.0\n\nShort.\n",
    );
    assert!(!result.has_errors());
}

#[test]
fn missing_stable_tag_warning_and_empty_field() {
    let content = "=== P ===\nContributors: alice\nTested up to: 5.0\n\nShort.\n";
    let readme = parse(content);
    assert_eq!(readme.stable_tag, "");

    let result = Validator::new().validate_content(content);
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.contains("`Stable tag` field is missing"))
    );
}

#[test]
fn faq_and_upgrade_notice_are_exclusive_with_sections() {
    let readme = parse(
        "=== P ===\n\nS.\n\n== FAQ ==\n**Q**\nA\n\n== Upgrade Notice ==\n= 1.0 =\nNote.\n",
    );
    assert!(!readme.sections.contains_key("upgrade_notice"));
    // The FAQ section is only the reassembled definition list.
    assert!(readme.sections["faq"].starts_with("<dl>"), "{}", readme.sections["faq"]);
}

#[test]
fn utf16_readme_round_trips() {
    let text = "=== Wide Plugin ===\nTags: foo\n\nShort.\n";
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    let renderer = ReadmeMarkdown::new();
    let readme = ReadmeParser::new(&renderer).parse_bytes(&bytes);
    assert_eq!(readme.name, "Wide Plugin");
    assert_eq!(readme.tags, vec!["foo"]);
}
