//! The readme parse pipeline.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use tracing::debug;

use crate::cursor::LineCursor;
use crate::model::ParsedReadme;
use crate::render::MarkdownRenderer;
use crate::sanitize;
use crate::{headers, lines, sections, subsections};

/// Rendered `<li>` items of the screenshots section.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<li>(.*?)</li>").unwrap());

/// Everything except unreserved URL characters, like PHP's `rawurlencode`.
const ANCHOR_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const SHORT_DESCRIPTION_LIMIT: usize = 150;

/// Tunables for a parse run.
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    /// The current WordPress stable branch (e.g. `"6.0"`), used to reject
    /// implausible `Tested up to` values. `None` skips the plausibility
    /// check.
    pub stable_branch: Option<String>,
}

/// Parses readme text into a [`ParsedReadme`].
///
/// The parser is a pure transformation: it performs no I/O, holds no state
/// between calls, and never fails. Malformed input degrades to empty fields
/// plus warning flags.
pub struct ReadmeParser<'a> {
    renderer: &'a dyn MarkdownRenderer,
    options: ParserOptions,
}

impl<'a> ReadmeParser<'a> {
    pub fn new(renderer: &'a dyn MarkdownRenderer) -> Self {
        Self::with_options(renderer, ParserOptions::default())
    }

    pub fn with_options(renderer: &'a dyn MarkdownRenderer, options: ParserOptions) -> Self {
        Self { renderer, options }
    }

    /// Parses readme contents.
    pub fn parse(&self, content: &str) -> ParsedReadme {
        self.parse_bytes(content.as_bytes())
    }

    /// Parses raw readme bytes, tolerating BOMs, UTF-16, and invalid UTF-8.
    pub fn parse_bytes(&self, content: &[u8]) -> ParsedReadme {
        let lines = lines::normalize(content);
        self.parse_lines(&lines)
    }

    fn parse_lines(&self, lines: &[String]) -> ParsedReadme {
        let mut readme = ParsedReadme::default();
        let mut cursor = LineCursor::new(lines);

        headers::extract(&mut cursor, &self.options, &mut readme);
        debug!(name = %readme.name, "parsed header block");

        readme.short_description = capture_short_description(&mut cursor);

        let mut sections = sections::segment(&mut cursor);
        sections.retain(|_, body| !body.is_empty());
        debug!(sections = sections.len(), "segmented body");

        // The short description stands in for a missing description section.
        if sections
            .get("description")
            .is_none_or(|body| body.is_empty())
        {
            sections.insert("description".to_string(), readme.short_description.clone());
        }

        // Other Notes is display-only: its content belongs at the end of the
        // description.
        if let Some(notes) = sections.remove("other_notes") {
            let description = sections.entry("description".to_string()).or_default();
            description.push('\n');
            description.push_str(&notes);
        }

        if let Some(body) = sections.remove("upgrade_notice") {
            readme.upgrade_notice = subsections::parse_section(&body)
                .into_iter()
                .map(|(version, notice)| (version, sanitize::sanitize_text(&notice)))
                .collect();
        }

        if let Some(body) = sections.remove("faq") {
            readme.faq = subsections::parse_section(&body);
            sections.insert("faq".to_string(), String::new());
        }

        // Markdownify.
        for body in sections.values_mut() {
            *body = self.renderer.render(body);
        }
        for (_, notice) in readme.upgrade_notice.iter_mut() {
            *notice = self.renderer.render(notice);
        }
        for (_, answer) in readme.faq.iter_mut() {
            *answer = self.renderer.render(answer);
        }

        self.finish_short_description(&mut readme, &sections);
        readme.sections = sections;

        self.extract_screenshots(&mut readme);
        self.reassemble_faq(&mut readme);

        for body in readme.sections.values_mut() {
            *body = body.trim().to_string();
        }
        readme.sections.retain(|_, body| !body.is_empty());

        readme
    }

    /// Renders the short description and applies the length limit, keeping
    /// the pre-truncation length for the validator.
    fn finish_short_description(
        &self,
        readme: &mut ParsedReadme,
        sections: &std::collections::BTreeMap<String, String>,
    ) {
        if readme.short_description.is_empty() {
            if let Some(description) = sections.get("description") {
                if let Some(first) = description.split('\n').find(|line| !line.is_empty()) {
                    readme.short_description = first.to_string();
                }
            }
        }

        let sanitized = sanitize::sanitize_text(&readme.short_description);
        let rendered = self.renderer.render(&sanitized);
        let plain = sanitize::sanitize_text(&rendered);

        readme.short_description_length = plain.chars().count();
        readme.short_description = sanitize::trim_length(&plain, SHORT_DESCRIPTION_LIMIT);
    }

    /// Pulls rendered `<li>` captions out of the screenshots section into a
    /// 1-based sequential mapping.
    fn extract_screenshots(&self, readme: &mut ParsedReadme) {
        let Some(rendered) = readme.sections.remove("screenshots") else {
            return;
        };
        for (index, capture) in LIST_ITEM.captures_iter(&rendered).enumerate() {
            readme.screenshots.push((index + 1, capture[1].trim().to_string()));
        }
    }

    /// Rebuilds the FAQ section body as a definition list, with freeform
    /// lead-in text first.
    fn reassemble_faq(&self, readme: &mut ParsedReadme) {
        if readme.faq.is_empty() {
            return;
        }

        let mut body = readme.sections.remove("faq").unwrap_or_default();

        if let Some(position) = readme.faq.iter().position(|(question, _)| question.is_empty()) {
            let (_, freeform) = readme.faq.remove(position);
            body.push_str(&freeform);
        }

        if !readme.faq.is_empty() {
            body.push_str("\n<dl>\n");
            for (question, answer) in &readme.faq {
                let lowered = question.trim().to_lowercase();
                let slug = utf8_percent_encode(&lowered, ANCHOR_SET);
                body.push_str(&format!(
                    "<dt id='{slug}'><h3>{question}</h3></dt>\n<dd>{answer}</dd>\n"
                ));
            }
            body.push_str("\n</dl>\n");
        }

        readme.sections.insert("faq".to_string(), body);
    }
}

/// Consumes lines up to the first heading; blank lines become embedded
/// newlines, and the boundary heading is pushed back.
fn capture_short_description(cursor: &mut LineCursor<'_>) -> String {
    let mut short = String::new();

    while let Some(line) = cursor.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            short.push('\n');
            continue;
        }
        if sections::is_markdown_heading(trimmed) {
            cursor.push_back();
            break;
        }
        short.push_str(line);
        short.push('\n');
    }

    short.trim().to_string()
}
