//! # readmelint_markdown
//!
//! Markdown rendering bridge for readme sections.
//!
//! Wraps the `markdown` crate with the pre- and post-transforms readme
//! bodies need: literal code-block content is protected from the renderer,
//! the legacy bbPress single-backtick block convention becomes an indented
//! code block, and the custom `= Section Header =` convention becomes a real
//! heading.

use std::sync::LazyLock;

use markdown::{Options, to_html_with_options};
use regex::{Captures, Regex};

use readmelint_parser::MarkdownRenderer;

/// `<code>`/`<pre><code>` spans already present in the raw text.
static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(<pre><code>|<code>)(.*?)(</code></pre>|</code>)").unwrap()
});

/// Legacy block-level code: optional indentation, then a backtick-delimited
/// run at the start of a line.
static BACKTICK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(^|\n)([ \t]*)`(.*?)`").unwrap());

/// Custom `= Section Header =` subheadings.
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*=[ \t]+(.+?)[ \t]+=").unwrap());

/// Renders readme section bodies to HTML.
///
/// Stateless and pure: the same text always produces the same HTML.
pub struct ReadmeMarkdown {
    options: Options,
}

impl ReadmeMarkdown {
    pub fn new() -> Self {
        let mut options = Options::gfm();
        // Section bodies legitimately carry inline HTML: the <h3>/<h4>
        // markers injected by the parser and author-written code spans.
        options.compile.allow_dangerous_html = true;
        Self { options }
    }

    /// Applies the code-trick and heading pre-passes, renders, and trims.
    pub fn transform(&self, text: &str) -> String {
        let text = code_trick(text.trim());
        let text = SECTION_HEADER.replace_all(&text, "\n<h4>$1</h4>\n");

        // Leading indentation added by the code-trick pass is significant,
        // so the text is not re-trimmed before rendering.
        match to_html_with_options(&text, &self.options) {
            Ok(html) => html.trim().to_string(),
            // Only reachable with MDX enabled, which these options never
            // set.
            Err(message) => unreachable!("markdown rendering failed: {message}"),
        }
    }
}

impl Default for ReadmeMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for ReadmeMarkdown {
    fn render(&self, text: &str) -> String {
        self.transform(text)
    }
}

/// Rewrites user-formatted code so the renderer preserves it literally.
///
/// HTML code spans become backtick spans with their entities decoded, so
/// underscores and quotes inside survive the markdown pass. Block-level
/// backtick runs become indented code blocks, the renderer's native block
/// convention.
fn code_trick(text: &str) -> String {
    let text = CODE_SPAN.replace_all(text, decode_code_span);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    BACKTICK_BLOCK
        .replace_all(&text, indent_code_block)
        .into_owned()
}

fn decode_code_span(caps: &Captures<'_>) -> String {
    let decoded = html_escape::decode_html_entities(&caps[2])
        .replace("<br />", "");

    if &caps[1] == "<pre><code>" {
        // Inner newlines force the backtick span to render as a block.
        format!("`\n{decoded}\n`")
    } else {
        format!("`{decoded}`")
    }
}

fn indent_code_block(caps: &Captures<'_>) -> String {
    let indent = &caps[2];
    let indented: Vec<String> = caps[3]
        .split('\n')
        .map(|line| format!("{indent}    {line}"))
        .collect();

    format!("{}{}", &caps[1], indented.join("\n"))
}
