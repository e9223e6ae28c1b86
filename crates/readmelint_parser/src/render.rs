//! The markdown rendering capability consumed by the parser.

/// Renders markdown-flavored text to HTML.
///
/// The parser treats rendering as an externally supplied, stateless, pure
/// capability: the same input always yields the same output and rendering
/// never fails. Callers construct a renderer and pass it in; the parser
/// holds no renderer state of its own.
pub trait MarkdownRenderer {
    fn render(&self, text: &str) -> String;
}
