//! # readmelint_parser
//!
//! WordPress.org-style plugin readme parser.
//!
//! This crate provides:
//! - Line normalization tolerant of BOMs, UTF-16, and invalid UTF-8
//! - Header block extraction with per-field sanitizers
//! - Section segmentation with alias resolution and an `other_notes`
//!   catch-all
//! - Second-level FAQ / Upgrade Notice parsing
//! - The [`MarkdownRenderer`] capability the parse pipeline renders through
//!
//! Parsing never fails: malformed input degrades to empty fields plus
//! warning flags on the returned [`ParsedReadme`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use readmelint_parser::{ReadmeParser, ParserOptions};
//!
//! let parser = ReadmeParser::new(&renderer);
//! let readme = parser.parse("=== My Plugin ===\nTags: foo\n\nShort.\n");
//! assert_eq!(readme.name, "My Plugin");
//! ```

mod cursor;
mod headers;
mod lines;
mod model;
mod parser;
mod render;
mod sanitize;
mod sections;
mod subsections;

pub use model::{EXPECTED_SECTIONS, ParseWarning, ParsedReadme};
pub use parser::{ParserOptions, ReadmeParser};
pub use render::MarkdownRenderer;
