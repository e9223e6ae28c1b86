//! # readmelint_core
//!
//! Validation engine for WordPress plugin readmes.
//!
//! This crate wires the parser and the markdown bridge together and
//! evaluates the fixed validation rule table, producing diagnostics in
//! three buckets: errors, warnings, and notes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use readmelint_core::Validator;
//!
//! let result = Validator::new().validate_content(&readme_text);
//! for warning in &result.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! ```

mod result;
mod validator;

pub use result::ValidationResult;
pub use validator::Validator;

pub use readmelint_markdown::ReadmeMarkdown;
pub use readmelint_parser::{
    EXPECTED_SECTIONS, MarkdownRenderer, ParseWarning, ParsedReadme, ParserOptions, ReadmeParser,
};
