//! The parsed readme record.

use std::collections::{BTreeMap, BTreeSet};

/// The readme sections we expect; anything else is folded into
/// `other_notes`.
pub const EXPECTED_SECTIONS: &[&str] = &[
    "description",
    "installation",
    "faq",
    "screenshots",
    "changelog",
    "upgrade_notice",
    "other_notes",
];

/// Section name aliases, from => to.
pub(crate) const ALIAS_SECTIONS: &[(&str, &str)] = &[
    ("frequently_asked_questions", "faq"),
    ("change_log", "changelog"),
    ("screenshot", "screenshots"),
];

/// Plugin tags that carry no information and are dropped.
pub(crate) const IGNORED_TAGS: &[&str] = &["plugin", "wordpress"];

/// Named flags recorded when a header value is rejected by sanitization.
///
/// Presence is what matters; the validator turns each flag into a
/// human-readable warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParseWarning {
    /// The `Requires at least` header was not a valid version.
    RequiresHeaderIgnored,
    /// The `Tested up to` header was not a valid or plausible version.
    TestedHeaderIgnored,
    /// The `Requires PHP` header was not a valid version.
    RequiresPhpHeaderIgnored,
    /// A listed contributor was rejected. The parser itself never sets this
    /// flag (username vetting needs a directory lookup); it exists so
    /// callers that do vet contributors share the warning vocabulary.
    ContributorIgnored,
}

/// A fully parsed readme.
///
/// Built once per parse invocation and never mutated afterwards. Section
/// bodies, FAQ answers, upgrade notices, and the short description are
/// already rendered to HTML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReadme {
    /// Plugin name. Empty when no name could be resolved; turning that into
    /// a hard failure is the caller's concern.
    pub name: String,
    /// Up to five tags, ignore-list entries removed, original order kept.
    pub tags: Vec<String>,
    /// Validated `Requires at least` version, or empty.
    pub requires: String,
    /// Validated `Tested up to` version, or empty.
    pub tested: String,
    /// Validated `Requires PHP` version, or empty.
    pub requires_php: String,
    /// Contributor usernames in listed order.
    pub contributors: Vec<String>,
    /// Stable tag, restricted to `[A-Za-z0-9_.-]`.
    pub stable_tag: String,
    /// Donation URL, verbatim.
    pub donate_link: String,
    /// License name with any embedded URL split out into `license_uri`.
    pub license: String,
    /// License URL.
    pub license_uri: String,
    /// Rendered short description, truncated to 150 characters.
    pub short_description: String,
    /// Character count of the short description before truncation.
    pub short_description_length: usize,
    /// Canonical section key to rendered body; only non-empty sections.
    pub sections: BTreeMap<String, String>,
    /// Version label to rendered upgrade notice, in document order.
    pub upgrade_notice: Vec<(String, String)>,
    /// Question to rendered answer, in document order.
    pub faq: Vec<(String, String)>,
    /// 1-based screenshot index to caption.
    pub screenshots: Vec<(usize, String)>,
    /// Warning flags raised while sanitizing header values.
    pub warnings: BTreeSet<ParseWarning>,
}

impl ParsedReadme {
    /// Looks a section name up through the alias table.
    pub(crate) fn resolve_alias(name: &str) -> &str {
        ALIAS_SECTIONS
            .iter()
            .find(|(from, _)| *from == name)
            .map(|(_, to)| *to)
            .unwrap_or(name)
    }
}
