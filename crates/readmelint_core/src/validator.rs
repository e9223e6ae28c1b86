//! The fixed validation rule table.

use tracing::debug;

use readmelint_markdown::ReadmeMarkdown;
use readmelint_parser::{ParseWarning, ParsedReadme, ParserOptions, ReadmeParser};

use crate::result::ValidationResult;

/// Stable branch assumed when none is configured.
const DEFAULT_STABLE_BRANCH: &str = "5.0";

const UPGRADE_NOTICE_LIMIT: usize = 150;
const SHORT_DESCRIPTION_LIMIT: usize = 150;

/// Evaluates a parsed readme against the rule table.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ParserOptions,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parses and validates readme contents.
    pub fn validate_content(&self, content: &str) -> ValidationResult {
        self.validate_bytes(content.as_bytes())
    }

    /// Parses and validates raw readme bytes.
    pub fn validate_bytes(&self, content: &[u8]) -> ValidationResult {
        let renderer = ReadmeMarkdown::new();
        let parser = ReadmeParser::with_options(&renderer, self.options.clone());
        let readme = parser.parse_bytes(content);
        self.validate(&readme)
    }

    /// Evaluates the rule table against an already parsed readme.
    pub fn validate(&self, readme: &ParsedReadme) -> ValidationResult {
        let mut result = ValidationResult::default();
        let stable = self
            .options
            .stable_branch
            .as_deref()
            .unwrap_or(DEFAULT_STABLE_BRANCH);

        // Fatal errors.
        if readme.name.is_empty() {
            result.errors.push(
                "We cannot find a plugin name in your readme. Plugin names look like: \
                 `=== Plugin Name ===`. Please change `Plugin Name` to reflect the actual \
                 name of your plugin."
                    .to_string(),
            );
        }

        // Warnings.
        if readme.warnings.contains(&ParseWarning::RequiresHeaderIgnored) {
            result.warnings.push(format!(
                "The `Requires at least` field was ignored. This field should only contain \
                 a valid WordPress version such as `{}` or `{}`.",
                stable,
                adjust_branch(stable, -1)
            ));
        }

        if readme.warnings.contains(&ParseWarning::TestedHeaderIgnored) {
            result.warnings.push(format!(
                "The `Tested up to` field was ignored. This field should only contain \
                 a valid WordPress version such as `{}` or `{}`.",
                stable,
                adjust_branch(stable, 1)
            ));
        } else if readme.tested.is_empty() {
            result
                .warnings
                .push("The `Tested up to` field is missing.".to_string());
        }

        if readme
            .warnings
            .contains(&ParseWarning::RequiresPhpHeaderIgnored)
        {
            result.warnings.push(
                "The `Requires PHP` field was ignored. This field should only contain \
                 a PHP version such as `5.2.4` or `7.0`."
                    .to_string(),
            );
        }

        if readme.stable_tag.is_empty() {
            result.warnings.push(
                "The `Stable tag` field is missing. Hint: If you treat `/trunk/` as stable, \
                 put `Stable tag: trunk`."
                    .to_string(),
            );
        }

        if readme.warnings.contains(&ParseWarning::ContributorIgnored) {
            result.warnings.push(
                "One or more contributors listed were ignored. The `Contributors` field \
                 should only contain WordPress.org usernames. Remember that usernames are \
                 case-sensitive."
                    .to_string(),
            );
        } else if readme.contributors.is_empty() {
            result
                .warnings
                .push("The `Contributors` field is missing.".to_string());
        }

        if readme.short_description_length > SHORT_DESCRIPTION_LIMIT {
            result.warnings.push(format!(
                "The short description exceeds the limit of {SHORT_DESCRIPTION_LIMIT} characters"
            ));
        }

        for (version, notice) in &readme.upgrade_notice {
            if notice.chars().count() > UPGRADE_NOTICE_LIMIT {
                result.warnings.push(format!(
                    "The upgrade notice for \"{version}\" exceeds the limit of \
                     {UPGRADE_NOTICE_LIMIT} characters"
                ));
            }
        }

        // Notes.
        if readme.requires.is_empty() {
            result.notes.push(
                "The `Requires at least` field is missing. It should be defined here, or \
                 in your main plugin file."
                    .to_string(),
            );
        }

        if readme.requires_php.is_empty() {
            result.notes.push(
                "The `Requires PHP` field is missing. It should be defined here, or in \
                 your main plugin file."
                    .to_string(),
            );
        }

        if readme
            .sections
            .get("faq")
            .is_none_or(|body| body.is_empty())
        {
            result
                .notes
                .push("No `== Frequently Asked Questions ==` section was found".to_string());
        }

        if readme
            .sections
            .get("changelog")
            .is_none_or(|body| body.is_empty())
        {
            result
                .notes
                .push("No `== Changelog ==` section was found".to_string());
        }

        if readme.upgrade_notice.is_empty() {
            result
                .notes
                .push("No `== Upgrade Notice ==` section was found".to_string());
        }

        if readme.screenshots.is_empty() {
            result
                .notes
                .push("No `== Screenshots ==` section was found".to_string());
        }

        if readme.donate_link.is_empty() {
            result.notes.push("No donate link was found".to_string());
        }

        debug!(
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            notes = result.notes.len(),
            "validated readme"
        );

        result
    }
}

/// Moves a `major.minor` branch up or down by one minor release, on tenths.
fn adjust_branch(branch: &str, delta: i32) -> String {
    let tenths = branch
        .split_once('.')
        .and_then(|(major, minor)| {
            let major: i32 = major.trim().parse().ok()?;
            let minor = minor.chars().next()?.to_digit(10)? as i32;
            Some(major * 10 + minor)
        })
        .unwrap_or(50);

    let adjusted = (tenths + delta).max(0);
    format!("{}.{}", adjusted / 10, adjusted % 10)
}
