//! Header block extraction: the plugin name line and the `Key: value` run.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::cursor::LineCursor;
use crate::model::ParsedReadme;
use crate::parser::ParserOptions;
use crate::sanitize;

/// Semantic header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum HeaderField {
    Tested,
    Requires,
    RequiresPhp,
    Tags,
    Contributors,
    DonateLink,
    StableTag,
    License,
    LicenseUri,
}

/// Recognized header keys, historical aliases included. Anything else is
/// dropped silently.
const VALID_HEADERS: &[(&str, HeaderField)] = &[
    ("tested", HeaderField::Tested),
    ("tested up to", HeaderField::Tested),
    ("requires", HeaderField::Requires),
    ("requires at least", HeaderField::Requires),
    ("requires php", HeaderField::RequiresPhp),
    ("tags", HeaderField::Tags),
    ("contributors", HeaderField::Contributors),
    ("donate link", HeaderField::DonateLink),
    ("stable tag", HeaderField::StableTag),
    ("license", HeaderField::License),
    ("license uri", HeaderField::LicenseUri),
];

static LICENSE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)https?://\S+").unwrap());

fn lookup(key: &str) -> Option<HeaderField> {
    VALID_HEADERS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, field)| *field)
}

/// True when a line reads as a recognized `Key: value` header.
fn looks_like_header(line: &str) -> bool {
    let Some((key, _)) = line.split_once(':') else {
        return false;
    };
    lookup(&key.trim_end().to_ascii_lowercase()).is_some()
}

/// Consumes the title line and the header run, filling the typed fields of
/// `readme` through the per-field sanitizers.
pub(crate) fn extract(
    cursor: &mut LineCursor<'_>,
    options: &ParserOptions,
    readme: &mut ParsedReadme,
) {
    let Some(title) = cursor.next_nonblank() else {
        return;
    };
    readme.name = sanitize::sanitize_text(
        title.trim_matches(|c| matches!(c, '#' | '=' | ' ' | '\t' | '\0' | '\u{0B}')),
    );

    // Discard a GitHub-style `====` underline below the title.
    if let Some(next) = cursor.peek() {
        if next.trim_matches(['=', '-']).is_empty() {
            cursor.next();
        }
    }

    // Some readmes keep the literal template title and put the real name on
    // the following line.
    if readme.name.eq_ignore_ascii_case("plugin name") {
        match cursor.next_nonblank() {
            Some(candidate) if candidate.len() > 50 || looks_like_header(candidate) => {
                // The candidate is a header or prose, not a name; give it
                // back and treat the name as unresolved.
                readme.name = String::new();
                cursor.push_back();
            }
            Some(candidate) => readme.name = candidate.to_string(),
            None => readme.name = String::new(),
        }
    }

    let headers = scan_headers(cursor);
    debug!(count = headers.len(), "collected header fields");
    apply_headers(headers, options, readme);
}

/// Scans forward while lines contain a colon. The first blank or colon-less
/// line ends the run and is pushed back for the next stage.
fn scan_headers(cursor: &mut LineCursor<'_>) -> HashMap<HeaderField, String> {
    let mut headers = HashMap::new();
    let mut line_opt = cursor.next_nonblank();

    while let Some(line) = line_opt {
        let Some((raw_key, value)) = line.trim().split_once(':') else {
            cursor.push_back();
            break;
        };

        let key = raw_key
            .trim_matches(|c| matches!(c, ' ' | '\t' | '*' | '-' | '\r' | '\n'))
            .to_ascii_lowercase();
        if let Some(field) = lookup(&key) {
            headers.insert(field, value.trim().to_string());
        }

        line_opt = cursor.next();
    }

    headers
}

fn apply_headers(
    mut headers: HashMap<HeaderField, String>,
    options: &ParserOptions,
    readme: &mut ParsedReadme,
) {
    let mut take = |field| headers.remove(&field).unwrap_or_default();

    let tags = take(HeaderField::Tags);
    if !tags.is_empty() {
        readme.tags = sanitize::sanitize_tags(&tags);
    }

    let requires = take(HeaderField::Requires);
    if !requires.is_empty() {
        readme.requires = sanitize::sanitize_requires_version(&requires, &mut readme.warnings);
    }

    let tested = take(HeaderField::Tested);
    if !tested.is_empty() {
        readme.tested = sanitize::sanitize_tested_version(
            &tested,
            options.stable_branch.as_deref(),
            &mut readme.warnings,
        );
    }

    let requires_php = take(HeaderField::RequiresPhp);
    if !requires_php.is_empty() {
        readme.requires_php = sanitize::sanitize_requires_php(&requires_php, &mut readme.warnings);
    }

    let contributors = take(HeaderField::Contributors);
    if !contributors.is_empty() {
        readme.contributors = sanitize::sanitize_contributors(&contributors);
    }

    let stable_tag = take(HeaderField::StableTag);
    if !stable_tag.is_empty() {
        readme.stable_tag = sanitize::sanitize_stable_tag(&stable_tag);
    }

    let donate_link = take(HeaderField::DonateLink);
    if !donate_link.is_empty() {
        readme.donate_link = donate_link;
    }

    let mut license = take(HeaderField::License);
    let mut license_uri = take(HeaderField::LicenseUri);
    if !license.is_empty() {
        // Handle the many cases of "License: GPLv2 - http://...".
        if license_uri.is_empty() {
            if let Some(url) = LICENSE_URL.find(&license) {
                license_uri = url.as_str().to_string();
                license = license
                    .replace(url.as_str(), "")
                    .trim_matches(|c| matches!(c, ' ' | '-' | '*' | '\t' | '\n' | '\r'))
                    .to_string();
            }
        }
        readme.license = license;
    }
    if !license_uri.is_empty() {
        readme.license_uri = license_uri;
    }
}
