//! Per-field sanitizers.
//!
//! Each sanitizer either normalizes a value or clears it and raises a
//! [`ParseWarning`]; none of them can fail. All are idempotent: feeding a
//! sanitizer its own output yields the same value.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{IGNORED_TAGS, ParseWarning};

/// `x.y` or `x.y.z` with a single-digit minor, the shape WordPress core
/// versions take.
static WP_VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d(\.\d+)?$").unwrap());

/// `x.y` or `x.y.z` PHP version.
static PHP_VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d+){1,2}$").unwrap());

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static TAGS_PATH_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^/?tags/").unwrap());

static STABLE_TAG_INVALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_.-]").unwrap());

/// Strips HTML tags and trims. Not fancy, and deliberately so: readme fields
/// are plain text, not markup.
pub(crate) fn sanitize_text(text: &str) -> String {
    HTML_TAG.replace_all(text, "").trim().to_string()
}

/// Splits a `Tags` header into at most five trimmed tags, dropping empties
/// and ignore-list entries while preserving first-occurrence order.
pub(crate) fn sanitize_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| {
            !IGNORED_TAGS
                .iter()
                .any(|ignored| tag.eq_ignore_ascii_case(ignored))
        })
        .take(5)
        .map(str::to_string)
        .collect()
}

/// Splits a `Contributors` header into trimmed usernames. No length cap.
pub(crate) fn sanitize_contributors(value: &str) -> Vec<String> {
    value.split(',').map(|c| c.trim().to_string()).collect()
}

/// Reduces a `Stable tag` header to a safe tag name.
///
/// Handles the common accidents: `"trunk"` in quotes, `tags/1.2.3` paths,
/// stray markup characters, and `.9` style tags (prefixed with `0`).
pub(crate) fn sanitize_stable_tag(value: &str) -> String {
    let tag = value.trim().trim_matches(['"', '\'']);
    let tag = TAGS_PATH_PREFIX.replace(tag, "");
    let tag = STABLE_TAG_INVALID.replace_all(&tag, "");

    if tag.starts_with('.') {
        format!("0{tag}")
    } else {
        tag.into_owned()
    }
}

/// Validates a `Requires PHP` header. Invalid values are cleared and
/// flagged.
pub(crate) fn sanitize_requires_php(
    value: &str,
    warnings: &mut BTreeSet<ParseWarning>,
) -> String {
    let version = value.trim();

    if !version.is_empty() && !PHP_VERSION.is_match(version) {
        warnings.insert(ParseWarning::RequiresPhpHeaderIgnored);
        return String::new();
    }

    version.to_string()
}

/// Validates a `Tested up to` header.
///
/// Strips historical `WordPress 5.0` / `WP 5.0` phrasing and pre-release
/// suffixes. When a stable-branch reference is known, versions above
/// stable+0.1 (trunk) are rejected as implausible.
pub(crate) fn sanitize_tested_version(
    value: &str,
    stable_branch: Option<&str>,
    warnings: &mut BTreeSet<ParseWarning>,
) -> String {
    let version = value.trim();
    if version.is_empty() {
        return String::new();
    }

    let version = strip_phrases(version, &["WordPress", "WP"]);
    let version = drop_prerelease_suffix(&version);

    let too_new = match (stable_branch.and_then(version_tenths), version_tenths(&version)) {
        (Some(stable), Some(tested)) => tested > stable + 1,
        _ => false,
    };

    if !WP_VERSION.is_match(&version) || too_new {
        warnings.insert(ParseWarning::TestedHeaderIgnored);
        return String::new();
    }

    version
}

/// Validates a `Requires at least` header.
pub(crate) fn sanitize_requires_version(
    value: &str,
    warnings: &mut BTreeSet<ParseWarning>,
) -> String {
    let version = value.trim();
    if version.is_empty() {
        return String::new();
    }

    let version = strip_phrases(version, &["WordPress", "WP", "or higher", "and above", "+"]);
    let version = drop_prerelease_suffix(&version);

    if !WP_VERSION.is_match(&version) {
        warnings.insert(ParseWarning::RequiresHeaderIgnored);
        return String::new();
    }

    version
}

/// Truncates a short description to `length` characters, counted on the
/// entity-decoded text.
///
/// A truncation that does not end on a period backtracks to the last period
/// when one falls within the final 20% of the limit; otherwise an ellipsis
/// entity marks the cut.
pub(crate) fn trim_length(desc: &str, length: usize) -> String {
    let decoded_len = html_escape::decode_html_entities(desc).chars().count();

    if decoded_len > length {
        let chars: Vec<char> = desc.chars().take(length).collect();
        let mut truncated: String = chars.iter().collect();

        if chars.last() != Some(&'.') {
            match chars.iter().rposition(|c| *c == '.') {
                Some(pos) if (pos as f64) > 0.8 * length as f64 => {
                    truncated = chars[..=pos].iter().collect();
                }
                _ => truncated.push_str(" &hellip;"),
            }
        }

        return truncated.trim().to_string();
    }

    desc.trim().to_string()
}

/// Removes every case-insensitive occurrence of the given ASCII phrases.
fn strip_phrases(value: &str, phrases: &[&str]) -> String {
    let mut out = value.to_string();
    for phrase in phrases {
        out = remove_ascii_ci(&out, phrase);
    }
    out.trim().to_string()
}

fn remove_ascii_ci(haystack: &str, needle: &str) -> String {
    let needle = needle.as_bytes();
    let hay = haystack.as_bytes();
    let mut out = Vec::with_capacity(hay.len());
    let mut i = 0;

    while i < hay.len() {
        if i + needle.len() <= hay.len() && hay[i..i + needle.len()].eq_ignore_ascii_case(needle) {
            i += needle.len();
        } else {
            out.push(hay[i]);
            i += 1;
        }
    }

    // An ASCII needle can only match whole ASCII bytes, so the remainder is
    // still valid UTF-8.
    String::from_utf8_lossy(&out).into_owned()
}

/// Everything before the first `-`, dropping `-alpha`/`-RC`/`-beta`
/// suffixes.
fn drop_prerelease_suffix(version: &str) -> String {
    version
        .split('-')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// `"6.0"` -> 60. Versions compare on tenths, matching the one-digit minor
/// the version pattern admits.
fn version_tenths(version: &str) -> Option<u32> {
    let mut parts = version.split('.');
    let major: u32 = parts.next()?.trim().parse().ok()?;
    let minor: u32 = parts
        .next()
        .and_then(|m| m.chars().next())
        .and_then(|c| c.to_digit(10))?;
    Some(major * 10 + minor)
}
