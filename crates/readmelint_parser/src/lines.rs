//! Line normalization for readme input of unknown provenance.
//!
//! Readmes arrive as files saved by every editor imaginable: UTF-8 with or
//! without a BOM, UTF-16, mixed line endings, or outright invalid byte
//! sequences. Normalization always succeeds and always yields a line list.

use std::sync::LazyLock;

use regex::Regex;

/// Any Unicode line-break sequence (the `\R` class).
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|[\n\x0B\x0C\r\x{85}\x{2028}\x{2029}]").unwrap());

/// Splits raw readme bytes into normalized logical lines.
///
/// Valid UTF-8 is split on any Unicode line break; invalid input falls back
/// to an ASCII line-break split with lossy per-line decoding. A UTF-8 BOM on
/// the first line is stripped; a UTF-16LE BOM triggers re-decoding of the
/// whole input before splitting. Trailing `\r`/`\n` are stripped per line.
pub(crate) fn normalize(input: &[u8]) -> Vec<String> {
    let mut lines = if input.starts_with(&[0xFF, 0xFE]) {
        split_unicode(&decode_utf16le(input))
    } else {
        match std::str::from_utf8(input) {
            Ok(text) => split_unicode(text),
            Err(_) => split_ascii(input),
        }
    };

    if let Some(first) = lines.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{FEFF}') {
            *first = stripped.to_string();
        }
    }

    lines
}

fn split_unicode(text: &str) -> Vec<String> {
    LINE_BREAK
        .split(text)
        .map(|line| line.trim_end_matches(['\r', '\n']).to_string())
        .collect()
}

/// ASCII fallback: split on `\r\n`, `\n`, or lone `\r` at the byte level.
fn split_ascii(input: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            b'\n' => {
                lines.push(lossy_line(&input[start..i]));
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(lossy_line(&input[start..i]));
                i += if input.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(lossy_line(&input[start..]));

    lines
}

fn lossy_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

fn decode_utf16le(input: &[u8]) -> String {
    let units: Vec<u16> = input
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    char::decode_utf16(units)
        .map(|result| result.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn splits_mixed_line_endings() {
        let lines = normalize(b"one\r\ntwo\nthree\rfour");
        assert_eq!(lines, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn strips_utf8_bom() {
        let lines = normalize(b"\xEF\xBB\xBF=== Plugin ===\nbody");
        assert_eq!(lines[0], "=== Plugin ===");
    }

    #[test]
    fn decodes_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "=== Plugin ===\nTags: a".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let lines = normalize(&bytes);
        assert_eq!(lines, vec!["=== Plugin ===", "Tags: a"]);
    }

    #[test]
    fn invalid_utf8_falls_back_to_ascii_split() {
        let lines = normalize(b"good line\n\xC0\xC1 bad\nlast");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "good line");
        assert_eq!(lines[2], "last");
    }

    #[test]
    fn unicode_separators_split_lines() {
        let lines = normalize("a\u{2028}b\u{85}c".as_bytes());
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(normalize(b""), vec![String::new()]);
    }
}
