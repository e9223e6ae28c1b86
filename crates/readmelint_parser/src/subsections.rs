//! Second-level segmentation for the FAQ and Upgrade Notice sections.

/// The heading convention used by a sub-section block.
///
/// Standard marks (`## ...`, `= ... =`) win as soon as any line carries one;
/// otherwise whole-line bold emphasis (`**Question**`) acts as the heading
/// style. The choice is made once for the whole block, never per line:
/// classifying line-by-line misreads mixed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingStyle {
    Heading,
    Bold,
}

fn classify(lines: &[&str]) -> HeadingStyle {
    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with('#') || trimmed.starts_with('=') {
            return HeadingStyle::Heading;
        }
    }
    HeadingStyle::Bold
}

/// Parses a section body into ordered heading => content pairs.
///
/// Every heading starts a new entry; there are no sub-headings here. Content
/// before the first heading is kept under the empty key as freeform lead-in
/// text. A repeated heading keeps its original position and takes the last
/// body.
pub(crate) fn parse_section(text: &str) -> Vec<(String, String)> {
    let lines: Vec<&str> = text.split('\n').collect();
    let style = classify(&lines);

    let mut entries: Vec<(String, String)> = Vec::new();
    let mut key = String::new();
    let mut value = String::new();

    for line in &lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            value.push('\n');
            continue;
        }
        let Some(marker) = trimmed.chars().next() else {
            continue;
        };

        let is_heading = match style {
            HeadingStyle::Heading => marker == '#' || marker == '=',
            HeadingStyle::Bold => trimmed.starts_with("**") && trimmed.ends_with("**"),
        };

        if is_heading {
            if !value.is_empty() {
                insert(&mut entries, &key, value.trim());
            }
            value.clear();
            key = line
                .trim_matches(|c| c == marker || c == ' ' || c == '\t')
                .to_string();
            continue;
        }

        value.push_str(line);
        value.push('\n');
    }

    if !key.is_empty() || !value.trim().is_empty() {
        insert(&mut entries, &key, value.trim());
    }

    entries
}

fn insert(entries: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some(entry) = entries.iter_mut().find(|(k, _)| k == key) {
        entry.1 = value.to_string();
    } else {
        entries.push((key.to_string(), value.to_string()));
    }
}
