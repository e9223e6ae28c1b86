//! Explicit cursor over an immutable line slice.

/// A forward cursor with single-line push-back.
///
/// Stages that over-read their boundary line return it to the cursor so the
/// next stage sees it again.
pub(crate) struct LineCursor<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(lines: &'a [String]) -> Self {
        Self { lines, pos: 0 }
    }

    /// Consumes and returns the next line.
    pub(crate) fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }

    /// Returns the next line without consuming it.
    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(String::as_str)
    }

    /// Returns the most recently consumed line to the cursor.
    pub(crate) fn push_back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Consumes lines until a non-blank one is found and returns it.
    pub(crate) fn next_nonblank(&mut self) -> Option<&'a str> {
        while let Some(line) = self.next() {
            if !line.trim().is_empty() {
                return Some(line);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn push_back_revisits_line() {
        let lines = lines(&["a", "b"]);
        let mut cursor = LineCursor::new(&lines);
        assert_eq!(cursor.next(), Some("a"));
        cursor.push_back();
        assert_eq!(cursor.next(), Some("a"));
        assert_eq!(cursor.next(), Some("b"));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn next_nonblank_skips_whitespace_lines() {
        let lines = lines(&["", "  \t", "content", "after"]);
        let mut cursor = LineCursor::new(&lines);
        assert_eq!(cursor.next_nonblank(), Some("content"));
        assert_eq!(cursor.next(), Some("after"));
    }

    #[test]
    fn push_back_at_start_is_a_no_op() {
        let lines = lines(&["a"]);
        let mut cursor = LineCursor::new(&lines);
        cursor.push_back();
        assert_eq!(cursor.next(), Some("a"));
    }
}
