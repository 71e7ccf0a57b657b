//! Block-level line rewriting.
//!
//! `LineShifter` wraps a buffer and rewrites a contiguous run of lines:
//! inserting or removing a marker line, prefixing lines, stripping
//! prefixes, numbering. Lines outside the touched range keep their
//! content; callers account for the returned char deltas when re-anchoring
//! selections.

use crate::text::TextBuffer;
use crate::text_helpers::line_text;

pub struct LineShifter<'a, T: TextBuffer> {
    buf: &'a mut T,
}

impl<'a, T: TextBuffer> LineShifter<'a, T> {
    pub fn new(buf: &'a mut T) -> Self {
        Self { buf }
    }

    /// Insert a full line above the given line index. Returns the number
    /// of chars inserted (text plus newline).
    pub fn insert_line(&mut self, line: usize, text: &str) -> usize {
        let offset = if line < self.buf.len_lines() {
            self.buf.line_start(line)
        } else {
            self.buf.len_chars()
        };
        let with_newline = format!("{text}\n");
        self.buf.insert(offset, &with_newline);
        with_newline.chars().count()
    }

    /// Remove a whole line, including its trailing newline. Returns the
    /// number of chars removed.
    pub fn remove_line(&mut self, line: usize) -> usize {
        let start = self.buf.line_start(line);
        let end = if line + 1 < self.buf.len_lines() {
            self.buf.line_start(line + 1)
        } else {
            self.buf.line_end(line)
        };
        self.buf.delete(start..end);
        end - start
    }

    /// Prefix every line in the inclusive range. Returns total chars
    /// inserted.
    pub fn prefix_lines(&mut self, first: usize, last: usize, prefix: &str) -> usize {
        let width = prefix.chars().count();
        for line in first..=last {
            self.buf.insert(self.buf.line_start(line), prefix);
        }
        width * (last - first + 1)
    }

    /// Strip a fixed-width prefix from every line in the inclusive range
    /// that satisfies the predicate. Returns the number of lines stripped.
    pub fn strip_lines(
        &mut self,
        first: usize,
        last: usize,
        width: usize,
        matches: impl Fn(&str) -> bool,
    ) -> usize {
        let mut stripped = 0;
        for line in first..=last {
            let text = line_text(self.buf, line);
            if matches(&text) {
                let start = self.buf.line_start(line);
                self.buf.delete(start..start + width);
                stripped += 1;
            }
        }
        stripped
    }

    /// Prefix lines with `1. `, `2. `, ... by position in the range,
    /// ignoring any digits already present. Returns total chars inserted.
    pub fn number_lines(&mut self, first: usize, last: usize) -> usize {
        let mut inserted = 0;
        for (index, line) in (first..=last).enumerate() {
            let prefix = format!("{}. ", index + 1);
            self.buf.insert(self.buf.line_start(line), &prefix);
            inserted += prefix.chars().count();
        }
        inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EditorRope;

    #[test]
    fn test_insert_and_remove_line() {
        let mut buf = EditorRope::from_str("a\nb");
        let mut shifter = LineShifter::new(&mut buf);
        assert_eq!(shifter.insert_line(1, "mid"), 4);
        assert_eq!(buf.to_string(), "a\nmid\nb");

        let mut shifter = LineShifter::new(&mut buf);
        assert_eq!(shifter.remove_line(1), 4);
        assert_eq!(buf.to_string(), "a\nb");
    }

    #[test]
    fn test_prefix_and_strip() {
        let mut buf = EditorRope::from_str("x\ny\nz");
        let mut shifter = LineShifter::new(&mut buf);
        assert_eq!(shifter.prefix_lines(0, 2, "| "), 6);
        assert_eq!(buf.to_string(), "| x\n| y\n| z");

        let mut shifter = LineShifter::new(&mut buf);
        let stripped = shifter.strip_lines(0, 2, 2, |line| line.starts_with("| "));
        assert_eq!(stripped, 3);
        assert_eq!(buf.to_string(), "x\ny\nz");
    }

    #[test]
    fn test_strip_skips_non_matching_lines() {
        let mut buf = EditorRope::from_str("| x\nbare\n| z");
        let mut shifter = LineShifter::new(&mut buf);
        let stripped = shifter.strip_lines(0, 2, 2, |line| line.starts_with("| "));
        assert_eq!(stripped, 2);
        assert_eq!(buf.to_string(), "x\nbare\nz");
    }

    #[test]
    fn test_lines_outside_range_untouched() {
        let mut buf = EditorRope::from_str("keep\nmid\nkeep too");
        let mut shifter = LineShifter::new(&mut buf);
        shifter.prefix_lines(1, 1, "- [ ] ");
        assert_eq!(buf.to_string(), "keep\n- [ ] mid\nkeep too");

        let mut shifter = LineShifter::new(&mut buf);
        shifter.remove_line(1);
        assert_eq!(buf.to_string(), "keep\nkeep too");
    }

    #[test]
    fn test_number_lines_ignores_existing_digits() {
        let mut buf = EditorRope::from_str("9 lives\nsecond\nthird");
        let mut shifter = LineShifter::new(&mut buf);
        assert_eq!(shifter.number_lines(0, 2), 9);
        assert_eq!(buf.to_string(), "1. 9 lives\n2. second\n3. third");
    }
}
