//! Source location tracking
//!
//! Lines and columns are 1-based. A [`Span`] is half-open: `start` is the
//! first character, `end` is one past the last one.

use serde::Serialize;
use std::fmt;

/// A line/column position in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Line 1, column 1
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// The position one past the last character of `text` laid out from here.
    ///
    /// Without a newline the column simply moves right by the length of
    /// `text`. After a newline the column restarts, so it becomes
    /// `len - last_newline_index`, which is the 1-based column one past the
    /// last character of the final line. `self.column` plays no part then.
    pub fn advance(self, text: &str) -> Position {
        let mut len = 0;
        let mut newlines = 0;
        let mut last_newline = None;

        for c in text.chars() {
            if c == '\n' {
                newlines += 1;
                last_newline = Some(len);
            }
            len += 1;
        }

        let column = match last_newline {
            None => self.column + len,
            Some(index) => len - index,
        };

        Position {
            line: self.line + newlines,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span represents a range in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// First character
    pub start: Position,
    /// One past the last character
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The span covering `text` when it begins at `start`
    pub fn of_text(start: Position, text: &str) -> Self {
        Self::new(start, start.advance(text))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_advance_single_line() {
        let end = Position::new(2, 4).advance("foo");
        assert_eq!(end, Position::new(2, 7));
    }

    #[test]
    fn test_advance_empty_text() {
        let start = Position::new(10, 1);
        assert_eq!(start.advance(""), start);
    }

    #[test]
    fn test_advance_multi_line() {
        // "a\nb" with quotes: length 5, last newline at index 2
        let end = Position::new(3, 5).advance("\"a\nb\"");
        assert_eq!(end, Position::new(4, 3));
    }

    #[test]
    fn test_column_restarts_after_newline() {
        let a = Position::new(1, 1).advance("xx\nyyy");
        let b = Position::new(1, 40).advance("\n\nq\nyyy");
        assert_eq!(a.column, 4);
        assert_eq!(b.column, 4);
        assert_eq!(b.line, 4);
    }

    #[test]
    fn test_trailing_newline_ends_at_column_one() {
        let end = Position::new(5, 9).advance("abc\n");
        assert_eq!(end, Position::new(6, 1));
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let end = Position::new(1, 1).advance("héllo");
        assert_eq!(end.column, 6);
    }

    #[test]
    fn test_span_of_text() {
        let span = Span::of_text(Position::new(2, 3), "ab\nc");
        assert_eq!(span, Span::new(Position::new(2, 3), Position::new(3, 2)));
        assert_eq!(span.to_string(), "2:3-3:2");
    }

    #[test]
    fn test_empty_span() {
        let span = Span::of_text(Position::new(7, 2), "");
        assert_eq!(span.start, span.end);
        assert_eq!(span.to_string(), "7:2-7:2");
    }
}
