//! Cursor positions inside scanned text.
//!
//! A [`Position`] is advanced one character at a time through the pure
//! [`Position::advance`] function, so every cursor the scanner keeps
//! (current, scan origin, token start) is just a copied value.

use std::fmt;

use serde::Serialize;

use crate::core::error::ScanError;

/// Location of a character in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, counted in characters).
    pub column: usize,
    /// Number of characters from the beginning of the file (0-indexed).
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Beginning of a file.
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// Position of the character following `ch`, where `ch` sits at `self`.
    ///
    /// The offset always grows by one; a line feed moves to column 1 of the next line.
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
                offset: self.offset + 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
                offset: self.offset + 1,
            }
        }
    }

    /// Validate a caller-supplied anchor before any scan state is created.
    pub fn validate_anchor(self) -> Result<Self, ScanError> {
        if self.line == 0 {
            return Err(ScanError::invalid_argument("anchor line must be 1 or greater"));
        }
        if self.column == 0 {
            return Err(ScanError::invalid_argument(
                "anchor column must be 1 or greater",
            ));
        }
        Ok(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range `[start, end)` of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: Position,
    /// Position right after the last covered character.
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_advance_plain_char() {
        let pos = Position::new(3, 5, 40).advance('a');
        assert_eq!(pos, Position::new(3, 6, 41));
    }

    #[test]
    fn test_advance_newline_resets_column() {
        let pos = Position::new(3, 5, 40).advance('\n');
        assert_eq!(pos, Position::new(4, 1, 41));
    }

    #[test]
    fn test_carriage_return_only_moves_column() {
        let pos = Position::start().advance('\r').advance('\n');
        assert_eq!(pos, Position::new(2, 1, 2));
    }

    #[test]
    fn test_offsets_are_monotonic() {
        let mut pos = Position::start();
        for ch in "x\n\ny z\r\n".chars() {
            let next = pos.advance(ch);
            assert!(next.offset > pos.offset);
            assert!(next > pos);
            pos = next;
        }
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(Position::new(1, 3, 2), Position::new(1, 8, 7));
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_validate_anchor() {
        assert!(Position::new(1, 1, 0).validate_anchor().is_ok());
        assert!(Position::new(0, 1, 0).validate_anchor().is_err());
        assert!(Position::new(1, 0, 0).validate_anchor().is_err());
    }
}
