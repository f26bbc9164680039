//! Visual Basic lexical rules.

use super::{Dialect, LexState, StringKind, Transition, Window};
use crate::utils::is_identifier_char;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisualBasic;

impl VisualBasic {
    fn classify_code(window: &Window<'_>) -> Transition {
        let ch = window.current();
        match ch {
            '"' => Transition::OpenString {
                kind: StringKind::Regular,
                len: 1,
            },
            '\'' => Transition::LineComment,
            'r' | 'R' if is_rem(window) => Transition::LineComment,
            ' ' | '\t' => match continuation_len(window.rest()) {
                Some(len) => Transition::Continuation { len },
                None => Transition::Stay,
            },
            _ => Transition::Stay,
        }
    }

    fn classify_string(window: &Window<'_>) -> Transition {
        if window.current() != '"' {
            return Transition::Stay;
        }
        if window.peek(1) == Some('"') {
            return Transition::Escape { len: 2 };
        }
        // "x"c is a Char literal
        let is_char = window.peek(1).is_some_and(|c| c.eq_ignore_ascii_case(&'c'))
            && !window.peek(2).is_some_and(is_identifier_char);
        if is_char {
            Transition::CloseString {
                len: 2,
                emit: false,
            }
        } else {
            Transition::CloseString { len: 1, emit: true }
        }
    }
}

impl Dialect for VisualBasic {
    fn classify(&self, state: LexState, window: &Window<'_>) -> Transition {
        match state {
            // VB interpolated strings are not recognised, so holes never open.
            LexState::Code | LexState::Hole => Self::classify_code(window),
            LexState::String(_) => Self::classify_string(window),
            // No block comments in VB.
            LexState::Comment => Transition::Stay,
        }
    }

    fn decode(&self, body: &str, _kind: StringKind) -> String {
        body.replace("\"\"", "\"")
    }

    fn no_localize_comment(&self) -> Option<&str> {
        None
    }
}

/// `REM` keyword starting a comment.
fn is_rem(window: &Window<'_>) -> bool {
    window.starts_with_ignore_case("rem")
        && !window.prev().is_some_and(is_identifier_char)
        && window.peek(3).is_none_or(char::is_whitespace)
}

/// Length of a ` _` continuation starting at whitespace: `[ \t]*_[ \t]*\r?\n[ \t]*`.
fn continuation_len(rest: &[char]) -> Option<usize> {
    let blanks = |from: usize| {
        rest[from..]
            .iter()
            .take_while(|c| matches!(c, ' ' | '\t'))
            .count()
    };

    let mut i = blanks(0);
    if i == 0 || rest.get(i) != Some(&'_') {
        return None;
    }
    i += 1;
    i += blanks(i);
    if rest.get(i) == Some(&'\r') {
        i += 1;
    }
    if rest.get(i) != Some(&'\n') {
        return None;
    }
    i += 1;
    Some(i + blanks(i))
}
