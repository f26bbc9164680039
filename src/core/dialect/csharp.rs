//! C# lexical rules.

use super::{Dialect, LexState, StringKind, Transition, Window};

pub const DEFAULT_NO_LOCALIZE_COMMENT: &str = "/*VL_NO_LOC*/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSharp {
    no_localize_comment: String,
}

impl Default for CSharp {
    fn default() -> Self {
        Self::with_no_localize_comment(DEFAULT_NO_LOCALIZE_COMMENT)
    }
}

impl CSharp {
    pub fn with_no_localize_comment(marker: impl Into<String>) -> Self {
        Self {
            no_localize_comment: marker.into(),
        }
    }

    fn classify_code(window: &Window<'_>) -> Transition {
        let open = |kind, len| Transition::OpenString { kind, len };

        match window.current() {
            '/' if window.peek(1) == Some('/') => Transition::LineComment,
            '/' if window.peek(1) == Some('*') => Transition::OpenComment { len: 2 },
            '"' => open(StringKind::Regular, 1),
            '\'' => open(StringKind::Char, 1),
            '@' if window.starts_with("@\"") => open(StringKind::Verbatim, 2),
            '@' if window.starts_with("@$\"") => open(StringKind::InterpolatedVerbatim, 3),
            '$' if window.starts_with("$@\"") => open(StringKind::InterpolatedVerbatim, 3),
            '$' if window.starts_with("$\"") => open(StringKind::Interpolated, 2),
            _ => Transition::Stay,
        }
    }

    fn classify_string(kind: StringKind, window: &Window<'_>) -> Transition {
        let ch = window.current();
        let interpolated = matches!(
            kind,
            StringKind::Interpolated | StringKind::InterpolatedVerbatim
        );
        if interpolated {
            if window.starts_with("{{") || window.starts_with("}}") {
                return Transition::Escape { len: 2 };
            }
            if ch == '{' {
                return Transition::OpenHole;
            }
        }

        match kind {
            StringKind::Regular | StringKind::Interpolated | StringKind::Char => {
                let quote = if kind == StringKind::Char { '\'' } else { '"' };
                match ch {
                    '\\' if matches!(window.peek(1), Some('\r' | '\n')) => Transition::Abandon,
                    '\\' => Transition::Escape { len: 2 },
                    c if c == quote => Transition::CloseString {
                        len: 1,
                        emit: kind == StringKind::Regular,
                    },
                    '\r' | '\n' => Transition::Abandon,
                    _ => Transition::Stay,
                }
            }
            StringKind::Verbatim | StringKind::InterpolatedVerbatim => {
                if window.starts_with("\"\"") {
                    Transition::Escape { len: 2 }
                } else if ch == '"' {
                    Transition::CloseString {
                        len: 1,
                        emit: kind == StringKind::Verbatim,
                    }
                } else {
                    Transition::Stay
                }
            }
        }
    }
}

impl Dialect for CSharp {
    fn classify(&self, state: LexState, window: &Window<'_>) -> Transition {
        match state {
            LexState::Code => Self::classify_code(window),
            LexState::Hole => match window.current() {
                '{' => Transition::Brace { open: true },
                '}' => Transition::Brace { open: false },
                _ => Self::classify_code(window),
            },
            LexState::String(kind) => Self::classify_string(kind, window),
            LexState::Comment if window.starts_with("*/") => Transition::CloseComment { len: 2 },
            LexState::Comment => Transition::Stay,
        }
    }

    fn decode(&self, body: &str, kind: StringKind) -> String {
        match kind {
            StringKind::Regular | StringKind::Char => unescape(body),
            StringKind::Verbatim => body.replace("\"\"", "\""),
            StringKind::Interpolated | StringKind::InterpolatedVerbatim => body.to_string(),
        }
    }

    fn no_localize_comment(&self) -> Option<&str> {
        Some(&self.no_localize_comment)
    }
}

/// Decode C# backslash escapes. Unknown escapes are kept as written.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        let simple = match escape {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '0' => Some('\0'),
            'a' => Some('\u{07}'),
            'b' => Some('\u{08}'),
            'f' => Some('\u{0C}'),
            'v' => Some('\u{0B}'),
            '\\' | '"' | '\'' => Some(escape),
            _ => None,
        };
        if let Some(decoded) = simple {
            out.push(decoded);
            continue;
        }

        let (min, max) = match escape {
            'u' => (4, 4),
            'U' => (8, 8),
            'x' => (1, 4),
            _ => {
                out.push('\\');
                out.push(escape);
                continue;
            }
        };
        let mut digits = String::new();
        while digits.len() < max
            && let Some(&d) = chars.peek()
            && d.is_ascii_hexdigit()
        {
            digits.push(d);
            chars.next();
        }
        let decoded = (digits.len() >= min)
            .then(|| u32::from_str_radix(&digits, 16).ok())
            .flatten()
            .and_then(char::from_u32);
        match decoded {
            Some(decoded) => out.push(decoded),
            None => {
                out.push('\\');
                out.push(escape);
                out.push_str(&digits);
            }
        }
    }

    out
}
