//! Per-language lexical hooks.
//!
//! A [`Dialect`] looks at one character (with a little context around it) and
//! tells the scanner how the lexical state changes. It owns no state; the
//! scanner keeps the [`LexState`] and feeds it back on every call.

mod csharp;
mod vb;

use std::path::Path;

use serde::Serialize;

pub use csharp::{CSharp, DEFAULT_NO_LOCALIZE_COMMENT};
pub use vb::VisualBasic;

/// Flavour of an open string token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// `"..."` with the dialect's usual escapes.
    Regular,
    /// `@"..."`, where only `""` is an escape.
    Verbatim,
    /// `$"..."`.
    Interpolated,
    /// `$@"..."` or `@$"..."`.
    InterpolatedVerbatim,
    /// `'c'`.
    Char,
}

/// Lexical state the scanner is in before the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexState {
    Code,
    String(StringKind),
    /// Inside a block comment.
    Comment,
    /// Code inside a `{...}` hole of an interpolated string.
    Hole,
}

impl LexState {
    /// Whether characters in this state are code.
    pub fn is_code(self) -> bool {
        matches!(self, LexState::Code | LexState::Hole)
    }
}

/// What the current character does to the lexical state.
///
/// Every `len` counts characters starting at the current one and is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Ordinary character of the current state.
    Stay,
    OpenString { kind: StringKind, len: usize },
    /// Escape sequence inside a string (`\"`, `""`, `{{`).
    Escape { len: usize },
    /// End of the string. `emit` is false for tokens that are never reported
    /// as literals (char literals, interpolated strings).
    CloseString { len: usize, emit: bool },
    /// The string cannot continue here (line break in a single-line literal).
    /// The current character is then treated as code.
    Abandon,
    OpenComment { len: usize },
    CloseComment { len: usize },
    /// Rest of the line is a comment.
    LineComment,
    /// Line continuation. The covered characters separate tokens like a
    /// single blank would.
    Continuation { len: usize },
    /// Unescaped `{` in an interpolated string: code follows until the
    /// matching `}`.
    OpenHole,
    /// `{` or `}` in a hole. The scanner tracks nesting; the `}` matching the
    /// hole's `{` returns to the string.
    Brace { open: bool },
}

/// Read-only view of the text around the current character.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    chars: &'a [char],
    index: usize,
}

impl<'a> Window<'a> {
    /// `index` must be a valid index into `chars`.
    pub fn new(chars: &'a [char], index: usize) -> Self {
        debug_assert!(index < chars.len());
        Self { chars, index }
    }

    pub fn current(&self) -> char {
        self.chars[self.index]
    }

    /// Character `n` places after the current one (`peek(1)` is the next one).
    pub fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.index + n).copied()
    }

    /// Character right before the current one.
    pub fn prev(&self) -> Option<char> {
        self.index.checked_sub(1).map(|i| self.chars[i])
    }

    /// Characters from the current one to the end of text.
    pub fn rest(&self) -> &'a [char] {
        &self.chars[self.index..]
    }

    pub fn starts_with(&self, pattern: &str) -> bool {
        let rest = self.rest();
        let mut count = 0;
        for (i, p) in pattern.chars().enumerate() {
            if rest.get(i) != Some(&p) {
                return false;
            }
            count += 1;
        }
        count > 0
    }

    /// ASCII case-insensitive [`starts_with`](Self::starts_with).
    pub fn starts_with_ignore_case(&self, pattern: &str) -> bool {
        let rest = self.rest();
        pattern
            .chars()
            .enumerate()
            .all(|(i, p)| rest.get(i).is_some_and(|c| c.eq_ignore_ascii_case(&p)))
    }
}

/// Lexical rules of one source language.
pub trait Dialect: Sync {
    /// Classify the current character given the state before it.
    fn classify(&self, state: LexState, window: &Window<'_>) -> Transition;

    /// Decode the body of a string token (the text between its delimiters).
    fn decode(&self, body: &str, kind: StringKind) -> String;

    /// Exact block comment that marks the next literal as not localizable.
    fn no_localize_comment(&self) -> Option<&str>;
}

/// Source languages the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    #[serde(rename = "csharp")]
    CSharp,
    #[serde(rename = "vb")]
    VisualBasic,
}

impl Language {
    /// Language of a code file, by extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("cs") {
            Some(Language::CSharp)
        } else if ext.eq_ignore_ascii_case("vb") {
            Some(Language::VisualBasic)
        } else {
            None
        }
    }

    /// Language from a page directive's `Language` attribute (`C#`, `VB`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "c#" | "cs" | "csharp" => Some(Language::CSharp),
            "vb" | "vbs" | "visualbasic" | "vbscript" => Some(Language::VisualBasic),
            _ => None,
        }
    }

    /// Dialect for this language. `no_localize_comment` overrides the default
    /// marker where the language has one.
    pub fn dialect(self, no_localize_comment: Option<&str>) -> Box<dyn Dialect> {
        match self {
            Language::CSharp => Box::new(match no_localize_comment {
                Some(marker) => CSharp::with_no_localize_comment(marker),
                None => CSharp::default(),
            }),
            Language::VisualBasic => Box::new(VisualBasic),
        }
    }
}
