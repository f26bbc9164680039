//! Single-pass scanning engine.
//!
//! [`drive`] walks a block of text once, asks the [`Dialect`] how each
//! character changes the lexical state, and reports what happened to a
//! [`ScanMode`]. The two modes, literal search and reference search, live in
//! their own modules; both are built fresh for every call so scans of
//! independent blocks can run in parallel.
//!
//! Unterminated strings and comments at the end of the text are dropped.

mod literals;
mod references;

use crate::core::{
    dialect::{Dialect, LexState, StringKind, Transition, Window},
    error::ScanError,
    position::{Position, Span},
    resolver::ResolveContext,
    results::{ItemFlags, LiteralItem, ReferenceItem},
};

use literals::LiteralMode;
use references::ReferenceMode;

/// A complete string token.
#[derive(Debug, Clone)]
pub(crate) struct StringToken {
    pub kind: StringKind,
    /// Source text including prefix and delimiters.
    pub text: String,
    /// Text between the delimiters, escapes not yet decoded.
    pub body: String,
    pub span: Span,
    /// Whether the dialect reports this kind of token as a literal.
    pub emit: bool,
}

/// Receiver of driver events.
pub(crate) trait ScanMode {
    /// A character outside strings and comments. `next` is the following character.
    fn code_char(&mut self, ch: char, at: Position, next: Option<char>) -> Result<(), ScanError>;

    fn string_opened(&mut self, _kind: StringKind, _at: Position) {}

    fn string_closed(&mut self, _token: StringToken) {}

    fn string_abandoned(&mut self) {}

    fn comment_opened(&mut self) {}

    /// `text` is the whole comment including its delimiters.
    fn comment_closed(&mut self, _text: &str) {}

    fn line_comment(&mut self) {}

    /// A line continuation, which separates tokens like a blank.
    fn continuation(&mut self) {}

    /// The `}` of an interpolation hole; string text follows.
    fn hole_closed(&mut self) {}
}

struct OpenToken {
    index: usize,
    start: Position,
    prefix_len: usize,
}

/// An interpolated string suspended while the code of one of its holes is scanned.
struct Hole {
    kind: StringKind,
    token: Option<OpenToken>,
    /// Unmatched `{` seen inside the hole.
    depth: usize,
}

/// State to return to when a token ends: code, or the hole it sits in.
fn resting_state(holes: &[Hole]) -> LexState {
    if holes.is_empty() {
        LexState::Code
    } else {
        LexState::Hole
    }
}

/// Run `mode` over `text`, starting at `anchor`.
///
/// Strings closed inside an interpolation hole belong to the interpolated
/// string and are never emitted.
pub(crate) fn drive<D, M>(
    dialect: &D,
    text: &str,
    anchor: Position,
    mode: &mut M,
) -> Result<(), ScanError>
where
    D: Dialect + ?Sized,
    M: ScanMode,
{
    let chars: Vec<char> = text.chars().collect();
    let mut state = LexState::Code;
    let mut pos = anchor;
    let mut open: Option<OpenToken> = None;
    let mut holes: Vec<Hole> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let window = Window::new(&chars, i);
        let transition = dialect.classify(state, &window);
        let start = pos;
        let consumed = match transition {
            Transition::Stay
            | Transition::Abandon
            | Transition::OpenHole
            | Transition::Brace { .. } => 1,
            Transition::LineComment => chars[i..]
                .iter()
                .position(|&c| c == '\n')
                .unwrap_or(chars.len() - i),
            Transition::OpenString { len, .. }
            | Transition::Escape { len }
            | Transition::CloseString { len, .. }
            | Transition::OpenComment { len }
            | Transition::CloseComment { len }
            | Transition::Continuation { len } => len,
        }
        .clamp(1, chars.len() - i);
        let end = chars[i..i + consumed]
            .iter()
            .copied()
            .fold(pos, Position::advance);
        let next = chars.get(i + consumed).copied();

        match transition {
            Transition::Stay if state.is_code() => {
                mode.code_char(chars[i], pos, next)?;
            }
            Transition::Stay | Transition::Escape { .. } => {}
            Transition::Continuation { .. } => mode.continuation(),
            Transition::Abandon => {
                open = None;
                if !state.is_code() {
                    state = resting_state(&holes);
                    mode.string_abandoned();
                }
                mode.code_char(chars[i], pos, next)?;
            }
            Transition::OpenString { kind, len } => {
                open = Some(OpenToken {
                    index: i,
                    start,
                    prefix_len: len,
                });
                state = LexState::String(kind);
                mode.string_opened(kind, start);
            }
            Transition::CloseString { len, emit } => {
                if let (LexState::String(kind), Some(token)) = (state, open.take()) {
                    let close_at = i + consumed;
                    let close_len = len.min(consumed);
                    mode.string_closed(StringToken {
                        kind,
                        text: chars[token.index..close_at].iter().collect(),
                        body: chars[token.index + token.prefix_len..close_at - close_len]
                            .iter()
                            .collect(),
                        span: Span::new(token.start, end),
                        emit: emit && holes.is_empty(),
                    });
                }
                state = resting_state(&holes);
            }
            Transition::OpenHole => {
                if let LexState::String(kind) = state {
                    holes.push(Hole {
                        kind,
                        token: open.take(),
                        depth: 0,
                    });
                    state = LexState::Hole;
                }
            }
            Transition::Brace { open: opening } => {
                let closes_hole = !opening && holes.last().is_some_and(|h| h.depth == 0);
                if closes_hole && let Some(hole) = holes.pop() {
                    open = hole.token;
                    state = LexState::String(hole.kind);
                    mode.hole_closed();
                } else {
                    if let Some(hole) = holes.last_mut() {
                        hole.depth = if opening {
                            hole.depth + 1
                        } else {
                            hole.depth.saturating_sub(1)
                        };
                    }
                    mode.code_char(chars[i], pos, next)?;
                }
            }
            Transition::OpenComment { .. } => {
                open = Some(OpenToken {
                    index: i,
                    start,
                    prefix_len: consumed,
                });
                state = LexState::Comment;
                mode.comment_opened();
            }
            Transition::CloseComment { .. } => {
                if let Some(token) = open.take() {
                    let comment: String = chars[token.index..i + consumed].iter().collect();
                    mode.comment_closed(&comment);
                }
                state = resting_state(&holes);
            }
            Transition::LineComment => mode.line_comment(),
        }

        pos = end;
        i += consumed;
    }

    if state != LexState::Code {
        tracing::trace!(?state, at = %pos, "dropping unterminated token");
    }
    Ok(())
}

/// Find the string literals of a code block.
///
/// `anchor` is the position of the block's first character in its file.
/// Literals are returned in document order; interpolated strings and char
/// literals are never reported.
pub fn find_literals<D>(
    dialect: &D,
    text: &str,
    anchor: Position,
    flags: ItemFlags,
) -> Result<Vec<LiteralItem>, ScanError>
where
    D: Dialect + ?Sized,
{
    let anchor = anchor.validate_anchor()?;
    let mut mode = LiteralMode::new(dialect, flags);
    drive(dialect, text, anchor, &mut mode)?;
    Ok(mode.into_items())
}

/// Find references to resource entries in a code block.
///
/// A dotted identifier chain is reported when it walks the trie of `ctx` to
/// a terminal node and the resolver picks one record for it. Errors from a
/// malformed namespace table are returned as [`ScanError::Scope`].
pub fn find_references<D>(
    dialect: &D,
    text: &str,
    anchor: Position,
    ctx: &ResolveContext<'_>,
    flags: ItemFlags,
) -> Result<Vec<ReferenceItem>, ScanError>
where
    D: Dialect + ?Sized,
{
    let anchor = anchor.validate_anchor()?;
    let mut mode = ReferenceMode::new(ctx, flags);
    drive(dialect, text, anchor, &mut mode)?;
    Ok(mode.into_items())
}
