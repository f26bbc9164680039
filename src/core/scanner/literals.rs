use super::{ScanMode, StringToken};
use crate::core::{
    dialect::{Dialect, StringKind},
    error::ScanError,
    position::Position,
    results::{ItemFlags, LiteralItem},
};

/// Collects string literals and tracks the no-localize marker.
pub(super) struct LiteralMode<'d, D: ?Sized> {
    dialect: &'d D,
    flags: ItemFlags,
    /// The marker comment was seen and only whitespace followed it.
    marker_pending: bool,
    /// Marker state captured when the current string opened.
    current_marked: bool,
    items: Vec<LiteralItem>,
}

impl<'d, D: Dialect + ?Sized> LiteralMode<'d, D> {
    pub(super) fn new(dialect: &'d D, flags: ItemFlags) -> Self {
        Self {
            dialect,
            flags,
            marker_pending: false,
            current_marked: false,
            items: Vec::new(),
        }
    }

    pub(super) fn into_items(self) -> Vec<LiteralItem> {
        self.items
    }
}

impl<D: Dialect + ?Sized> ScanMode for LiteralMode<'_, D> {
    fn code_char(&mut self, ch: char, _at: Position, _next: Option<char>) -> Result<(), ScanError> {
        if !ch.is_whitespace() {
            self.marker_pending = false;
        }
        Ok(())
    }

    fn string_opened(&mut self, _kind: StringKind, _at: Position) {
        self.current_marked = std::mem::take(&mut self.marker_pending);
    }

    fn string_closed(&mut self, token: StringToken) {
        let marked = std::mem::take(&mut self.current_marked);
        if !token.emit {
            return;
        }
        self.items.push(LiteralItem {
            value: self.dialect.decode(&token.body, token.kind),
            offset: token.span.start.offset,
            length: token.span.len(),
            verbatim: token.kind == StringKind::Verbatim,
            flags: ItemFlags {
                marked_unlocalizable: marked,
                ..self.flags
            },
            span: token.span,
            text: token.text,
        });
    }

    fn string_abandoned(&mut self) {
        self.current_marked = false;
    }

    fn comment_closed(&mut self, text: &str) {
        self.marker_pending = self.dialect.no_localize_comment() == Some(text);
    }

    fn line_comment(&mut self) {
        self.marker_pending = false;
    }
}
