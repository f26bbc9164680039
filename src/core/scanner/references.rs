use super::ScanMode;
use crate::{
    core::{
        dialect::StringKind,
        error::ScanError,
        position::{Position, Span},
        resolver::{DottedReference, ResolveContext},
        results::{ItemFlags, ReferenceItem},
        trie::NodeId,
    },
    utils::is_identifier_char,
};

/// Where the chain is relative to the last character seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainState {
    /// Not inside a dotted chain.
    Idle,
    /// Inside an identifier segment.
    Segment,
    /// Whitespace after a segment; a `.` continues the chain.
    AfterSegment,
    /// After a `.`, waiting for the next segment.
    AfterDot,
}

/// Dotted identifier chain being matched against the trie.
#[derive(Debug, Clone)]
struct Chain {
    state: ChainState,
    start: Position,
    /// Identifiers and dots, without whitespace or comments.
    text: String,
    node: NodeId,
    /// Whether `node` is a live position of the trie walk.
    alive: bool,
    /// A reference was already reported for this chain.
    consumed: bool,
}

impl Chain {
    fn idle() -> Self {
        Self {
            state: ChainState::Idle,
            start: Position::start(),
            text: String::new(),
            node: NodeId::ROOT,
            alive: false,
            consumed: false,
        }
    }
}

/// Walks dotted chains through the trie and resolves terminal matches.
pub(super) struct ReferenceMode<'c, 'a> {
    ctx: &'c ResolveContext<'a>,
    flags: ItemFlags,
    chain: Chain,
    items: Vec<ReferenceItem>,
}

impl<'c, 'a> ReferenceMode<'c, 'a> {
    pub(super) fn new(ctx: &'c ResolveContext<'a>, flags: ItemFlags) -> Self {
        Self {
            ctx,
            flags,
            chain: Chain::idle(),
            items: Vec::new(),
        }
    }

    pub(super) fn into_items(self) -> Vec<ReferenceItem> {
        self.items
    }

    fn reset(&mut self) {
        self.chain = Chain::idle();
    }

    fn identifier(&mut self, ch: char, at: Position) {
        let trie = self.ctx.trie;
        let chain = &mut self.chain;

        match chain.state {
            ChainState::Idle | ChainState::AfterSegment => {
                *chain = Chain::idle();
                chain.start = at;
                chain.node = trie.step(trie.root(), ch);
            }
            ChainState::AfterDot => {
                // A segment start may restart a walk that died or took a wrong branch.
                let next = if chain.alive {
                    trie.step(chain.node, ch)
                } else {
                    NodeId::ROOT
                };
                chain.node = if next == NodeId::ROOT {
                    trie.step(trie.root(), ch)
                } else {
                    next
                };
            }
            ChainState::Segment if chain.alive => {
                chain.node = trie.step(chain.node, ch);
            }
            ChainState::Segment => {}
        }

        chain.alive = chain.node != NodeId::ROOT;
        chain.text.push(ch);
        chain.state = ChainState::Segment;
    }

    fn dot(&mut self) {
        let trie = self.ctx.trie;
        let chain = &mut self.chain;

        match chain.state {
            ChainState::Segment | ChainState::AfterSegment => {
                if chain.alive {
                    chain.node = trie.step(chain.node, '.');
                    chain.alive = chain.node != NodeId::ROOT;
                }
                chain.text.push('.');
                chain.state = ChainState::AfterDot;
            }
            ChainState::Idle | ChainState::AfterDot => *chain = Chain::idle(),
        }
    }

    fn whitespace(&mut self) {
        if self.chain.state == ChainState::Segment {
            self.chain.state = ChainState::AfterSegment;
        }
    }

    /// Resolve the chain if its walk sits on a terminal node at a segment end.
    fn try_resolve(&mut self, end: Position) -> Result<(), ScanError> {
        let chain = &self.chain;
        if chain.consumed || !chain.alive || !self.ctx.trie.is_terminal(chain.node) {
            return Ok(());
        }
        let Some(reference) = DottedReference::parse(&chain.text) else {
            return Ok(());
        };

        let candidates = self.ctx.trie.records(chain.node);
        let Some(record) = self.ctx.resolve(&reference, candidates)? else {
            tracing::trace!(text = %chain.text, "unresolved reference");
            return Ok(());
        };

        let span = Span::new(chain.start, end);
        let item = ReferenceItem {
            original_text: reference.original_text(),
            full_text: format!("{}.{}", record.origin.qualified_class(), reference.key),
            key: record.key.clone(),
            value: record.value.clone(),
            origin: record.origin.clone(),
            offset: span.start.offset,
            length: span.len(),
            span,
            flags: self.flags,
        };
        self.items.push(item);
        self.chain.consumed = true;
        Ok(())
    }
}

impl ScanMode for ReferenceMode<'_, '_> {
    fn code_char(&mut self, ch: char, at: Position, next: Option<char>) -> Result<(), ScanError> {
        if is_identifier_char(ch) {
            self.identifier(ch, at);
            if !next.is_some_and(is_identifier_char) {
                self.try_resolve(at.advance(ch))?;
            }
        } else if ch == '.' {
            self.dot();
        } else if ch.is_whitespace() {
            self.whitespace();
        } else {
            self.reset();
        }
        Ok(())
    }

    fn string_opened(&mut self, _kind: StringKind, _at: Position) {
        self.reset();
    }

    // Block comments count as whitespace: `Ns./*c*/Class.Key` keeps the chain.
    fn comment_closed(&mut self, _text: &str) {
        self.whitespace();
    }

    fn line_comment(&mut self) {
        self.reset();
    }

    // `Resources _\n .Key` keeps the chain, `Reso _\n urces.Key` does not.
    fn continuation(&mut self) {
        self.whitespace();
    }

    fn hole_closed(&mut self) {
        self.reset();
    }
}
